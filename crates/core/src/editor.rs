//! Editor view model and save planning
//!
//! Decides what the edit page shows and what gets written on save. Reading and
//! writing files is left to the caller.

use crate::eol::{self, Description, LineEnding};
use serde::Serialize;

/// Content shown for a file that does not exist yet
pub const NEW_FILE_CONTENT: &str = "# New File\n";

/// Everything the edit page needs to render
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditorView {
    pub file: String,
    pub content: String,
    pub line_endings: Vec<Description>,
    pub current: LineEnding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    pub saved: bool,
}

impl EditorView {
    /// View for a freshly loaded file. The current convention is detected from
    /// the content, falling back to `host_default`.
    pub fn open(
        file: impl Into<String>,
        content: impl Into<String>,
        host_default: LineEnding,
    ) -> Self {
        let content = content.into();
        let current = eol::detect_with_default(&content, host_default);

        Self {
            file: file.into(),
            content,
            line_endings: eol::describe_all(),
            current,
            warning: None,
            saved: false,
        }
    }

    /// View shown after a save. Displays the content as the browser submitted
    /// it, with the convention that was written to disk.
    pub fn after_save(
        file: impl Into<String>,
        submitted: impl Into<String>,
        plan: &SavePlan,
        host_default: LineEnding,
    ) -> Self {
        let mut view = Self::open(file, submitted, host_default);
        if let Some(applied) = plan.applied {
            view.current = applied;
        }
        view.warning = plan.warning.clone();
        view.saved = true;
        view
    }
}

/// What to write to disk for a submitted edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    pub content: String,
    pub applied: Option<LineEnding>,
    pub warning: Option<String>,
}

/// Work out what to persist for `content` given the raw `eol` form value.
///
/// Never fails: an unusable selection keeps the content exactly as submitted
/// and records a warning for the user.
pub fn plan_save(content: &str, selection: Option<&str>) -> SavePlan {
    let resolved = selection
        .ok_or_else(|| eol::Error::InvalidIdentifier(String::new()))
        .and_then(str::parse::<LineEnding>);

    match resolved {
        Ok(ending) => SavePlan {
            content: ending.apply(content),
            applied: Some(ending),
            warning: None,
        },
        Err(e) => SavePlan {
            content: content.to_string(),
            applied: None,
            warning: Some(format!("{e}. Saved without converting line endings.")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================================
    // EditorView tests
    // ============================================================================

    #[test]
    fn test_open_detects_convention() {
        let view = EditorView::open("notes.md", "a\r\nb\r\n", LineEnding::Lf);
        assert_eq!(view.file, "notes.md");
        assert_eq!(view.current, LineEnding::Crlf);
        assert_eq!(view.line_endings, eol::describe_all());
        assert!(view.warning.is_none());
        assert!(!view.saved);
    }

    #[test]
    fn test_open_single_line_uses_host_default() {
        let view = EditorView::open("notes.md", "# Title", LineEnding::Crlf);
        assert_eq!(view.current, LineEnding::Crlf);
    }

    #[test]
    fn test_open_new_file_placeholder() {
        let view = EditorView::open("new.md", NEW_FILE_CONTENT, LineEnding::Crlf);
        assert_eq!(view.current, LineEnding::Lf);
    }

    #[test]
    fn test_after_save_shows_applied_convention() {
        // Browsers submit textarea content with CRLF breaks
        let submitted = "a\r\nb";
        let plan = plan_save(submitted, Some("2"));
        let view = EditorView::after_save("notes.md", submitted, &plan, LineEnding::Lf);

        assert_eq!(view.content, submitted);
        assert_eq!(view.current, LineEnding::Cr);
        assert!(view.saved);
        assert!(view.warning.is_none());
    }

    #[test]
    fn test_after_save_without_conversion_detects() {
        let submitted = "a\r\nb";
        let plan = plan_save(submitted, Some("nope"));
        let view = EditorView::after_save("notes.md", submitted, &plan, LineEnding::Lf);

        assert_eq!(view.current, LineEnding::Crlf);
        assert!(view.saved);
        assert!(view.warning.is_some());
    }

    // ============================================================================
    // plan_save tests
    // ============================================================================

    #[test]
    fn test_plan_save_converts() {
        let plan = plan_save("a\r\nb", Some("1"));
        assert_eq!(plan.content, "a\nb");
        assert_eq!(plan.applied, Some(LineEnding::Lf));
        assert!(plan.warning.is_none());
    }

    #[test]
    fn test_plan_save_unknown_id_keeps_content() {
        let plan = plan_save("a\r\nb", Some("9"));
        assert_eq!(plan.content, "a\r\nb");
        assert_eq!(plan.applied, None);
        let warning = plan.warning.unwrap();
        assert!(warning.contains("\"9\""));
        assert!(warning.contains("Saved without converting"));
    }

    #[test]
    fn test_plan_save_non_numeric_keeps_content() {
        let plan = plan_save("a\rb", Some("x"));
        assert_eq!(plan.content, "a\rb");
        assert!(plan.warning.is_some());
    }

    #[test]
    fn test_plan_save_missing_selection_keeps_content() {
        let plan = plan_save("a\nb", None);
        assert_eq!(plan.content, "a\nb");
        assert_eq!(plan.applied, None);
        assert!(plan.warning.is_some());
    }
}
