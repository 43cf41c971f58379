//! HTML rendering for the editor pages and edit URLs

use crate::editor::EditorView;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::net::IpAddr;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0 auto; max-width: 60rem; padding: 1rem; }
textarea { box-sizing: border-box; font-family: monospace; font-size: 0.95rem; height: 70vh; width: 100%; }
.toolbar { align-items: center; display: flex; gap: 0.75rem; margin-top: 0.5rem; }
.warning { background: #fff3cd; border: 1px solid #e0c36c; padding: 0.5rem; }
.saved { color: #2e7d32; }
"#;

/// Path of the edit page for `file`. The whole path is encoded, separators
/// included, so it always lands in a single URL segment.
pub fn edit_path(file: &str) -> String {
    format!("/edit/{}", urlencoding::encode(file))
}

/// Host to put in a browser URL for a server bound to `bind_host`.
///
/// Wildcard addresses become `localhost` and IPv6 literals are bracketed.
pub fn url_host(bind_host: &str) -> String {
    let bare = bind_host.trim_start_matches('[').trim_end_matches(']');
    match bare.parse::<IpAddr>() {
        Ok(ip) if ip.is_unspecified() => "localhost".to_string(),
        Ok(IpAddr::V6(ip)) => format!("[{ip}]"),
        Ok(IpAddr::V4(ip)) => ip.to_string(),
        Err(_) => bind_host.to_string(),
    }
}

/// Absolute URL of the edit page for `file` on a server bound to `bind_host`
pub fn edit_url(bind_host: &str, port: u16, file: &str) -> String {
    format!("http://{}:{port}{}", url_host(bind_host), edit_path(file))
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
        encode_text(title)
    )
}

/// Render the edit page for a view
pub fn render_editor(view: &EditorView) -> String {
    let mut body = format!("<h1>{}</h1>\n", encode_text(&view.file));

    if let Some(warning) = &view.warning {
        body.push_str(&format!(
            "<p class=\"warning\">{}</p>\n",
            encode_text(warning)
        ));
    }
    if view.saved {
        body.push_str("<p class=\"saved\">Saved.</p>\n");
    }

    body.push_str(&format!(
        "<form method=\"post\" action=\"{}\">\n",
        encode_double_quoted_attribute(&edit_path(&view.file))
    ));
    // The HTML parser drops a newline directly after <textarea>, so emit one
    // to keep a leading blank line in the content.
    body.push_str(&format!(
        "<textarea name=\"content\" spellcheck=\"false\">\n{}</textarea>\n",
        encode_text(&view.content)
    ));

    body.push_str("<div class=\"toolbar\">\n<label>Line endings <select name=\"eol\">\n");
    for entry in &view.line_endings {
        let selected = if entry.id == view.current.id() {
            " selected"
        } else {
            ""
        };
        body.push_str(&format!(
            "<option value=\"{}\"{selected}>{}</option>\n",
            entry.id,
            encode_text(entry.description)
        ));
    }
    body.push_str("</select></label>\n<button type=\"submit\">Save</button>\n</div>\n</form>\n");

    body.push_str(
        "<form method=\"post\" action=\"/shutdown\">\n<button type=\"submit\">Shut down server</button>\n</form>\n",
    );

    layout(&view.file, &body)
}

/// Page returned once a shutdown has been requested
pub fn render_shutdown() -> String {
    layout("Shutting down", "<p><strong>Shutting down...</strong></p>\n")
}

/// Minimal error page
pub fn render_error(message: &str) -> String {
    layout(
        "Error",
        &format!("<h1>Error</h1>\n<p>{}</p>\n", encode_text(message)),
    )
}
