use crate::prelude::*;
use std::process::{Command, Stdio};
use std::time::Duration;

/// Delay before each browser launch
const OPEN_DELAY: Duration = Duration::from_millis(500);

const NO_ARGS: &[&str] = &[];
// `start` treats its first quoted argument as a window title
const WINDOWS_START: &[&str] = &["/C", "start", ""];

/// Map Rust's OS constant to the program (and leading args) that opens a URL
pub fn opener_for(os: &str) -> (&'static str, &'static [&'static str]) {
    match os {
        "macos" => ("open", NO_ARGS),
        "windows" => ("cmd", WINDOWS_START),
        _ => ("xdg-open", NO_ARGS),
    }
}

/// Open `url` in the default browser without waiting for it.
pub fn open(url: &str) -> Result<()> {
    let (program, args) = opener_for(std::env::consts::OS);
    let program_path =
        which::which(program).with_context(|| f!("Could not find `{program}` to open {url}"))?;

    Command::new(program_path)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| f!("Failed to run `{program}`"))?;

    Ok(())
}

/// Open each URL in turn. Failures are logged and skipped.
pub async fn open_all(urls: Vec<String>) {
    for url in urls {
        tokio::time::sleep(OPEN_DELAY).await;
        log::info!("Opening {url}");
        if let Err(e) = open(&url) {
            log::warn!("Possible error while opening browser: {e:#}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opener_for_macos() {
        assert_eq!(opener_for("macos"), ("open", &[] as &[&str]));
    }

    #[test]
    fn test_opener_for_windows() {
        let (program, args) = opener_for("windows");
        assert_eq!(program, "cmd");
        assert_eq!(args, &["/C", "start", ""]);
    }

    #[test]
    fn test_opener_for_other_unix() {
        assert_eq!(opener_for("linux").0, "xdg-open");
        assert_eq!(opener_for("freebsd").0, "xdg-open");
    }
}
