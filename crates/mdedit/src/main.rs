use crate::prelude::*;
use clap::Parser;

mod browser;
mod error;
mod files;
mod prelude;
mod server;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Edit markdown files in the browser. Line endings are detected when a file \
                  is opened and converted to the selected style when it is saved."
)]
pub struct App {
    #[clap(flatten)]
    serve: server::ServeOptions,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Whether to display additional information.
    #[clap(long, env = "MDEDIT_VERBOSE", default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    color_eyre::install()?;

    let app = App::parse();

    server::run(app.serve, app.global).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let app = App::try_parse_from(["mdedit", "notes.md"]).unwrap();
        assert_eq!(app.serve.files, vec!["notes.md"]);
        assert_eq!(app.serve.port, 10101);
        assert_eq!(app.serve.host, "127.0.0.1");
        assert!(!app.serve.daemon);
        assert!(!app.global.verbose);
    }

    #[test]
    fn test_cli_flags() {
        let app = App::try_parse_from(["mdedit", "-p", "8080", "-d", "--verbose", "a.md", "b.md"])
            .unwrap();
        assert_eq!(app.serve.files, vec!["a.md", "b.md"]);
        assert_eq!(app.serve.port, 8080);
        assert!(app.serve.daemon);
        assert!(app.global.verbose);
    }

    #[test]
    fn test_cli_requires_a_file() {
        assert!(App::try_parse_from(["mdedit"]).is_err());
    }

    #[test]
    fn test_cli_rejects_bad_port() {
        assert!(App::try_parse_from(["mdedit", "--port", "99999", "a.md"]).is_err());
    }
}
