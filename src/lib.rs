//! Core library entry for the `taskboard` CLI.
//!
//! A board of tasks grouped into status columns, the drag engine that moves
//! cards between and within columns, and the plumbing that reports moves to
//! the task service.

pub mod adapters;
pub mod board;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod drag;
pub mod error;
pub mod logging;
pub mod ports;
pub mod reconcile;
pub mod session;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
/// `--help` and `--version` print to stdout and succeed.
pub async fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    logging::init(&cli.config.log)?;
    commands::dispatch(&cli).await
}

#[cfg(test)]
mod tests {
    use super::run;

    #[tokio::test]
    async fn run_whoami_with_empty_store() {
        let dir = std::env::temp_dir().join("taskboard_run_whoami_empty");
        let store = dir.to_str().unwrap();

        let result = run(["taskboard", "whoami", "--store", store]).await;

        let _ = std::fs::remove_dir_all(&dir);
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn run_help_and_version_succeed() {
        assert!(run(["taskboard", "--help"]).await.is_ok());
        assert!(run(["taskboard", "move", "--help"]).await.is_ok());
        assert!(run(["taskboard", "--version"]).await.is_ok());
    }

    #[tokio::test]
    async fn run_errors_on_unknown_subcommand() {
        let result = run(["taskboard", "unknown"]).await;
        assert!(result.is_err());
    }
}
