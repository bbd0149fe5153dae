//! Runtime configuration shared by every command.
//!
//! Each setting can come from a flag, an environment variable, or a `.env`
//! file loaded before parsing.

use std::path::PathBuf;

use clap::Args;

/// Default task service location.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// Global settings.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// Base URL of the task service.
    #[arg(long, global = true, env = "TASKBOARD_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Directory holding the saved session.
    #[arg(long, global = true, env = "TASKBOARD_STORE", default_value = ".taskboard")]
    pub store: PathBuf,

    /// Log filter (overridden by `RUST_LOG`).
    #[arg(long, global = true, env = "TASKBOARD_LOG", default_value = "warn")]
    pub log: String,
}

/// Loads `.env` from the working directory if there is one.
pub fn load_dotenv() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: failed to load .env: {e}");
        }
    }
}
