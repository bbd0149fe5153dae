//! CLI argument definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::board::{Priority, Status};
use crate::config::Config;

/// Top-level CLI parser for `taskboard`.
#[derive(Debug, Parser)]
#[command(name = "taskboard", version, about = "View and move tasks on a status board")]
pub struct Cli {
    /// Settings shared by every command.
    #[command(flatten)]
    pub config: Config,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and save the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Register a new account and log in.
    Signup {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "TASKBOARD_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the saved session.
    Logout,
    /// Show who is logged in.
    Whoami,
    /// Show the board.
    Board {
        /// Print task records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Create a task at the top of its column.
    Add {
        /// Task title.
        #[arg(long)]
        title: String,
        /// Task description.
        #[arg(long, default_value = "")]
        description: String,
        /// LOW, MEDIUM or HIGH.
        #[arg(long, default_value = "LOW")]
        priority: Priority,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: NaiveDate,
        /// Column to create the task in.
        #[arg(long, default_value = "PENDING")]
        status: Status,
    },
    /// Drag a task onto a column or another task.
    Move {
        /// Id of the task to pick up.
        task: String,
        /// Column id or task id to release over.
        #[arg(long)]
        over: String,
        /// Targets to pass over before the release, in order.
        #[arg(long = "via")]
        via: Vec<String>,
        /// Treat the pointer as moving downward.
        #[arg(long)]
        down: bool,
    },
}
