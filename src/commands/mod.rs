//! Command dispatch and handlers.

pub mod add;
pub mod auth;
pub mod board;
pub mod move_task;

use crate::cli::{Cli, Command};
use crate::context::ServiceContext;
use crate::drag::PointerDelta;

/// Dispatch a parsed command against the live task service.
///
/// The session is written back to the store after the command finishes,
/// even when it failed, so rotated tokens and forced logouts are kept.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails or the
/// session cannot be saved.
pub async fn dispatch(cli: &Cli) -> Result<(), String> {
    let ctx = ServiceContext::live(&cli.config)?;
    let result = dispatch_with_context(&cli.command, &ctx).await;
    let persisted = ctx.persist_session();
    result.and(persisted)
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub async fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Login { email, password } => auth::login(ctx, email, password).await,
        Command::Signup { name, email, password } => auth::signup(ctx, name, email, password).await,
        Command::Logout => {
            auth::logout(ctx);
            Ok(())
        }
        Command::Whoami => {
            auth::whoami(ctx);
            Ok(())
        }
        Command::Board { json } => board::run(ctx, *json).await,
        Command::Add { title, description, priority, due, status } => {
            let task = crate::board::NewTask {
                title: title.clone(),
                description: description.clone(),
                priority: *priority,
                due_date: *due,
                status: *status,
            };
            add::run(ctx, &task).await
        }
        Command::Move { task, over, via, down } => {
            let delta = if *down { PointerDelta::down() } else { PointerDelta::default() };
            move_task::run(ctx, task, via, over, delta).await
        }
    }
}
