//! `taskboard add` command.

use crate::board::NewTask;
use crate::context::ServiceContext;

use super::board;

/// Execute the `add` command.
///
/// The created task goes to the top of its column and the updated board is
/// printed.
///
/// # Errors
///
/// Returns an error string if the board cannot be fetched or the service
/// rejects the task.
pub async fn run(ctx: &ServiceContext, task: &NewTask) -> Result<(), String> {
    let current = board::fetch(ctx).await?;
    let created =
        ctx.tasks.create_task(task).await.map_err(|e| format!("Failed to create task: {e}"))?;
    tracing::info!(task = %created.id, status = %created.status, "task created");
    println!("Created {} in {}.", created.id, created.status);

    let updated = current.insert(created);
    print!("{}", board::render(&updated));
    Ok(())
}
