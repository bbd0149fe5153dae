//! `taskboard board` command.

use crate::board::Board;
use crate::context::ServiceContext;

/// Execute the `board` command.
///
/// Prints every column with its tasks in order, or the raw task records as
/// JSON when `json` is set.
///
/// # Errors
///
/// Returns an error string if the tasks cannot be fetched.
pub async fn run(ctx: &ServiceContext, json: bool) -> Result<(), String> {
    let board = fetch(ctx).await?;
    if json {
        let text = serde_json::to_string_pretty(&board.records())
            .map_err(|e| format!("Failed to serialize tasks: {e}"))?;
        println!("{text}");
    } else {
        print!("{}", render(&board));
    }
    Ok(())
}

/// Fetches the current task list and builds a board from it.
///
/// # Errors
///
/// Returns an error string if the request fails or the list is malformed.
pub async fn fetch(ctx: &ServiceContext) -> Result<Board, String> {
    let records = ctx.tasks.list_tasks().await.map_err(|e| format!("Failed to load tasks: {e}"))?;
    let board = Board::load(records).map_err(|e| format!("Failed to load tasks: {e}"))?;
    tracing::debug!(tasks = board.len(), "board loaded");
    Ok(board)
}

/// Renders the board as one table per column.
#[must_use]
pub fn render(board: &Board) -> String {
    let tasks = || board.iter().flat_map(|column| column.tasks.iter());
    let id_width = tasks().map(|t| t.id.len()).max().unwrap_or(2).max(2);
    let title_width = tasks().map(|t| t.title.len()).max().unwrap_or(5).max(5);

    let mut out = String::new();
    for column in board.iter() {
        out.push_str(&format!("{} ({})\n", column.status, column.tasks.len()));
        if column.tasks.is_empty() {
            out.push_str("  (empty)\n\n");
            continue;
        }
        out.push_str(&format!(
            "  {:<id_width$}  {:<title_width$}  {:<8}  {}\n",
            "ID", "TITLE", "PRIORITY", "DUE",
        ));
        for task in &column.tasks {
            out.push_str(&format!(
                "  {:<id_width$}  {:<title_width$}  {:<8}  {}\n",
                task.id,
                task.title,
                task.priority.as_str(),
                task.due_date.format("%Y-%m-%d"),
            ));
        }
        out.push('\n');
    }
    out.push_str(&format!("{} task(s) total.\n", board.len()));
    out
}
