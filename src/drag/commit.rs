//! Commit step run when a card is released.

use serde::{Deserialize, Serialize};

use crate::board::{Board, Status};

use super::DragGesture;

/// Request to tell the task service where a task now lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteMoveRequest {
    /// Task that moved.
    pub task_id: String,
    /// Column the task ended in.
    pub new_status: Status,
}

/// Outcome of releasing a card.
#[derive(Debug, Clone, PartialEq)]
pub struct Commit {
    /// Board after the release.
    pub board: Board,
    /// Request to send, or `None` when nothing needs reporting.
    pub request: Option<RemoteMoveRequest>,
}

impl Commit {
    fn unchanged(board: &Board) -> Self {
        Self { board: board.clone(), request: None }
    }
}

/// Finalises a gesture.
///
/// Only reorders within a single column are applied here; cross-column
/// moves were already made by the last preview. Releasing over the column
/// itself counts as releasing over its last card.
#[must_use]
pub fn on_end(board: &Board, gesture: &DragGesture) -> Commit {
    let Some(over_id) = gesture.over_id.as_deref() else {
        return Commit::unchanged(board);
    };
    let (Some(active), Some(over)) =
        (board.resolve_target(&gesture.active_id), board.resolve_target(over_id))
    else {
        return Commit::unchanged(board);
    };
    let column = active.column();
    if column != over.column() {
        return Commit::unchanged(board);
    }

    let Some(active_index) = active.index() else {
        return Commit::unchanged(board);
    };
    let over_index = over
        .index()
        .unwrap_or_else(|| board.column(column).len().saturating_sub(1));
    if active_index == over_index {
        return Commit::unchanged(board);
    }

    let mut next = board.clone();
    next.reorder(column, active_index, over_index);
    tracing::debug!(task = %gesture.active_id, %column, active_index, over_index, "commit reordered");

    Commit {
        board: next,
        request: Some(RemoteMoveRequest {
            task_id: gesture.active_id.clone(),
            new_status: column,
        }),
    }
}
