//! Drag targets resolved against a board.

use super::task::Status;

/// What a raw drag id refers to on a particular board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    /// A column itself (an empty area or the column header).
    Column(Status),
    /// A task card inside a column.
    Task {
        /// Column holding the task.
        column: Status,
        /// The task id.
        task_id: String,
        /// Position of the task within its column.
        index: usize,
    },
}

impl DragTarget {
    /// Column this target lives in.
    #[must_use]
    pub fn column(&self) -> Status {
        match self {
            DragTarget::Column(status) => *status,
            DragTarget::Task { column, .. } => *column,
        }
    }

    /// Position within the column, or `None` for a column-level target.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            DragTarget::Column(_) => None,
            DragTarget::Task { index, .. } => Some(*index),
        }
    }
}
