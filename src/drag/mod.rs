//! Drag reconciliation engine.
//!
//! A gesture is a run of "over" events followed by exactly one "end" event.
//! [`on_over`] turns each "over" into a live preview that only handles
//! cross-column movement. [`on_end`] finalises reordering within a column and
//! yields the [`RemoteMoveRequest`] to send. Both are pure: they take a board
//! by reference and return a new one. Unresolvable ids and no-op reorders are
//! routine and come back as an unchanged board with no request.
//!
//! [`GestureSession`] wraps the two steps with pick-up and cancel, and makes
//! sure a task that ended up in a different column is always reported.

pub mod commit;
pub mod gesture;
pub mod preview;

pub use commit::{on_end, Commit, RemoteMoveRequest};
pub use gesture::GestureSession;
pub use preview::on_over;

use crate::board::Board;

/// Pointer movement since the gesture started.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerDelta {
    /// Horizontal movement.
    pub x: f64,
    /// Vertical movement; positive means downward.
    pub y: f64,
}

impl PointerDelta {
    /// Movement straight down.
    #[must_use]
    pub fn down() -> Self {
        Self { x: 0.0, y: 1.0 }
    }

    /// Returns `true` when the pointer moved downward.
    #[must_use]
    pub fn is_downward(&self) -> bool {
        self.y > 0.0
    }
}

/// Which half of the gesture an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GesturePhase {
    /// The pointer is still moving.
    Over,
    /// The item was released.
    End,
}

/// A single drag event.
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    /// Id of the task being dragged.
    pub active_id: String,
    /// Id of the column or task under the pointer, if any.
    pub over_id: Option<String>,
    /// Pointer movement.
    pub delta: PointerDelta,
    /// Event kind.
    pub phase: GesturePhase,
}

impl DragGesture {
    /// An in-progress event.
    pub fn over(active_id: impl Into<String>, over_id: Option<&str>, delta: PointerDelta) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(str::to_string),
            delta,
            phase: GesturePhase::Over,
        }
    }

    /// A release event.
    pub fn end(active_id: impl Into<String>, over_id: Option<&str>, delta: PointerDelta) -> Self {
        Self {
            active_id: active_id.into(),
            over_id: over_id.map(str::to_string),
            delta,
            phase: GesturePhase::End,
        }
    }
}

/// Result of feeding one event to [`apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// New live preview.
    Preview(Board),
    /// Final board and the request to send, if any.
    Commit(Commit),
}

/// Routes an event to [`on_over`] or [`on_end`] by its phase.
#[must_use]
pub fn apply(board: &Board, gesture: &DragGesture) -> Step {
    match gesture.phase {
        GesturePhase::Over => Step::Preview(on_over(board, gesture)),
        GesturePhase::End => Step::Commit(on_end(board, gesture)),
    }
}
