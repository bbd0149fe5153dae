//! Per-gesture state machine.

use crate::board::{Board, DragTarget, Status};

use super::{on_end, on_over, Commit, DragGesture, PointerDelta, RemoteMoveRequest};

/// One drag interaction, from pick-up to release or cancel.
///
/// Holds the board as it was at pick-up so a cancelled gesture can be
/// discarded, and the origin column so a task released in a different
/// column is always reported even when the release itself reorders nothing.
#[derive(Debug, Clone)]
pub struct GestureSession {
    active_id: String,
    origin: Status,
    snapshot: Board,
    preview: Board,
}

impl GestureSession {
    /// Picks up a task. Returns `None` if `active_id` is not a task on `board`.
    #[must_use]
    pub fn pick_up(board: &Board, active_id: &str) -> Option<Self> {
        let DragTarget::Task { column, .. } = board.resolve_target(active_id)? else {
            return None;
        };
        tracing::debug!(task = active_id, origin = %column, "gesture started");
        Some(Self {
            active_id: active_id.to_string(),
            origin: column,
            snapshot: board.clone(),
            preview: board.clone(),
        })
    }

    /// Id of the dragged task.
    #[must_use]
    pub fn active_id(&self) -> &str {
        &self.active_id
    }

    /// Column the task was picked up from.
    #[must_use]
    pub fn origin(&self) -> Status {
        self.origin
    }

    /// Current live preview.
    #[must_use]
    pub fn preview(&self) -> &Board {
        &self.preview
    }

    /// Feeds an "over" event and returns the updated preview.
    pub fn over(&mut self, over_id: Option<&str>, delta: PointerDelta) -> &Board {
        let gesture = DragGesture::over(self.active_id.as_str(), over_id, delta);
        self.preview = on_over(&self.preview, &gesture);
        &self.preview
    }

    /// Releases the task and ends the gesture.
    #[must_use]
    pub fn end(self, over_id: Option<&str>, delta: PointerDelta) -> Commit {
        let gesture = DragGesture::end(self.active_id.as_str(), over_id, delta);
        let mut commit = on_end(&self.preview, &gesture);
        if commit.request.is_none() {
            match commit.board.status_of(&self.active_id) {
                Some(column) if column != self.origin => {
                    commit.request =
                        Some(RemoteMoveRequest { task_id: self.active_id, new_status: column });
                }
                _ => {}
            }
        }
        if let Some(request) = &commit.request {
            tracing::debug!(task = %request.task_id, status = %request.new_status, "gesture committed");
        }
        commit
    }

    /// Abandons the gesture and returns the board as it was at pick-up.
    #[must_use]
    pub fn cancel(self) -> Board {
        tracing::debug!(task = %self.active_id, "gesture cancelled");
        self.snapshot
    }
}
