//! Live preview while a card is dragged across columns.

use crate::board::{Board, DragTarget};

use super::DragGesture;

/// Computes the preview board for an "over" event.
///
/// Only cross-column movement is previewed. Hovering the last card while
/// moving down inserts after it; hovering a column inserts at the bottom.
#[must_use]
pub fn on_over(board: &Board, gesture: &DragGesture) -> Board {
    let Some(over_id) = gesture.over_id.as_deref() else {
        return board.clone();
    };
    let (Some(active), Some(over)) =
        (board.resolve_target(&gesture.active_id), board.resolve_target(over_id))
    else {
        return board.clone();
    };
    let (from, to) = (active.column(), over.column());
    if from == to {
        return board.clone();
    }

    let len = board.column(to).len();
    let index = match over {
        DragTarget::Task { index, .. } if index + 1 == len && gesture.delta.is_downward() => {
            index + 1
        }
        DragTarget::Task { index, .. } => index,
        // Clamped on insert, so empty space always lands last.
        DragTarget::Column(_) => len + 1,
    };

    let mut next = board.clone();
    if next.transfer(&gesture.active_id, from, to, index) {
        tracing::trace!(task = %gesture.active_id, %from, %to, index, "preview moved task");
    }
    next
}
