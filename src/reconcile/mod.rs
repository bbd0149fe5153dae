//! Reconciling optimistic moves with the task service.
//!
//! The board is updated before the service hears about a move. The
//! [`MoveLedger`] numbers each outgoing [`RemoteMoveRequest`] so that
//! acknowledgements arriving out of order cannot undo a newer move, and
//! tells the host to re-sync from the service when the latest move for a
//! task fails. The optimistic board is never rolled back piecemeal.

use std::collections::HashMap;

use crate::board::{Board, LoadError, Status, TaskRecord};
use crate::drag::RemoteMoveRequest;
use crate::error::ApiError;
use crate::ports::TaskApi;

/// Receipt for one dispatched move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveTicket {
    /// Task the move belongs to.
    pub task_id: String,
    /// Position in the ledger's global sequence.
    pub seq: u64,
}

/// What settling a ticket means for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AckOutcome {
    /// The service now agrees with the board.
    Confirmed,
    /// A newer move for the same task is outstanding; this result is stale.
    Superseded,
    /// The latest move for the task failed; re-fetch and rebuild the board.
    Resync {
        /// Task whose move failed.
        task_id: String,
        /// Why the move failed.
        reason: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    seq: u64,
    status: Status,
}

/// Tracks outstanding and confirmed moves per task.
#[derive(Debug, Default)]
pub struct MoveLedger {
    next_seq: u64,
    in_flight: HashMap<String, InFlight>,
    confirmed: HashMap<String, Status>,
}

impl MoveLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a request about to be sent and returns its ticket.
    pub fn issue(&mut self, request: &RemoteMoveRequest) -> MoveTicket {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.in_flight
            .insert(request.task_id.clone(), InFlight { seq, status: request.new_status });
        tracing::debug!(task = %request.task_id, seq, status = %request.new_status, "move issued");
        MoveTicket { task_id: request.task_id.clone(), seq }
    }

    /// Settles a ticket whose request the service accepted.
    pub fn acknowledge(&mut self, ticket: &MoveTicket) -> AckOutcome {
        let Some(latest) = self.latest(ticket) else {
            tracing::debug!(task = %ticket.task_id, seq = ticket.seq, "stale acknowledgement ignored");
            return AckOutcome::Superseded;
        };
        self.in_flight.remove(&ticket.task_id);
        self.confirmed.insert(ticket.task_id.clone(), latest.status);
        tracing::debug!(task = %ticket.task_id, seq = ticket.seq, "move confirmed");
        AckOutcome::Confirmed
    }

    /// Settles a ticket whose request failed.
    pub fn fail(&mut self, ticket: &MoveTicket, error: &ApiError) -> AckOutcome {
        if self.latest(ticket).is_none() {
            tracing::debug!(task = %ticket.task_id, seq = ticket.seq, "stale failure ignored");
            return AckOutcome::Superseded;
        }
        self.in_flight.remove(&ticket.task_id);
        AckOutcome::Resync { task_id: ticket.task_id.clone(), reason: error.to_string() }
    }

    /// Column the service last confirmed for `task_id`.
    #[must_use]
    pub fn confirmed_status(&self, task_id: &str) -> Option<Status> {
        self.confirmed.get(task_id).copied()
    }

    /// Moves still waiting for an answer, as `(task id, column)`.
    pub fn in_flight(&self) -> impl Iterator<Item = (&str, Status)> {
        self.in_flight.iter().map(|(task_id, entry)| (task_id.as_str(), entry.status))
    }

    /// Rebuilds the board from a fresh fetch, keeping moves still in flight.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the fetched list is malformed.
    pub fn resync(&self, records: Vec<TaskRecord>) -> Result<Board, LoadError> {
        let mut board = Board::load(records)?;
        let mut pending: Vec<(&String, &InFlight)> = self.in_flight.iter().collect();
        pending.sort_by_key(|(_, entry)| entry.seq);
        for (task_id, entry) in pending {
            board.relocate(task_id, entry.status);
        }
        tracing::debug!(tasks = board.len(), kept = self.in_flight.len(), "board re-synced");
        Ok(board)
    }

    fn latest(&self, ticket: &MoveTicket) -> Option<InFlight> {
        self.in_flight.get(&ticket.task_id).copied().filter(|entry| entry.seq == ticket.seq)
    }
}

/// Sends a move to the service and settles it in the ledger.
pub async fn dispatch(
    api: &dyn TaskApi,
    ledger: &mut MoveLedger,
    request: &RemoteMoveRequest,
) -> AckOutcome {
    let ticket = ledger.issue(request);
    match api.move_task(request).await {
        Ok(()) => ledger.acknowledge(&ticket),
        Err(e) => {
            tracing::warn!(task = %request.task_id, error = %e, "remote move failed");
            ledger.fail(&ticket, &e)
        }
    }
}
