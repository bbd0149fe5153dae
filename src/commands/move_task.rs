//! `taskboard move` command.
//!
//! Replays a drag: the task is picked up, passed over each `--via` target
//! and released over `--over`. A cross-column move is sent to the service;
//! if the service refuses it the board is re-fetched instead of rolled back.

use std::iter;

use crate::board::Board;
use crate::context::ServiceContext;
use crate::drag::{GestureSession, PointerDelta};
use crate::reconcile::{self, AckOutcome, MoveLedger};

use super::board;

/// Result of replaying one drag.
#[derive(Debug)]
pub struct MoveReport {
    /// Board the user should now see.
    pub board: Board,
    /// How the service responded, or `None` if nothing was sent.
    pub outcome: Option<AckOutcome>,
}

/// Execute the `move` command.
///
/// # Errors
///
/// Returns an error string if the board cannot be fetched, an id is
/// unknown, or the re-sync after a refused move fails.
pub async fn run(
    ctx: &ServiceContext,
    task: &str,
    via: &[String],
    over: &str,
    delta: PointerDelta,
) -> Result<(), String> {
    let current = board::fetch(ctx).await?;
    let report = drag(ctx, &current, task, via, over, delta).await?;

    match &report.outcome {
        None => println!("Nothing to report; {task} stayed in its column."),
        Some(AckOutcome::Confirmed | AckOutcome::Superseded) => {
            if let Some(status) = report.board.status_of(task) {
                println!("Moved {task} to {status}.");
            }
        }
        Some(AckOutcome::Resync { reason, .. }) => {
            eprintln!("Move of {task} was not saved: {reason}. Showing the saved board.");
        }
    }
    print!("{}", board::render(&report.board));
    Ok(())
}

/// Replays a drag of `task` over `via` and then `over`, and reconciles the
/// result with the service.
///
/// # Errors
///
/// Returns an error string if `task` or `over` is not on the board, or if
/// the board cannot be re-fetched after a refused move.
pub async fn drag(
    ctx: &ServiceContext,
    current: &Board,
    task: &str,
    via: &[String],
    over: &str,
    delta: PointerDelta,
) -> Result<MoveReport, String> {
    let mut gesture =
        GestureSession::pick_up(current, task).ok_or_else(|| format!("No task with id {task}"))?;
    if current.resolve_target(over).is_none() {
        return Err(format!("No column or task with id {over}"));
    }

    for target in via.iter().map(String::as_str).chain(iter::once(over)) {
        gesture.over(Some(target), delta);
    }
    let commit = gesture.end(Some(over), delta);

    let Some(request) = commit.request else {
        return Ok(MoveReport { board: commit.board, outcome: None });
    };

    let mut ledger = MoveLedger::new();
    let outcome = reconcile::dispatch(ctx.tasks.as_ref(), &mut ledger, &request).await;
    let board = match &outcome {
        AckOutcome::Resync { task_id, .. } => {
            tracing::warn!(task = %task_id, "re-syncing board after refused move");
            let records =
                ctx.tasks.list_tasks().await.map_err(|e| format!("Failed to re-sync: {e}"))?;
            ledger.resync(records).map_err(|e| format!("Failed to re-sync: {e}"))?
        }
        AckOutcome::Confirmed | AckOutcome::Superseded => commit.board,
    };
    Ok(MoveReport { board, outcome: Some(outcome) })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::adapters::memory::MemoryTaskService;
    use crate::board::tests::{ids, record};
    use crate::board::Status;
    use crate::context::tests::memory_context;
    use crate::drag::RemoteMoveRequest;
    use crate::session::tests::sample_session;

    fn service() -> Arc<MemoryTaskService> {
        Arc::new(MemoryTaskService::with_tasks(vec![
            record("t1", Status::Pending),
            record("t2", Status::Pending),
            record("t7", Status::Done),
            record("t8", Status::Done),
            record("t9", Status::Done),
        ]))
    }

    #[tokio::test]
    async fn cross_column_drop_is_sent_once() {
        let service = service();
        let ctx = memory_context(Arc::clone(&service), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let report =
            drag(&ctx, &current, "t1", &[], "DONE", PointerDelta::default()).await.unwrap();

        assert_eq!(report.outcome, Some(AckOutcome::Confirmed));
        assert_eq!(ids(&report.board, Status::Done), vec!["t7", "t8", "t9", "t1"]);
        assert_eq!(
            service.moves(),
            vec![RemoteMoveRequest { task_id: "t1".into(), new_status: Status::Done }]
        );
    }

    #[tokio::test]
    async fn reorder_within_column_reports_same_column() {
        let service = service();
        let ctx = memory_context(Arc::clone(&service), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let report =
            drag(&ctx, &current, "t9", &[], "t7", PointerDelta::default()).await.unwrap();

        assert_eq!(report.outcome, Some(AckOutcome::Confirmed));
        assert_eq!(ids(&report.board, Status::Done), vec!["t9", "t7", "t8"]);
        assert_eq!(
            service.moves(),
            vec![RemoteMoveRequest { task_id: "t9".into(), new_status: Status::Done }]
        );
    }

    #[tokio::test]
    async fn downward_drop_on_last_card_is_reordered_on_release() {
        let ctx = memory_context(service(), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let report =
            drag(&ctx, &current, "t1", &[], "t9", PointerDelta::down()).await.unwrap();

        assert_eq!(ids(&report.board, Status::Done), vec!["t7", "t8", "t1", "t9"]);
    }

    #[tokio::test]
    async fn round_trip_back_to_origin_sends_nothing() {
        let service = service();
        let ctx = memory_context(Arc::clone(&service), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let via = vec!["DONE".to_string()];
        let report =
            drag(&ctx, &current, "t1", &via, "PENDING", PointerDelta::default()).await.unwrap();

        assert!(report.outcome.is_none());
        assert_eq!(report.board.status_of("t1"), Some(Status::Pending));
        assert!(service.moves().is_empty());
    }

    #[tokio::test]
    async fn refused_move_resyncs_from_service() {
        let service = service();
        service.fail_moves_for("t1");
        let ctx = memory_context(Arc::clone(&service), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let report = drag(&ctx, &current, "t1", &[], "DONE", PointerDelta::default())
            .await
            .unwrap();

        assert!(matches!(report.outcome, Some(AckOutcome::Resync { .. })));
        assert_eq!(report.board.status_of("t1"), Some(Status::Pending));
        assert_eq!(ids(&report.board, Status::Pending), vec!["t1", "t2"]);
    }

    #[tokio::test]
    async fn unknown_ids_are_errors() {
        let ctx = memory_context(service(), Some(sample_session()));
        let current = board::fetch(&ctx).await.unwrap();

        let err = drag(&ctx, &current, "nope", &[], "DONE", PointerDelta::default())
            .await
            .unwrap_err();
        assert!(err.contains("nope"));

        let err = drag(&ctx, &current, "t1", &[], "nowhere", PointerDelta::default())
            .await
            .unwrap_err();
        assert!(err.contains("nowhere"));
    }

    #[tokio::test]
    async fn run_prints_after_move() {
        let ctx = memory_context(service(), Some(sample_session()));
        assert!(run(&ctx, "t2", &[], "DONE", PointerDelta::default()).await.is_ok());
    }
}
