//! Drag scenarios exercised through the public API.

use chrono::NaiveDate;
use taskboard::board::{Board, Priority, Status, TaskRecord};
use taskboard::drag::{apply, on_end, on_over, DragGesture, PointerDelta, RemoteMoveRequest, Step};

fn record(id: &str, status: Status) -> TaskRecord {
    TaskRecord {
        id: id.to_string(),
        title: format!("Task {id}"),
        description: String::new(),
        priority: Priority::Low,
        status,
        due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
    }
}

fn ids(board: &Board, status: Status) -> Vec<String> {
    board.column(status).iter().map(|task| task.id.clone()).collect()
}

fn assert_each_task_once(board: &Board, expected: usize) {
    let mut all: Vec<String> = Status::ALL.iter().flat_map(|s| ids(board, *s)).collect();
    assert_eq!(all.len(), expected);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), expected, "a task appears in more than one place");
}

fn abc() -> Board {
    Board::load(["A", "B", "C"].map(|id| record(id, Status::Pending))).unwrap()
}

#[test]
fn drag_to_empty_column_then_release_there() {
    let board = abc();

    let over = on_over(&board, &DragGesture::over("A", Some("INPROGRESS"), PointerDelta::default()));
    assert_eq!(ids(&over, Status::Pending), ["B", "C"]);
    assert_eq!(ids(&over, Status::InProgress), ["A"]);
    assert!(ids(&over, Status::Done).is_empty());

    let commit = on_end(&over, &DragGesture::end("A", Some("INPROGRESS"), PointerDelta::default()));
    assert_eq!(commit.board, over);
    assert!(commit.request.is_none());
    assert_each_task_once(&commit.board, 3);
}

#[test]
fn reorder_down_onto_last_card() {
    let board = abc();
    let down = PointerDelta::down();

    let over = on_over(&board, &DragGesture::over("B", Some("C"), down));
    assert_eq!(over, board);

    let commit = on_end(&over, &DragGesture::end("B", Some("C"), down));
    assert_eq!(ids(&commit.board, Status::Pending), ["A", "C", "B"]);
    assert_eq!(
        commit.request,
        Some(RemoteMoveRequest { task_id: "B".into(), new_status: Status::Pending })
    );
}

#[test]
fn unknown_hover_target_is_ignored() {
    let board = abc();
    assert!(board.resolve_column("nonexistent-id").is_none());

    let over = on_over(&board, &DragGesture::over("A", Some("nonexistent-id"), PointerDelta::down()));
    assert_eq!(over, board);
}

#[test]
fn repeated_over_event_is_idempotent() {
    let board = Board::load(vec![
        record("A", Status::Pending),
        record("X", Status::Done),
        record("Y", Status::Done),
    ])
    .unwrap();
    let gesture = DragGesture::over("A", Some("Y"), PointerDelta::down());

    let once = on_over(&board, &gesture);
    let twice = on_over(&once, &gesture);

    assert_eq!(once, twice);
    assert_eq!(ids(&once, Status::Done), ["X", "Y", "A"]);
    assert_each_task_once(&twice, 3);
}

#[test]
fn release_in_place_changes_nothing() {
    let board = abc();
    let commit = on_end(&board, &DragGesture::end("B", Some("B"), PointerDelta::default()));
    assert_eq!(commit.board, board);
    assert!(commit.request.is_none());
}

#[test]
fn moving_up_keeps_other_cards_in_order() {
    let board =
        Board::load(["A", "B", "C", "D", "E"].map(|id| record(id, Status::Done))).unwrap();

    let commit = on_end(&board, &DragGesture::end("C", Some("A"), PointerDelta::default()));

    assert_eq!(ids(&commit.board, Status::Done), ["C", "A", "B", "D", "E"]);
}

#[test]
fn apply_routes_by_phase() {
    let board = abc();

    let Step::Preview(preview) =
        apply(&board, &DragGesture::over("A", Some("DONE"), PointerDelta::default()))
    else {
        panic!("over event should preview");
    };
    assert_eq!(ids(&preview, Status::Done), ["A"]);

    let Step::Commit(commit) =
        apply(&board, &DragGesture::end("C", Some("A"), PointerDelta::default()))
    else {
        panic!("end event should commit");
    };
    assert_eq!(ids(&commit.board, Status::Pending), ["C", "A", "B"]);
}

#[test]
fn inserted_task_goes_on_top() {
    let board = abc().insert(record("N", Status::Pending));
    assert_eq!(ids(&board, Status::Pending), ["N", "A", "B", "C"]);
    assert_each_task_once(&board, 4);
}

fn mixed() -> Board {
    Board::load(vec![
        record("A", Status::Pending),
        record("B", Status::Pending),
        record("C", Status::Pending),
        record("D", Status::InProgress),
        record("E", Status::Done),
        record("F", Status::Done),
    ])
    .unwrap()
}

#[test]
fn every_gesture_keeps_each_task_once() {
    let board = mixed();
    let tasks = ["A", "B", "C", "D", "E", "F"];
    let mut targets: Vec<Option<&str>> = tasks.iter().copied().map(Some).collect();
    targets.extend(Status::ALL.iter().map(|s| Some(s.as_str())));
    targets.push(Some("missing"));
    targets.push(None);

    for active in tasks {
        for over_id in &targets {
            for delta in [PointerDelta::default(), PointerDelta::down()] {
                let gesture = DragGesture::over(active, *over_id, delta);
                let over = on_over(&board, &gesture);
                assert_each_task_once(&over, tasks.len());
                assert_eq!(on_over(&over, &gesture), over, "{active} over {over_id:?} moved twice");

                let commit = on_end(&over, &DragGesture::end(active, *over_id, delta));
                assert_each_task_once(&commit.board, tasks.len());
                if let Some(request) = &commit.request {
                    assert_eq!(request.task_id, active);
                    assert_eq!(commit.board.status_of(active), Some(request.new_status));
                }
            }
        }
    }
}

#[test]
fn every_insert_keeps_each_task_once() {
    for status in Status::ALL {
        for id in ["A", "D", "F"] {
            let board = mixed().insert(record(id, status));
            assert_each_task_once(&board, 6);
            assert_eq!(board.status_of(id), Some(status));
            assert_eq!(ids(&board, status)[0], id);
        }
        let board = mixed().insert(record("N", status));
        assert_each_task_once(&board, 7);
    }
}
