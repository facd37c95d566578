//! Board Workflow Integration Tests
//!
//! End-to-end gesture sequences against a controller: creation, group drag,
//! commits, marquee and deletion.

use crate::helpers::{
    TestBoardBuilder, at, ctrl_at, drag, drag_path, marquee, outbox_summary, pan, position_of,
    selected, z_of,
};
use teamboard::board::{DoubleClickOutcome, PendingWrite};
use teamboard::geometry::{Point, Rect};

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_double_click_inside_project_creates_relative_note() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .build();

    let DoubleClickOutcome::Created(id) = board.double_click(&at(250.0, 250.0)) else {
        panic!("expected a note to be created");
    };

    assert_eq!(position_of(&board, &id), Point::new(150.0, 150.0));
    assert_eq!(
        board.absolute_rect(&id),
        Some(Rect::from_xywh(250.0, 250.0, 200.0, 150.0))
    );
    assert!(id.starts_with("local-"));
    assert!(board.selection().is_empty());
}

#[test]
fn test_double_click_picks_project_under_pointer() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_project("b", (760.0, 100.0))
        .build();

    let DoubleClickOutcome::Created(id) = board.double_click(&at(800.0, 150.0)) else {
        panic!("expected a note to be created");
    };

    let task = board.task(&id).unwrap();
    assert_eq!(task.project_id, "b");
    assert_eq!(task.position(), Point::new(40.0, 50.0));
}

#[test]
fn test_double_click_outside_projects_uses_first_project() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_project("b", (760.0, 100.0))
        .build();

    let DoubleClickOutcome::Created(id) = board.double_click(&at(50.0, 900.0)) else {
        panic!("expected a note to be created");
    };

    let task = board.task(&id).unwrap();
    assert_eq!(task.project_id, "a");
    // Relative position may be negative; absolute still lands on the click
    assert_eq!(task.position(), Point::new(-50.0, 800.0));
    assert_eq!(board.absolute_rect(&id).map(|r| r.origin), Some(Point::new(50.0, 900.0)));
}

#[test]
fn test_double_click_without_projects_does_nothing() {
    let mut board = TestBoardBuilder::new().build();
    assert_eq!(board.double_click(&at(10.0, 10.0)), DoubleClickOutcome::Ignored);
    assert!(board.take_outbox().is_empty());
}

#[test]
fn test_double_click_on_note_starts_editing() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    assert_eq!(
        board.double_click(&at(20.0, 20.0)),
        DoubleClickOutcome::Editing("t1".to_string())
    );
    assert_eq!(board.editing().map(String::as_str), Some("t1"));
    assert!(board.take_outbox().is_empty());
}

#[test]
fn test_created_note_lands_on_top() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note_z("t1", "a", (0.0, 0.0), 9)
        .build();

    let DoubleClickOutcome::Created(id) = board.double_click(&at(400.0, 300.0)) else {
        panic!("expected a note to be created");
    };

    assert_eq!(z_of(&board, &id), 10);
    assert_eq!(
        outbox_summary(&board.take_outbox()),
        vec!["create_task in a at (400, 300) z=Some(10)"]
    );
}

#[test]
fn test_double_click_after_pan_uses_board_coordinates() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_bounds(40.0, 60.0, 1200.0, 800.0)
        .build();
    pan(&mut board, (500.0, 500.0), (400.0, 450.0));

    let DoubleClickOutcome::Created(id) = board.double_click(&at(240.0, 260.0)) else {
        panic!("expected a note to be created");
    };

    // client - bounds origin - pan = (240 - 40 + 100, 260 - 60 + 50)
    assert_eq!(position_of(&board, &id), Point::new(300.0, 250.0));
}

// ============================================================================
// Group drag
// ============================================================================

#[test]
fn test_group_drag_moves_every_selected_note_by_same_delta() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_project("b", (900.0, 100.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (250.0, 0.0))
        .with_note("t3", "b", (0.0, 0.0))
        .with_note("t4", "b", (0.0, 200.0))
        .build();

    board.click(&at(110.0, 110.0));
    board.click(&ctrl_at(360.0, 110.0));
    board.click(&ctrl_at(910.0, 110.0));
    assert_eq!(selected(&board), vec!["t1", "t2", "t3"]);

    let before: Vec<Point> = ["t1", "t2", "t3", "t4"]
        .iter()
        .map(|id| position_of(&board, id))
        .collect();

    drag_path(
        &mut board,
        (120.0, 120.0),
        &[(125.0, 121.0), (140.0, 100.0), (90.0, 180.0), (97.0, 163.0)],
    );

    let delta = Point::new(-23.0, 43.0);
    for (i, id) in ["t1", "t2", "t3"].iter().enumerate() {
        assert_eq!(position_of(&board, id), before[i] + delta, "note {id}");
    }
    assert_eq!(position_of(&board, "t4"), before[3]);
}

#[test]
fn test_drag_of_unselected_note_leaves_selection_alone() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 0.0))
        .build();
    board.click(&at(310.0, 10.0));

    drag(&mut board, (10.0, 10.0), (30.0, 30.0));

    assert_eq!(position_of(&board, "t1"), Point::new(20.0, 20.0));
    assert_eq!(position_of(&board, "t2"), Point::new(300.0, 0.0));
    assert_eq!(selected(&board), vec!["t2"]);
}

#[test]
fn test_positions_are_not_persisted_mid_drag() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&at(10.0, 10.0));
    for step in 1..=20 {
        board.pointer_move(&at(10.0 + step as f32, 10.0));
    }
    assert!(board.pending_writes().is_empty());

    board.pointer_up(&at(30.0, 10.0));
    assert_eq!(
        outbox_summary(&board.take_outbox()),
        vec!["update_task_position t1 (20, 0) z=1"]
    );
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_commit_gives_group_one_fresh_z() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note_z("t1", "a", (0.0, 0.0), 4)
        .with_note_z("t2", "a", (300.0, 0.0), 7)
        .with_note_z("t3", "a", (600.0, 0.0), 2)
        .build();
    let before = board.z_counter().current();
    assert_eq!(before, 7);

    board.click(&at(10.0, 10.0));
    board.click(&ctrl_at(310.0, 10.0));
    drag(&mut board, (10.0, 10.0), (15.0, 15.0));

    assert_eq!(z_of(&board, "t1"), 8);
    assert_eq!(z_of(&board, "t2"), 8);
    assert_eq!(z_of(&board, "t3"), 2);
    assert!(board.z_counter().current() > before);

    let writes = board.take_outbox();
    assert_eq!(writes.len(), 2);
    assert!(writes.iter().all(|w| matches!(
        w,
        PendingWrite::UpdateTaskPosition { patch, .. } if patch.z_index == 8
    )));
}

#[test]
fn test_z_increases_once_per_commit() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 0.0))
        .build();

    drag(&mut board, (10.0, 10.0), (20.0, 20.0));
    drag(&mut board, (310.0, 10.0), (320.0, 20.0));
    drag(&mut board, (30.0, 30.0), (40.0, 40.0));

    assert_eq!(z_of(&board, "t1"), 3);
    assert_eq!(z_of(&board, "t2"), 2);
    assert_eq!(board.z_counter().current(), 3);
}

#[test]
fn test_zero_delta_drag_keeps_positions() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (50.0, 50.0))
        .with_note("t1", "a", (10.0, 10.0))
        .build();

    board.pointer_down(&at(100.0, 100.0));
    board.pointer_up(&at(100.0, 100.0));

    assert_eq!(position_of(&board, "t1"), Point::new(10.0, 10.0));
    // The z bump still happens
    assert_eq!(z_of(&board, "t1"), 1);
}

#[test]
fn test_dragged_note_wins_hit_test_afterwards() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (100.0, 0.0))
        .build();

    // Overlap region belongs to t2 (later in order), until t1 is committed on top
    drag(&mut board, (20.0, 20.0), (20.0, 20.0));
    board.click(&at(150.0, 50.0));
    assert_eq!(selected(&board), vec!["t1"]);
}

// ============================================================================
// Marquee
// ============================================================================

#[test]
fn test_marquee_selects_only_overlapping_note() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 300.0))
        .build();

    marquee(&mut board, (250.0, 200.0), (0.0, 0.0));

    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_marquee_is_order_independent() {
    let build = || {
        TestBoardBuilder::new()
            .with_project("a", (0.0, 0.0))
            .with_note("t1", "a", (0.0, 0.0))
            .with_note("t2", "a", (230.0, -100.0))
            .with_note("t3", "a", (600.0, 600.0))
            .build()
    };
    let mut forward = build();
    let mut backward = build();

    marquee(&mut forward, (-10.0, -10.0), (250.0, 200.0));
    marquee(&mut backward, (250.0, 200.0), (-10.0, -10.0));

    assert_eq!(selected(&forward), vec!["t1", "t2"]);
    assert_eq!(selected(&forward), selected(&backward));
}

#[test]
fn test_marquee_replaces_previous_selection() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (500.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));

    marquee(&mut board, (450.0, 300.0), (520.0, 20.0));

    assert_eq!(selected(&board), vec!["t2"]);
}

#[test]
fn test_marquee_edge_contact_does_not_select() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    // Box starts exactly on the note's right edge
    marquee(&mut board, (300.0, 100.0), (200.0, 400.0));
    assert!(board.selection().is_empty());
}

#[test]
fn test_empty_marquee_clears_selection() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));

    marquee(&mut board, (800.0, 800.0), (900.0, 900.0));
    assert!(board.selection().is_empty());
}

// ============================================================================
// Deletion
// ============================================================================

#[test]
fn test_delete_removes_selection_and_queues_one_delete_each() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 0.0))
        .with_note("t3", "a", (600.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));
    board.click(&ctrl_at(310.0, 10.0));

    let deleted = board.delete_selected();

    assert_eq!(deleted, vec!["t1", "t2"]);
    assert!(board.task("t1").is_none() && board.task("t2").is_none());
    assert!(board.task("t3").is_some());
    assert!(board.selection().is_empty());
    assert_eq!(
        outbox_summary(&board.take_outbox()),
        vec!["delete_task t1", "delete_task t2"]
    );
}

#[test]
fn test_delete_with_empty_selection_is_a_no_op() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    assert!(board.delete_selected().is_empty());
    assert!(board.task("t1").is_some());
    assert!(board.take_outbox().is_empty());
}

#[test]
fn test_deleted_note_is_no_longer_hit() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));
    board.delete_selected();

    board.pointer_down(&at(10.0, 10.0));
    assert!(board.state().is_idle());
}

// ============================================================================
// Projects
// ============================================================================

#[test]
fn test_moving_project_carries_its_notes() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_note("t1", "a", (40.0, 40.0))
        .build();

    board.move_project("a", Point::new(200.0, -50.0));

    assert_eq!(position_of(&board, "t1"), Point::new(40.0, 40.0));
    assert_eq!(
        board.absolute_rect("t1").map(|r| r.origin),
        Some(Point::new(340.0, 90.0))
    );
    assert_eq!(
        outbox_summary(&board.take_outbox()),
        vec!["update_project_position a (300, 50)"]
    );

    board.click(&at(350.0, 100.0));
    assert_eq!(selected(&board), vec!["t1"]);
}

// ============================================================================
// Editing
// ============================================================================

#[test]
fn test_edit_updates_note_and_queues_patch() {
    use teamboard::types::TaskPatch;

    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.begin_edit("t1");

    board.edit_task(
        "t1",
        TaskPatch {
            title: Some("Ship it".into()),
            color: Some("#e0f2fe".into()),
            ..Default::default()
        },
    );

    let task = board.task("t1").unwrap();
    assert_eq!(task.title, "Ship it");
    assert_eq!(task.color.as_deref(), Some("#e0f2fe"));
    assert!(board.editing().is_none());
    assert_eq!(outbox_summary(&board.take_outbox()), vec!["update_task t1"]);
}

#[test]
fn test_empty_edit_queues_nothing() {
    use teamboard::types::TaskPatch;

    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.begin_edit("t1");
    board.edit_task("t1", TaskPatch::default());

    assert!(board.editing().is_none());
    assert!(board.take_outbox().is_empty());
}
