//! Gesture mode selection, panning and pointer-leave handling.

use crate::helpers::{
    TestBoardBuilder, alt_at, at, drag, marquee, middle_at, pan, position_of, selected, shift_at,
    z_of,
};
use teamboard::geometry::{Point, Rect};
use teamboard::input::PointerButton;

// ============================================================================
// Pan
// ============================================================================

#[test]
fn test_middle_drag_pans_without_moving_notes() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    // Starting on a note still pans
    pan(&mut board, (150.0, 150.0), (180.0, 120.0));

    assert_eq!(board.pan_offset(), Point::new(30.0, -30.0));
    assert_eq!(position_of(&board, "t1"), Point::ZERO);
    assert!(board.take_outbox().is_empty());
}

#[test]
fn test_alt_drag_pans_even_on_a_note() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&alt_at(10.0, 10.0));
    assert!(board.state().is_panning());
    board.pointer_move(&alt_at(60.0, 30.0));
    board.pointer_move(&alt_at(70.0, 50.0));
    board.pointer_up(&alt_at(70.0, 50.0));

    assert_eq!(board.pan_offset(), Point::new(60.0, 40.0));
    assert_eq!(position_of(&board, "t1"), Point::ZERO);
    assert_eq!(z_of(&board, "t1"), 0);
}

#[test]
fn test_pan_shifts_rendered_notes_and_hit_testing() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (100.0, 100.0))
        .with_note("t1", "a", (20.0, 30.0))
        .build();

    pan(&mut board, (800.0, 800.0), (750.0, 820.0));

    let view = board.render();
    assert_eq!(view.pan_offset, Point::new(-50.0, 20.0));
    assert_eq!(view.notes[0].rect, Rect::from_xywh(70.0, 150.0, 200.0, 150.0));
    // Absolute geometry is unaffected by pan
    assert_eq!(
        board.absolute_rect("t1"),
        Some(Rect::from_xywh(120.0, 130.0, 200.0, 150.0))
    );

    // The note is now hit where it is drawn
    board.click(&at(75.0, 155.0));
    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_pans_accumulate() {
    let mut board = TestBoardBuilder::new().build();
    pan(&mut board, (0.0, 0.0), (10.0, 10.0));
    pan(&mut board, (0.0, 0.0), (-25.0, 5.0));
    assert_eq!(board.pan_offset(), Point::new(-15.0, 15.0));
}

#[test]
fn test_grid_moves_with_pan() {
    let mut board = TestBoardBuilder::new()
        .with_bounds(0.0, 0.0, 100.0, 50.0)
        .build();
    pan(&mut board, (0.0, 0.0), (-30.0, 15.0));

    let grid = board.render().grid;
    assert_eq!(grid.vertical, vec![10.0, 50.0, 90.0]);
    assert_eq!(grid.horizontal, vec![15.0]);
}

// ============================================================================
// Mode selection
// ============================================================================

#[test]
fn test_shift_press_on_note_starts_nothing() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&shift_at(10.0, 10.0));
    assert!(board.state().is_idle());
    board.pointer_move(&shift_at(90.0, 90.0));
    board.pointer_up(&shift_at(90.0, 90.0));

    assert_eq!(position_of(&board, "t1"), Point::ZERO);
    assert!(board.take_outbox().is_empty());
}

#[test]
fn test_plain_press_on_empty_canvas_starts_nothing() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));

    board.pointer_down(&at(900.0, 900.0));
    assert!(board.state().is_idle());
    board.pointer_up(&at(900.0, 900.0));

    // Selection is untouched by presses on empty canvas
    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_secondary_button_starts_nothing() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.pointer_down(&at(10.0, 10.0).with_button(PointerButton::Secondary));
    assert!(board.state().is_idle());
}

#[test]
fn test_second_press_during_gesture_is_ignored() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&middle_at(500.0, 500.0));
    board.pointer_down(&at(10.0, 10.0));
    assert!(board.state().is_panning());
    board.pointer_up(&middle_at(500.0, 500.0));
    assert!(board.state().is_idle());
}

// ============================================================================
// Marquee
// ============================================================================

#[test]
fn test_marquee_renders_in_screen_space() {
    let mut board = TestBoardBuilder::new().build();
    pan(&mut board, (0.0, 0.0), (10.0, 20.0));

    board.pointer_down(&shift_at(100.0, 100.0));
    board.pointer_move(&shift_at(40.0, 160.0));

    let view = board.render();
    assert_eq!(view.marquee, Some(Rect::from_xywh(40.0, 100.0, 60.0, 60.0)));
    assert!(board.state().is_marquee_selecting());

    board.pointer_up(&shift_at(40.0, 160.0));
    assert!(board.render().marquee.is_none());
}

#[test]
fn test_marquee_after_pan_uses_board_coordinates() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (400.0, 0.0))
        .build();
    pan(&mut board, (0.0, 0.0), (-400.0, 0.0));

    // t2 is drawn at x 0..200 now
    marquee(&mut board, (250.0, 200.0), (100.0, 100.0));
    assert_eq!(selected(&board), vec!["t2"]);
}

#[test]
fn test_pointer_leave_finalizes_marquee() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&shift_at(300.0, 300.0));
    board.pointer_move(&shift_at(100.0, 100.0));
    board.pointer_leave();

    assert!(board.state().is_idle());
    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_pointer_leave_ends_pan() {
    let mut board = TestBoardBuilder::new().build();
    board.pointer_down(&middle_at(0.0, 0.0));
    board.pointer_move(&middle_at(5.0, 5.0));
    board.pointer_leave();

    assert!(board.state().is_idle());
    board.pointer_move(&middle_at(50.0, 50.0));
    assert_eq!(board.pan_offset(), Point::new(5.0, 5.0));
}

// ============================================================================
// Drag across the canvas edge
// ============================================================================

#[test]
fn test_drag_survives_pointer_leave() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&at(10.0, 10.0));
    board.pointer_move(&at(-40.0, 10.0));
    board.pointer_leave();
    board.pointer_move(&at(-60.0, 30.0));
    board.pointer_up(&at(-60.0, 30.0));

    assert_eq!(position_of(&board, "t1"), Point::new(-70.0, 20.0));
    assert_eq!(board.take_outbox().len(), 1);
}

#[test]
fn test_fast_drag_keeps_moving_after_leaving_note() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    // First sample lands far outside the note's rectangle
    drag(&mut board, (10.0, 10.0), (610.0, 410.0));
    assert_eq!(position_of(&board, "t1"), Point::new(600.0, 400.0));
}

#[test]
fn test_second_pointer_release_does_not_end_drag() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    board.pointer_down(&at(10.0, 10.0));
    board.pointer_move(&at(30.0, 10.0));
    board.pointer_up(&at(500.0, 500.0).with_pointer_id(2));

    assert!(board.state().is_item_drag());
    assert!(board.take_outbox().is_empty());

    board.pointer_move(&at(50.0, 20.0));
    board.pointer_up(&at(50.0, 20.0));

    assert!(board.state().is_idle());
    assert_eq!(position_of(&board, "t1"), Point::new(40.0, 10.0));
    assert_eq!(board.take_outbox().len(), 1);
}

// ============================================================================
// Clicks
// ============================================================================

#[test]
fn test_click_after_real_drag_does_not_change_selection() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 0.0))
        .build();
    board.click(&at(310.0, 10.0));

    drag(&mut board, (10.0, 10.0), (50.0, 10.0));
    board.click(&at(50.0, 10.0));

    assert_eq!(selected(&board), vec!["t2"]);
}

#[test]
fn test_jitter_press_still_clicks() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();

    drag(&mut board, (10.0, 10.0), (11.0, 10.0));
    board.click(&at(11.0, 10.0));

    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_alt_click_is_ignored() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.click(&alt_at(10.0, 10.0));
    assert!(board.selection().is_empty());
}

#[test]
fn test_click_on_empty_canvas_keeps_selection() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .build();
    board.click(&at(10.0, 10.0));
    board.click(&at(900.0, 900.0));
    assert_eq!(selected(&board), vec!["t1"]);
}

#[test]
fn test_render_flags_selected_notes() {
    let mut board = TestBoardBuilder::new()
        .with_project("a", (0.0, 0.0))
        .with_note("t1", "a", (0.0, 0.0))
        .with_note("t2", "a", (300.0, 0.0))
        .build();
    board.click(&shift_at(310.0, 10.0));

    let flags: Vec<(String, bool)> = board
        .render()
        .notes
        .into_iter()
        .map(|n| (n.id, n.selected))
        .collect();
    assert_eq!(
        flags,
        vec![("t1".to_string(), false), ("t2".to_string(), true)]
    );
}
