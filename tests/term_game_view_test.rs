use classic_tetris::core::{ActiveSnapshot, GameSnapshot, GameState};
use classic_tetris::term::{AnchorY, FrameBuffer, GameView, Rgb, Viewport, CONTROLS};
use classic_tetris::types::{PieceKind, Rotation};

fn screen_text(fb: &FrameBuffer) -> String {
    let mut all = String::new();
    for y in 0..fb.height() {
        all.push_str(&fb.row_text(y));
        all.push('\n');
    }
    all
}

fn empty_snapshot() -> GameSnapshot {
    let mut snap = GameState::new(1).snapshot();
    snap.active = None;
    snap.ghost_y = None;
    snap
}

#[test]
fn term_view_renders_border_corners() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1: 20x20 board plus border => 22x22.
    let fb = view.render(&snap, Viewport::new(22, 22));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide_in_piece_colour() {
    let mut snap = empty_snapshot();
    snap.board[19][0] = 1; // I

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Inside border: (1,1) origin.
    let (x0, y0) = (1, 1 + 19);
    for x in [x0, x0 + 1] {
        let cell = fb.get(x, y0).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::from(PieceKind::I.color()));
    }
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_draws_active_piece_and_ghost() {
    let mut snap = empty_snapshot();
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: 3,
        y: 0,
    });
    snap.ghost_y = Some(18);

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Board column 3 starts at terminal column 1 + 3*2.
    assert_eq!(fb.get(7, 1).unwrap().ch, '█');
    assert_eq!(fb.get(7, 2).unwrap().ch, '█');
    assert_eq!(fb.get(7, 19).unwrap().ch, '░');
    assert_eq!(fb.get(10, 20).unwrap().ch, '░');
    assert_eq!(fb.get(7, 3).unwrap().ch, '·');
}

#[test]
fn term_view_skips_rows_above_the_grid() {
    let mut snap = empty_snapshot();
    snap.active = Some(ActiveSnapshot {
        kind: PieceKind::O,
        rotation: Rotation::North,
        x: 0,
        y: -1,
    });

    let fb = GameView::default().render(&snap, Viewport::new(22, 22));

    // Only the lower half of the O is visible, in board row 0.
    assert_eq!(fb.get(1, 1).unwrap().ch, '█');
    assert_eq!(fb.get(1, 2).unwrap().ch, '·');
    assert_eq!(fb.get(1, 0).unwrap().ch, '─');
}

#[test]
fn term_view_draws_sidebar_when_wide_enough() {
    let mut snap = GameState::new(1).snapshot();
    snap.score = 1234;
    snap.level = 2;
    snap.lines = 10;
    snap.hold = Some(PieceKind::T);

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);

    for label in ["HOLD", "NEXT", "SCORE", "LEVEL", "LINES"] {
        assert!(all.contains(label), "missing {label}");
    }
    assert!(all.contains("1234"));
    for line in CONTROLS {
        assert!(all.contains(line), "missing {line}");
    }
}

#[test]
fn term_view_hides_sidebar_in_narrow_viewport() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(30, 22));
    assert!(!screen_text(&fb).contains("SCORE"));
}

#[test]
fn term_view_shows_game_over_overlay() {
    let mut snap = GameState::new(1).snapshot();
    snap.game_over = true;
    snap.score = 5120;

    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    let all = screen_text(&fb);

    assert!(all.contains("GAME OVER"));
    assert!(all.contains("Score: 5120"));
    assert!(all.contains("Press R to restart"));
}

#[test]
fn term_view_has_no_overlay_while_playing() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(60, 24));
    assert!(!screen_text(&fb).contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = GameState::new(1).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(22, 30));

    // start_y = (30 - 22) / 2 = 4 => top-left corner at (0,4).
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);

    let fb = view.render(&snap, Viewport::new(22, 30));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_render_into_reuses_buffer_across_sizes() {
    let snap = GameState::new(1).snapshot();
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);

    view.render_into(&snap, Viewport::new(40, 24), &mut fb);
    assert_eq!((fb.width(), fb.height()), (40, 24));
    view.render_into(&snap, Viewport::new(22, 22), &mut fb);
    assert_eq!(fb, view.render(&snap, Viewport::new(22, 22)));
}
