//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout: the bordered playfield, and to its right a sidebar with the HOLD
//! and NEXT previews, the SCORE/LEVEL/LINES counters and a controls legend.

use crate::core::{get_shape, get_spawn_shape, piece_from_cell, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const LIGHT_GRAY: Rgb = Rgb::new(170, 170, 170);

/// Sidebar controls legend, top to bottom.
pub const CONTROLS: [&str; 7] = [
    "CONTROLS",
    "Left/Right: Move",
    "Up: Rotate",
    "Down: Soft drop",
    "Space: Hard drop",
    "C: Hold piece",
    "R: Restart",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the playfield frame landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for the Tetris game.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Size of the bordered playfield in terminal cells.
    pub fn frame_size(&self) -> (u16, u16) {
        (
            (BOARD_WIDTH as u16) * self.cell_w + 2,
            (BOARD_HEIGHT as u16) * self.cell_h + 2,
        )
    }

    /// Render into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames; it is only resized when
    /// the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size();
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(FIELD_BG, FIELD_BG),
        );
        draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG));

        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                match piece_from_cell(snap.board[y as usize][x as usize]) {
                    Some(kind) => self.draw_block(fb, frame, x as i8, y as i8, kind),
                    None => self.draw_empty_cell(fb, frame, x as i8, y as i8),
                }
            }
        }

        if let Some(active) = snap.active {
            let shape = get_shape(active.kind, active.rotation);

            if let Some(ghost_y) = snap.ghost_y {
                let ghost = CellStyle::new(Rgb::new(140, 140, 140), FIELD_BG).dim();
                for &(dx, dy) in shape.iter() {
                    self.fill_board_cell(fb, frame, active.x + dx, ghost_y + dy, '░', ghost);
                }
            }

            // Rows above the grid are not drawn.
            for &(dx, dy) in shape.iter() {
                self.draw_block(fb, frame, active.x + dx, active.y + dy, active.kind);
            }
        }

        self.draw_sidebar(fb, snap, viewport, frame);

        if snap.game_over {
            draw_game_over(fb, frame, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        self.fill_board_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, kind: PieceKind) {
        let style = CellStyle::new(Rgb::from(kind.color()), FIELD_BG).bold();
        self.fill_board_cell(fb, frame, x, y, '█', style);
    }

    /// Fill one board cell; cells outside the grid are skipped.
    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    /// Small spawn-orientation picture of a piece, two rows tall.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind, faded: bool) {
        let mut style = CellStyle::new(Rgb::from(kind.color()), SCREEN_BG);
        if faded {
            style = style.dim();
        }
        for &(dx, dy) in get_spawn_shape(kind).iter() {
            let px = x + (dx as u16) * self.cell_w;
            let py = y + dy as u16;
            fb.fill_rect(px, py, self.cell_w, 1, '█', style);
        }
    }

    fn draw_sidebar(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);
        let legend = CellStyle::new(LIGHT_GRAY, SCREEN_BG);

        let mut y = frame.y;
        fb.put_str(panel_x, y, "HOLD", label);
        if let Some(kind) = snap.hold {
            self.draw_preview(fb, panel_x, y + 1, kind, !snap.can_hold);
        }
        y += 4;

        fb.put_str(panel_x, y, "NEXT", label);
        self.draw_preview(fb, panel_x, y + 1, snap.next, false);
        y += 4;

        for (name, n) in [("SCORE", snap.score), ("LEVEL", snap.level), ("LINES", snap.lines)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, n, value);
            y += 2;
        }
        y += 1;

        for line in CONTROLS {
            fb.put_str(panel_x, y, line, legend);
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
    let Frame { x, y, w, h } = frame;
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut count = 1;
    while n >= 10 {
        n /= 10;
        count += 1;
    }
    count
}

fn centered_x(frame: Frame, text_w: u16) -> u16 {
    frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2)
}

/// Darken the middle band of the playfield and print the result.
fn draw_game_over(fb: &mut FrameBuffer, frame: Frame, score: u32) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let band = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);
    fb.fill_rect(
        frame.x + 1,
        mid_y.saturating_sub(2),
        frame.w.saturating_sub(2),
        7,
        ' ',
        band,
    );

    let title = "GAME OVER";
    fb.put_str(centered_x(frame, title.len() as u16), mid_y.saturating_sub(1), title, band.bold());

    let prefix = "Score: ";
    let score_w = prefix.len() as u16 + digit_count(score);
    let x = fb.put_str(centered_x(frame, score_w), mid_y + 1, prefix, band);
    fb.put_u32(x, mid_y + 1, score, band);

    let hint = "Press R to restart";
    fb.put_str(
        centered_x(frame, hint.len() as u16),
        mid_y + 3,
        hint,
        CellStyle::new(LIGHT_GRAY, SCREEN_BG),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(4_000_000_000), 10);
    }

    #[test]
    fn frame_size_follows_cell_aspect() {
        assert_eq!(GameView::default().frame_size(), (22, 22));
        assert_eq!(GameView::new(1, 1).frame_size(), (12, 22));
    }

    #[test]
    fn preview_draws_four_blocks() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(10, 3);
        view.draw_preview(&mut fb, 0, 0, PieceKind::T, false);
        let blocks = fb.cells().iter().filter(|c| c.ch == '█').count();
        assert_eq!(blocks, 4 * 2);
    }
}
