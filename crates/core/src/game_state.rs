//! Game state module - manages the complete game state
//!
//! This module ties together the board, the shape catalog, the piece generator
//! and scoring. It owns the per-piece lifecycle:
//!
//! ```text
//! Spawning -> Falling -> Locking -> Clearing -> Spawning
//!     \                                  (or GameOver, terminal until restart)
//!      `-> GameOver
//! ```
//!
//! Every command returns `true` when it changed the state and `false` when it
//! was rejected; rejected commands leave the state untouched.

use tracing::{debug, info, trace};

use crate::board::Board;
use crate::pieces::{get_shape, PieceShape};
use crate::rng::{PieceGenerator, PieceRule};
use crate::scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::*;

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tetromino {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl Tetromino {
    /// Create a new tetromino at spawn position
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::North,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Occupied board cells. Coordinates saturate at the `i8` bounds.
    pub fn cells(&self) -> [(i8, i8); 4] {
        self.shape()
            .map(|(mx, my)| (self.x.saturating_add(mx), self.y.saturating_add(my)))
    }

    /// Occupied board cells if the piece were shifted by (dx, dy).
    ///
    /// `None` when a coordinate leaves the `i8` range.
    pub fn cells_offset(&self, dx: i8, dy: i8) -> Option<[(i8, i8); 4]> {
        let x = self.x.checked_add(dx)?;
        let y = self.y.checked_add(dy)?;

        let mut cells = [(0, 0); 4];
        for (cell, (mx, my)) in cells.iter_mut().zip(self.shape()) {
            *cell = (x.checked_add(mx)?, y.checked_add(my)?);
        }
        Some(cells)
    }

    /// Advance to the next rotation state. No collision check.
    pub fn rotate_forward(&mut self) {
        self.rotation = self.rotation.rotate_cw();
    }

    /// Undo [`Tetromino::rotate_forward`].
    pub fn rotate_backward(&mut self) {
        self.rotation = self.rotation.rotate_ccw();
    }

    /// Whether the piece shifted by (dx, dy) avoids walls, floor and stack
    pub fn fits_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        self.cells_offset(dx, dy)
            .is_some_and(|cells| cells.iter().all(|&(x, y)| !board.is_blocked(x, y)))
    }

    /// Check if the piece fits where it is
    pub fn is_valid(&self, board: &Board) -> bool {
        self.fits_at(board, 0, 0)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    /// Pre-spawned piece, installed as `active` on the next spawn.
    next: Tetromino,
    hold: Option<PieceKind>,
    can_hold: bool,
    generator: PieceGenerator,
    /// Seed this game was started with.
    seed: u32,
    /// Last lock event (consumed by observers).
    last_event: Option<LockEvent>,
    score: u32,
    level: u32,
    lines: u32,
    fall_interval_ms: u32,
    fall_timer_ms: u32,
    game_over: bool,
}

impl GameState {
    /// Create a new game with the given seed and the classic uniform draw,
    /// with the first piece already spawned.
    pub fn new(seed: u32) -> Self {
        Self::with_rule(seed, PieceRule::Uniform)
    }

    /// Create a new game with an explicit piece rule
    pub fn with_rule(seed: u32, rule: PieceRule) -> Self {
        let mut generator = PieceGenerator::new(seed, rule);
        let next = Tetromino::new(generator.draw());

        let mut state = Self {
            board: Board::new(),
            active: None,
            next,
            hold: None,
            can_hold: true,
            generator,
            seed,
            last_event: None,
            score: 0,
            level: 1,
            lines: 0,
            fall_interval_ms: fall_interval_ms(1),
            fall_timer_ms: 0,
            game_over: false,
        };
        state.spawn_piece();
        state
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn can_hold(&self) -> bool {
        self.can_hold
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval in milliseconds
    pub fn fall_interval_ms(&self) -> u32 {
        self.fall_interval_ms
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn piece_rule(&self) -> PieceRule {
        self.generator.rule()
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_piece(&self) -> PieceKind {
        self.next.kind
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        self.active.map(|p| p.cells())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.next = self.next.kind;
        out.hold = self.hold;
        out.can_hold = self.can_hold;
        out.game_over = self.game_over;
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.fall_interval_ms = self.fall_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Install the pre-spawned piece and draw a new one.
    ///
    /// Re-arms hold. Returns false (and ends the game) when the new piece
    /// collides at its spawn position.
    fn spawn_piece(&mut self) -> bool {
        let upcoming = Tetromino::new(self.generator.draw());
        let piece = std::mem::replace(&mut self.next, upcoming);

        self.active = Some(piece);
        self.can_hold = true;

        if !piece.is_valid(&self.board) {
            self.end_game(piece.kind);
            return false;
        }

        trace!(kind = ?piece.kind, next = ?self.next.kind, "spawned piece");
        true
    }

    fn end_game(&mut self, blocked: PieceKind) {
        self.game_over = true;
        info!(
            blocked = ?blocked,
            score = self.score,
            level = self.level,
            lines = self.lines,
            "game over"
        );
    }

    /// Move the active piece by (dx, dy) if every shifted cell is free.
    fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            trace!(dx, dy, "move rejected: game over");
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        if !active.fits_at(&self.board, dx, dy) {
            trace!(kind = ?active.kind, x = active.x, y = active.y, dx, dy, "move blocked");
            return false;
        }

        self.active = Some(Tetromino {
            x: active.x + dx,
            y: active.y + dy,
            ..active
        });
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1, 0)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1, 0)
    }

    /// One row down, +1 point on success
    pub fn soft_drop_step(&mut self) -> bool {
        let moved = self.try_move(0, 1);
        if moved {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
        }
        moved
    }

    /// Rotate in place; on collision the rotation is undone.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(mut piece) = self.active else {
            return false;
        };

        piece.rotate_forward();
        if !piece.is_valid(&self.board) {
            piece.rotate_backward();
            debug_assert_eq!(Some(piece), self.active);
            trace!(kind = ?piece.kind, rotation = ?piece.rotation, "rotation blocked");
            return false;
        }

        self.active = Some(piece);
        true
    }

    /// Set the current piece aside (once per spawn).
    ///
    /// With an empty hold slot the pre-spawned next piece takes over; otherwise
    /// the held kind comes back at the spawn position. Returns whether the hold
    /// happened, even when the incoming piece collides and ends the game.
    pub fn hold(&mut self) -> bool {
        if self.game_over || !self.can_hold {
            trace!(game_over = self.game_over, can_hold = self.can_hold, "hold rejected");
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let incoming = match self.hold {
            Some(held) => Tetromino::new(held),
            None => {
                let upcoming = Tetromino::new(self.generator.draw());
                std::mem::replace(&mut self.next, upcoming)
            }
        };

        self.hold = Some(active.kind);
        self.active = Some(incoming);
        self.can_hold = false;
        debug!(held = ?active.kind, incoming = ?incoming.kind, "hold");

        if !incoming.is_valid(&self.board) {
            self.end_game(incoming.kind);
        }

        true
    }

    /// Drop to the landing row (+2 points per row) and lock.
    pub fn hard_drop(&mut self) -> bool {
        if self.game_over || self.active.is_none() {
            trace!(game_over = self.game_over, "hard drop rejected");
            return false;
        }

        let mut rows: u32 = 0;
        while self.try_move(0, 1) {
            rows += 1;
        }
        self.score = self.score.saturating_add(calculate_drop_score(rows, true));

        self.lock_piece()
    }

    /// Lock the active piece onto the board, clear lines and spawn the next piece
    pub fn lock_piece(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let Some(active) = self.active.take() else {
            return false;
        };

        self.board.lock_cells(&active.cells(), active.kind);

        let (lines_cleared, line_clear_score) = self.clear_lines();

        self.spawn_piece();

        let event = LockEvent {
            kind: active.kind,
            lines_cleared,
            line_clear_score,
            level: self.level,
            game_over: self.game_over,
        };
        debug!(
            kind = ?active.kind,
            x = active.x,
            y = active.y,
            lines_cleared,
            line_clear_score,
            score = self.score,
            "piece locked"
        );
        self.last_event = Some(event);

        true
    }

    /// Remove full rows and apply line score, level and gravity updates.
    ///
    /// The line score uses the level in effect before this clear.
    /// Returns `(rows cleared, points awarded)`.
    fn clear_lines(&mut self) -> (u32, u32) {
        let full_rows = self.board.find_full_rows();
        if full_rows.is_empty() {
            return (0, 0);
        }

        let cleared = self.board.clear_rows(&full_rows);
        let points = calculate_line_score(cleared, self.level);

        self.lines = self.lines.saturating_add(cleared as u32);
        self.score = self.score.saturating_add(points);

        let previous_level = self.level;
        self.level = calculate_level(self.lines);
        self.fall_interval_ms = fall_interval_ms(self.level);

        if self.level != previous_level {
            info!(
                level = self.level,
                fall_interval_ms = self.fall_interval_ms,
                "level up"
            );
        }

        (cleared as u32, points)
    }

    /// Rows the active piece can still fall before it lands
    fn drop_distance(&self) -> Option<i8> {
        let active = self.active?;

        let mut distance: i8 = 0;
        while let Some(below) = distance.checked_add(1) {
            if !active.fits_at(&self.board, 0, below) {
                break;
            }
            distance = below;
        }
        Some(distance)
    }

    /// Calculate the ghost piece Y position (where piece would land)
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;
        active.y.checked_add(self.drop_distance()?)
    }

    /// Cells the active piece would occupy after landing
    pub fn ghost_cells(&self) -> Option<[(i8, i8); 4]> {
        let active = self.active?;
        active.cells_offset(0, self.drop_distance()?)
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Once the accumulated time reaches the fall interval the piece moves
    /// down one row, or locks if it cannot. Returns whether a gravity step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over || self.active.is_none() {
            return false;
        }

        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.fall_interval_ms {
            return false;
        }

        if !self.try_move(0, 1) {
            self.lock_piece();
        }
        self.fall_timer_ms = 0;
        true
    }

    /// Discard everything and start a fresh game.
    ///
    /// The new game is seeded from the current generator state, so a restart
    /// does not replay the same piece sequence.
    pub fn restart(&mut self) {
        let seed = self.generator.seed();
        let rule = self.generator.rule();
        info!(seed, rule = rule.as_str(), final_score = self.score, "restart");
        *self = Self::with_rule(seed, rule);
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop_step(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
