//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no I/O, so they can be shared by the rules
//! engine, the terminal renderer and the input layer alike.
//!
//! # Board Dimensions
//!
//! Classic playfield dimensions:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top/spawn row)
//! - **Spawn position**: (3, 0) for every piece
//!
//! # Gravity
//!
//! The fall interval shrinks by 40ms per level and never drops below 100ms:
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 500ms |
//! | 2 | 460ms |
//! | 5 | 340ms |
//! | 10 | 140ms |
//! | 11+ | 100ms |
//!
//! # Examples
//!
//! ```
//! use classic_tetris_types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::ALL[PieceKind::T.index()], PieceKind::T);
//!
//! assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
//! assert_eq!(Rotation::from_index(3), Some(Rotation::West));
//! assert_eq!(Rotation::from_index(4), None);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Spawn anchor column: `BOARD_WIDTH / 2 - 2`
pub const SPAWN_X: i8 = (BOARD_WIDTH / 2) as i8 - 2;

/// Spawn anchor row
pub const SPAWN_Y: i8 = 0;

/// Fixed frame interval used by the terminal driver (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1
pub const BASE_FALL_INTERVAL_MS: u32 = 500;

/// Fall interval reduction per level
pub const FALL_INTERVAL_STEP_MS: u32 = 40;

/// Fastest possible fall interval
pub const MIN_FALL_INTERVAL_MS: u32 = 100;

/// Lines needed per level-up
pub const LINES_PER_LEVEL: u32 = 10;

/// DAS (Delayed Auto Shift) delay in milliseconds.
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds.
pub const DEFAULT_ARR_MS: u32 = 50;

/// Points per row for a successful soft-drop step
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Line clear scoring table, indexed by number of rows cleared at once.
///
/// Multiplied by the level in effect before the clear. Any count outside
/// 1..=4 scores nothing.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// Each kind has exactly one colour and one rotation table:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Purple
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Display colour as `(r, g, b)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::I.color(), (0, 255, 255));
    /// assert_eq!(PieceKind::L.color(), (255, 165, 0));
    /// ```
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0, 255, 255),
            PieceKind::O => (255, 255, 0),
            PieceKind::T => (160, 0, 255),
            PieceKind::S => (0, 255, 0),
            PieceKind::Z => (255, 0, 0),
            PieceKind::J => (0, 0, 255),
            PieceKind::L => (255, 165, 0),
        }
    }
}

/// Rotation states of a piece
///
/// - **North**: Spawn orientation (index 0)
/// - **East**: index 1
/// - **South**: index 2
/// - **West**: index 3
///
/// The cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Next state in the cycle
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Previous state in the cycle (exact inverse of [`Rotation::rotate_cw`])
    ///
    /// # Examples
    ///
    /// ```
    /// use classic_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    /// Rotation index in `0..4`
    pub fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Checked conversion from a raw index. Callers normalize with `% 4` first.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Rotation::North),
            1 => Some(Rotation::East),
            2 => Some(Rotation::South),
            3 => Some(Rotation::West),
            _ => None,
        }
    }
}

/// Discrete commands a driver can issue to the engine
///
/// Each action maps to exactly one engine command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (+1 point on success)
    SoftDrop,
    /// Drop piece to its landing row and lock it (+2 points per row)
    HardDrop,
    /// Rotate piece to its next rotation state, no kicks
    Rotate,
    /// Set the current piece aside (once per spawn)
    Hold,
    /// Discard the game and start a fresh one
    Restart,
}

/// Summary of a single lock, emitted by the engine after every lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LockEvent {
    /// Kind of the piece that locked
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Points awarded for the clear (drop points not included)
    pub line_clear_score: u32,
    /// Level after the clear was applied
    pub level: u32,
    /// Whether the follow-up spawn ended the game
    pub game_over: bool,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked block; its colour is `kind.color()`
pub type Cell = Option<PieceKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spawn_column_is_center_biased() {
        assert_eq!(SPAWN_X, 3);
        assert_eq!(SPAWN_Y, 0);
    }

    #[test]
    fn line_score_table_matches_classic_values() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn rotation_index_roundtrips_through_cycle() {
        let mut r = Rotation::North;
        for i in 0..8 {
            assert_eq!(r.index(), i % 4);
            assert_eq!(Rotation::from_index(r.index()), Some(r));
            assert_eq!(r.rotate_cw().rotate_ccw(), r);
            r = r.rotate_cw();
        }
    }

    #[test]
    fn piece_kind_index_matches_all_order() {
        for (i, kind) in PieceKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
