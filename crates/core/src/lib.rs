//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules engine: the playfield, the shape catalog, piece
//! generation, scoring and the per-piece lifecycle. It does no I/O and knows
//! nothing about terminals or key codes; front ends drive it through commands
//! and read it back through queries or a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 playfield with collision checks and row clearing
//! - [`game_state`]: active/next/hold pieces, scoring, gravity timer, game over
//! - [`pieces`]: authored rotation tables for the seven tetrominoes
//! - [`rng`]: seeded uniform or 7-bag piece generation
//! - [`scoring`]: line-clear table, drop points and the level curve
//! - [`snapshot`]: plain-data copy of the state for rendering
//!
//! # Game Rules
//!
//! - **Rotation**: one direction only, table lookup, no wall kicks. A rotation
//!   that collides is undone.
//! - **Locking**: immediate. A piece that cannot fall on a gravity step locks.
//! - **Hold**: once per spawned piece.
//! - **Scoring**: 100/300/500/800 times the current level for 1-4 rows, +1 per
//!   soft-drop step, +2 per hard-drop row.
//! - **Levels**: one per 10 lines; gravity goes from 500ms down to 100ms.
//!
//! # Example
//!
//! ```
//! use classic_tetris_core::GameState;
//! use classic_tetris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Hard drop awards points
//! assert!(game.score() > 0);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds; the piece falls one row each time the accumulated time
//! reaches the current fall interval.

pub mod board;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use classic_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use game_state::{GameState, Tetromino};
pub use pieces::{get_shape, get_spawn_shape, shape_for_index, SPAWN_POSITION};
pub use rng::{PieceGenerator, PieceRule, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_level, calculate_line_score, fall_interval_ms};
pub use snapshot::{piece_from_cell, ActiveSnapshot, GameSnapshot};
