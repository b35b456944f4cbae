//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal gameplay. It renders a
//! [`core::GameSnapshot`] into a plain framebuffer and flushes that buffer to
//! the terminal with crossterm, diffing against the previous frame.
//!
//! - [`fb`]: styled character framebuffer
//! - [`game_view`]: snapshot -> framebuffer (pure, testable)
//! - [`renderer`]: framebuffer -> terminal

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use classic_tetris_core as core;
pub use classic_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport, CONTROLS};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
