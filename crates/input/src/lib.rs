//! Terminal input module (engine-facing).
//!
//! This module is independent of any UI framework. It maps `crossterm` key
//! events into [`crate::types::GameAction`] and provides a DAS/ARR input
//! handler suitable for terminal environments (including terminals without
//! key-release events).

pub mod handler;
pub mod map;

pub use classic_tetris_types as types;

pub use handler::{HorizontalDirection, InputHandler};
pub use map::{handle_key_event, is_repeatable, should_quit};
