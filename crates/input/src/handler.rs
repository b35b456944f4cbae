//! DAS/ARR input handler for terminal environments.
//!
//! Left, right and down repeat while held: the first repeat fires once the key
//! has been held for the DAS delay, later ones every ARR interval. Other
//! actions fire once per press.
//!
//! Supports terminals that do not emit key release events by using a timeout.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::KeyEvent;

use crate::map::handle_key_event;
use crate::types::{GameAction, DEFAULT_ARR_MS, DEFAULT_DAS_MS};

/// Most repeats a single `update` call can emit.
pub const MAX_REPEATS_PER_UPDATE: usize = 32;

/// Direction for horizontal movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalDirection {
    Left,
    Right,
    None,
}

/// Hold timer for one repeatable key.
#[derive(Debug, Clone, Copy, Default)]
struct KeyRepeat {
    held: bool,
    das_timer: u32,
    arr_accumulator: u32,
}

impl KeyRepeat {
    /// Returns true when the key was not already held.
    fn press(&mut self) -> bool {
        if self.held {
            return false;
        }
        *self = Self {
            held: true,
            ..Self::default()
        };
        true
    }

    fn release(&mut self) {
        *self = Self::default();
    }

    /// Advance the hold timer and return how many repeats are due.
    fn advance(&mut self, elapsed_ms: u32, das: u32, arr: u32) -> u32 {
        if !self.held {
            return 0;
        }

        let prev_das = self.das_timer;
        self.das_timer = self.das_timer.saturating_add(elapsed_ms);
        if self.das_timer < das {
            return 0;
        }

        let mut repeats = 0;
        if prev_das < das {
            // Crossing the DAS delay fires the first repeat.
            repeats += 1;
            self.arr_accumulator = self.das_timer - das;
        } else {
            self.arr_accumulator = self.arr_accumulator.saturating_add(elapsed_ms);
        }

        let arr = arr.max(1);
        repeats += self.arr_accumulator / arr;
        self.arr_accumulator %= arr;
        repeats
    }
}

/// Tracks input state for DAS/ARR handling.
#[derive(Debug, Clone)]
pub struct InputHandler {
    horizontal: HorizontalDirection,
    horizontal_repeat: KeyRepeat,
    down_repeat: KeyRepeat,
    last_key_time: Instant,
    das_delay: u32,
    arr_rate: u32,
    key_release_timeout_ms: u32,
}

// In terminals without key-release events, a short timeout prevents a single tap
// from turning into a sustained "held" state that triggers DAS/ARR repeats.
// Terminal auto-repeat keeps refreshing it while a key is really held.
const DEFAULT_KEY_RELEASE_TIMEOUT_MS: u32 = 150;

impl InputHandler {
    pub fn new() -> Self {
        Self::with_config(DEFAULT_DAS_MS, DEFAULT_ARR_MS)
    }

    pub fn with_config(das_delay: u32, arr_rate: u32) -> Self {
        Self {
            horizontal: HorizontalDirection::None,
            horizontal_repeat: KeyRepeat::default(),
            down_repeat: KeyRepeat::default(),
            last_key_time: Instant::now(),
            das_delay,
            arr_rate,
            key_release_timeout_ms: DEFAULT_KEY_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_key_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.key_release_timeout_ms = timeout_ms;
        self
    }

    pub fn key_release_timeout_ms(&self) -> u32 {
        self.key_release_timeout_ms
    }

    pub fn das_delay(&self) -> u32 {
        self.das_delay
    }

    pub fn arr_rate(&self) -> u32 {
        self.arr_rate
    }

    pub fn horizontal(&self) -> HorizontalDirection {
        self.horizontal
    }

    /// Handle a key press (or terminal auto-repeat of a held key).
    ///
    /// Returns the action to apply now. Held movement keys return `None`
    /// on repeated presses; their repeats come from [`InputHandler::update`].
    pub fn handle_key_press(&mut self, key: KeyEvent) -> Option<GameAction> {
        let action = handle_key_event(key)?;

        match action {
            GameAction::MoveLeft => self.press_horizontal(HorizontalDirection::Left),
            GameAction::MoveRight => self.press_horizontal(HorizontalDirection::Right),
            GameAction::SoftDrop => {
                self.last_key_time = Instant::now();
                self.down_repeat.press().then_some(GameAction::SoftDrop)
            }
            one_shot => Some(one_shot),
        }
    }

    fn press_horizontal(&mut self, direction: HorizontalDirection) -> Option<GameAction> {
        self.last_key_time = Instant::now();
        if self.horizontal == direction {
            return None;
        }

        self.horizontal = direction;
        self.horizontal_repeat.release();
        self.horizontal_repeat.press();
        match direction {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        }
    }

    pub fn handle_key_release(&mut self, key: KeyEvent) {
        match handle_key_event(key) {
            Some(GameAction::MoveLeft) if self.horizontal == HorizontalDirection::Left => {
                self.release_horizontal();
            }
            Some(GameAction::MoveRight) if self.horizontal == HorizontalDirection::Right => {
                self.release_horizontal();
            }
            Some(GameAction::SoftDrop) => self.down_repeat.release(),
            _ => {}
        }
    }

    fn release_horizontal(&mut self) {
        self.horizontal = HorizontalDirection::None;
        self.horizontal_repeat.release();
    }

    /// Advance hold timers by `elapsed_ms` and collect due repeats.
    pub fn update(&mut self, elapsed_ms: u32) -> ArrayVec<GameAction, MAX_REPEATS_PER_UPDATE> {
        let mut actions = ArrayVec::new();

        // Auto-release when terminal does not emit release events.
        let since_last_key = self.last_key_time.elapsed().as_millis();
        if since_last_key > u128::from(self.key_release_timeout_ms) {
            self.release_horizontal();
            self.down_repeat.release();
        }

        let horizontal_action = match self.horizontal {
            HorizontalDirection::Left => Some(GameAction::MoveLeft),
            HorizontalDirection::Right => Some(GameAction::MoveRight),
            HorizontalDirection::None => None,
        };
        if let Some(action) = horizontal_action {
            let repeats = self
                .horizontal_repeat
                .advance(elapsed_ms, self.das_delay, self.arr_rate);
            // Repeats past the per-update capacity are dropped.
            let room = actions.remaining_capacity();
            actions.extend(std::iter::repeat(action).take((repeats as usize).min(room)));
        }

        let repeats = self
            .down_repeat
            .advance(elapsed_ms, self.das_delay, self.arr_rate);
        let room = actions.remaining_capacity();
        actions.extend(std::iter::repeat(GameAction::SoftDrop).take((repeats as usize).min(room)));

        actions
    }

    pub fn reset(&mut self) {
        self.release_horizontal();
        self.down_repeat.release();
        self.last_key_time = Instant::now();
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
