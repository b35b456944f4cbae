//! RNG module - deterministic piece generation
//!
//! Two draw rules are supported:
//!
//! - **Uniform**: every draw picks one of the seven kinds with equal odds,
//!   independent of history. This is the classic behaviour and the default.
//! - **Bag7**: pieces come from a shuffled bag holding one of each kind; a new
//!   bag is shuffled once the current one is empty.
//!
//! Both rules are driven by a small LCG so the same seed always produces the
//! same game.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (self.next_u32() >> 16) % max.max(1)
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// How the next piece kind is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PieceRule {
    #[default]
    Uniform,
    Bag7,
}

impl PieceRule {
    /// Parse from a config string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" | "random" => Some(PieceRule::Uniform),
            "bag7" | "7bag" | "bag" => Some(PieceRule::Bag7),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceRule::Uniform => "uniform",
            PieceRule::Bag7 => "bag7",
        }
    }
}

/// Seeded source of piece kinds
#[derive(Debug, Clone)]
pub struct PieceGenerator {
    rule: PieceRule,
    rng: SimpleRng,
    /// Current bag (only used by `PieceRule::Bag7`)
    bag: [PieceKind; 7],
    /// Index into current bag; 7 forces a refill on the next draw
    bag_index: usize,
}

impl PieceGenerator {
    pub fn new(seed: u32, rule: PieceRule) -> Self {
        Self {
            rule,
            rng: SimpleRng::new(seed),
            bag: PieceKind::ALL,
            bag_index: PieceKind::ALL.len(),
        }
    }

    pub fn rule(&self) -> PieceRule {
        self.rule
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Draw the next piece kind
    pub fn draw(&mut self) -> PieceKind {
        match self.rule {
            PieceRule::Uniform => {
                let i = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
                PieceKind::ALL[i]
            }
            PieceRule::Bag7 => {
                if self.bag_index >= self.bag.len() {
                    self.refill_bag();
                }
                let piece = self.bag[self.bag_index];
                self.bag_index += 1;
                piece
            }
        }
    }

    /// Current RNG state, usable as the seed of a follow-up game
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceGenerator {
    fn default() -> Self {
        Self::new(1, PieceRule::Uniform)
    }
}
