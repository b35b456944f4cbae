//! Scoring module - classic line-clear table, drop points and level curve
//!
//! - A clear of N rows scores `LINE_SCORES[N] * level`, using the level in effect
//!   before the clear. N outside 1..=4 scores nothing.
//! - Soft drop pays 1 point per successful step, hard drop 2 per row.
//! - Level is `1 + lines / 10`; gravity speeds up 40ms per level down to 100ms.

use crate::types::{
    BASE_FALL_INTERVAL_MS, FALL_INTERVAL_STEP_MS, HARD_DROP_POINTS, LINES_PER_LEVEL, LINE_SCORES,
    MIN_FALL_INTERVAL_MS, SOFT_DROP_POINTS,
};

/// Calculate line clear score
/// lines: number of rows cleared at once
/// level: current level (1-based, before any level-up from this clear)
pub fn calculate_line_score(lines: usize, level: u32) -> u32 {
    LINE_SCORES
        .get(lines)
        .copied()
        .unwrap_or(0)
        .saturating_mul(level)
}

/// Calculate drop score
/// soft_drop: +1 per cell
/// hard_drop: +2 per cell
pub fn calculate_drop_score(cells: u32, is_hard_drop: bool) -> u32 {
    if is_hard_drop {
        cells.saturating_mul(HARD_DROP_POINTS)
    } else {
        cells.saturating_mul(SOFT_DROP_POINTS)
    }
}

/// Level for a running line total (starts at 1)
pub fn calculate_level(total_lines: u32) -> u32 {
    1 + total_lines / LINES_PER_LEVEL
}

/// Gravity interval for a level, clamped at [`MIN_FALL_INTERVAL_MS`]
pub fn fall_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(FALL_INTERVAL_STEP_MS);
    BASE_FALL_INTERVAL_MS
        .saturating_sub(speedup)
        .max(MIN_FALL_INTERVAL_MS)
}
