//! Scoring module - line-clear points and gravity intervals
//!
//! All values are fixed constants from the types crate.

use crate::types::{
    BASE_DROP_MS, DROP_STEP_MS, LINE_SCORES, MIN_DROP_MS, ROWS_PER_LEVEL, ROW_SPEEDUP_OFFSET_MS,
};

/// Points for clearing `rows` rows in one sweep at `level` (levels start at 1).
///
/// Sweeps of 0 rows, or more than 4, score nothing.
pub fn line_clear_score(rows: usize, level: u32) -> u32 {
    if rows == 0 || rows > LINE_SCORES.len() {
        return 0;
    }
    LINE_SCORES[rows - 1] * level
}

/// Base gravity interval for a timer-driven level.
///
/// Level 1 falls every 1000ms, each further level 100ms faster, never below 100ms.
pub fn level_drop_interval_ms(level: u32) -> u32 {
    let speedup = level.saturating_sub(1).saturating_mul(DROP_STEP_MS);
    BASE_DROP_MS.saturating_sub(speedup).max(MIN_DROP_MS)
}

/// Gravity interval restored when a soft drop is released.
///
/// Uses the current level directly, so it runs one step ahead of
/// [`level_drop_interval_ms`]: 900ms at level 1, 100ms from level 9 on.
pub fn release_drop_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS
        .saturating_sub(level.saturating_mul(DROP_STEP_MS))
        .max(MIN_DROP_MS)
}

/// Whether the row-count speed-up fires for this many cleared rows.
pub fn row_threshold_reached(rows_cleared: u32, level: u32) -> bool {
    rows_cleared > (level + 1) * ROWS_PER_LEVEL
}

/// Gravity interval set by the row-count speed-up, computed from the level
/// before it is incremented.
pub fn row_speedup_interval_ms(level: u32) -> u32 {
    BASE_DROP_MS / (level + 1) + ROW_SPEEDUP_OFFSET_MS
}
