//! JSON observations of a session, one per line, for headless runs.

use serde::{Deserialize, Serialize};

use crate::core::{GameSnapshot, RenderGrid};

/// Serializable view of a [`GameSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Index of the script step this observation follows (0 = initial state).
    pub step: usize,
    /// Simulated milliseconds since the session started.
    pub elapsed_ms: u64,
    pub status: String,
    pub score: u32,
    pub level: u32,
    pub rows_cleared: u32,
    pub seconds_remaining: u32,
    /// Letter of the next piece.
    pub next: String,
    pub drop_interval_ms: Option<u32>,
    /// Board rows top to bottom: `.` empty, uppercase locked, lowercase falling.
    pub board: Vec<String>,
}

impl Observation {
    pub fn from_snapshot(step: usize, elapsed_ms: u64, snap: &GameSnapshot) -> Self {
        Self {
            step,
            elapsed_ms,
            status: snap.status.as_str().to_string(),
            score: snap.score,
            level: snap.level,
            rows_cleared: snap.rows_cleared,
            seconds_remaining: snap.seconds_remaining,
            next: snap.next_kind.letter().to_string(),
            drop_interval_ms: snap.drop_interval_ms,
            board: board_rows(&snap.board),
        }
    }
}

/// Encode a render grid as one string per row.
pub fn board_rows(grid: &RenderGrid) -> Vec<String> {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell.kind {
                    None => '.',
                    Some(kind) if cell.locked => kind.letter(),
                    Some(kind) => kind.letter().to_ascii_lowercase(),
                })
                .collect()
        })
        .collect()
}
