//! Headless scripted sessions.
//!
//! A script is a whitespace- or comma-separated list of tokens. Each token is
//! either a command name (`startGame`, `moveLeft`, `rotateCw`, ...) applied
//! immediately, or `wait:<ms>` which lets simulated time pass so gravity and
//! the countdown fire.
//!
//! ```
//! use neon_tetris::replay::run_script;
//!
//! let obs = run_script(7, "startGame wait:1000 moveLeft", false).unwrap();
//! let last = obs.last().unwrap();
//! assert_eq!(last.status, "playing");
//! assert_eq!(last.seconds_remaining, 59);
//! ```

use thiserror::Error;
use tracing::debug;

use crate::core::{GameClock, GameState, Randomizer};
use crate::observe::Observation;
use crate::types::Command;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplayError {
    #[error("unknown token `{token}` at position {index}")]
    UnknownToken { index: usize, token: String },
    #[error("invalid wait duration `{token}` at position {index}")]
    InvalidWait { index: usize, token: String },
    #[error("script contains no steps")]
    EmptyScript,
}

/// One parsed script token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Command(Command),
    Wait(u32),
}

pub fn parse_script(script: &str) -> Result<Vec<Step>, ReplayError> {
    let steps = script
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .enumerate()
        .map(|(index, token)| parse_token(index, token))
        .collect::<Result<Vec<_>, _>>()?;

    if steps.is_empty() {
        return Err(ReplayError::EmptyScript);
    }
    Ok(steps)
}

fn parse_token(index: usize, token: &str) -> Result<Step, ReplayError> {
    if let Some(ms) = token.strip_prefix("wait:") {
        return ms
            .parse::<u32>()
            .map(Step::Wait)
            .map_err(|_| ReplayError::InvalidWait {
                index,
                token: token.to_string(),
            });
    }
    Command::from_str(token)
        .map(Step::Command)
        .ok_or_else(|| ReplayError::UnknownToken {
            index,
            token: token.to_string(),
        })
}

/// Run `steps` from `state`, returning the observations.
///
/// The initial state is always observed, as is the final one. With
/// `every_step` each intermediate step is observed too.
pub fn run_steps<R: Randomizer>(
    state: GameState<R>,
    steps: &[Step],
    every_step: bool,
) -> Vec<Observation> {
    let mut clock = GameClock::new();
    let mut state = state;
    let mut elapsed_ms: u64 = 0;
    let mut out = vec![Observation::from_snapshot(0, 0, &state.snapshot())];

    for (i, step) in steps.iter().enumerate() {
        state = match *step {
            Step::Command(command) => {
                let next = state.apply(command);
                clock.sync(&next);
                next
            }
            Step::Wait(ms) => {
                elapsed_ms += u64::from(ms);
                clock.advance(&state, ms)
            }
        };
        debug!(index = i + 1, ?step, status = state.status().as_str(), "replay step");

        if every_step || i + 1 == steps.len() {
            out.push(Observation::from_snapshot(i + 1, elapsed_ms, &state.snapshot()));
        }
    }

    out
}

/// Parse `script` and run it from a fresh session seeded with `seed`.
pub fn run_script(
    seed: u32,
    script: &str,
    every_step: bool,
) -> Result<Vec<Observation>, ReplayError> {
    let steps = parse_script(script)?;
    Ok(run_steps(GameState::new(seed), &steps, every_step))
}
