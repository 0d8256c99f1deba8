//! Clock module - the two repeating timers that drive a session
//!
//! Gravity fires every `drop_interval_ms` and the survival countdown every
//! second while playing. The clock watches the state's intervals after each
//! event; a timer restarts its phase only when its period actually changes.

use crate::game_state::GameState;
use crate::rng::Randomizer;
use crate::types::COUNTDOWN_TICK_MS;

/// A repeating timer with an optional period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntervalTimer {
    period: Option<u32>,
    elapsed: u32,
}

impl IntervalTimer {
    pub fn new(period: Option<u32>) -> Self {
        let mut timer = Self::default();
        timer.set_period(period);
        timer
    }

    pub fn period(&self) -> Option<u32> {
        self.period
    }

    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    /// Change the period. Zero counts as inactive. The phase restarts only
    /// when the period differs from the current one.
    pub fn set_period(&mut self, period: Option<u32>) {
        let period = period.filter(|&p| p > 0);
        if period != self.period {
            self.period = period;
            self.elapsed = 0;
        }
    }

    /// Milliseconds until the next fire, `None` while inactive.
    pub fn remaining(&self) -> Option<u32> {
        self.period.map(|p| p.saturating_sub(self.elapsed))
    }

    fn advance(&mut self, ms: u32) {
        if self.period.is_some() {
            self.elapsed = self.elapsed.saturating_add(ms);
        }
    }

    fn fire(&mut self) {
        if let Some(period) = self.period {
            self.elapsed = self.elapsed.saturating_sub(period);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Due {
    Gravity,
    Countdown,
}

/// Drives gravity and the countdown from elapsed wall time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameClock {
    gravity: IntervalTimer,
    countdown: IntervalTimer,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gravity(&self) -> &IntervalTimer {
        &self.gravity
    }

    pub fn countdown(&self) -> &IntervalTimer {
        &self.countdown
    }

    /// Pick up interval changes made by commands applied to `state`.
    pub fn sync<R: Randomizer>(&mut self, state: &GameState<R>) {
        self.gravity.set_period(state.drop_interval_ms());
        self.countdown
            .set_period(state.countdown_active().then_some(COUNTDOWN_TICK_MS));
    }

    /// Let `elapsed_ms` pass, firing every timer that comes due in order.
    ///
    /// When both timers are due at the same instant gravity fires first.
    pub fn advance<R: Randomizer>(
        &mut self,
        state: &GameState<R>,
        elapsed_ms: u32,
    ) -> GameState<R> {
        let mut state = state.clone();
        self.sync(&state);
        let mut budget = elapsed_ms;

        loop {
            let due = match (self.gravity.remaining(), self.countdown.remaining()) {
                (Some(g), Some(c)) if c < g => Some((c, Due::Countdown)),
                (Some(g), _) => Some((g, Due::Gravity)),
                (None, Some(c)) => Some((c, Due::Countdown)),
                (None, None) => None,
            };

            let Some((step, which)) = due.filter(|(step, _)| *step <= budget) else {
                self.gravity.advance(budget);
                self.countdown.advance(budget);
                return state;
            };

            self.gravity.advance(step);
            self.countdown.advance(step);
            budget -= step;

            state = match which {
                Due::Gravity => {
                    self.gravity.fire();
                    state.on_gravity()
                }
                Due::Countdown => {
                    self.countdown.fire();
                    state.countdown_tick()
                }
            };
            self.sync(&state);
        }
    }
}
