//! The `Exercise` runner — state plus a tick counter.

use mci_core::{MciResult, Tick};
use mci_model::ExerciseState;

use crate::driver::advance_all;

/// An exercise in progress: the shared state tree and the logical clock.
///
/// The runner only counts ticks; the simulated duration of a tick is the
/// `tick_interval_ms` it was built with, passed down to every activity
/// pass.
pub struct Exercise {
    pub state: ExerciseState,
    pub current_tick: Tick,
    pub tick_interval_ms: u64,
}

impl Exercise {
    pub fn new(state: ExerciseState, tick_interval_ms: u64) -> Self {
        Self {
            state,
            current_tick: Tick::ZERO,
            tick_interval_ms,
        }
    }

    /// Advance every region by one tick.
    pub fn advance(&mut self) -> MciResult<()> {
        advance_all(&mut self.state, self.tick_interval_ms)?;
        self.current_tick = self.current_tick + 1;
        Ok(())
    }

    /// Advance `n` ticks.  Useful for tests and incremental stepping.
    pub fn run_ticks(&mut self, n: u64) -> MciResult<()> {
        for _ in 0..n {
            self.advance()?;
        }
        Ok(())
    }
}
