//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter.  The engine never
//! consults a wall clock: the elapsed milliseconds represented by one tick
//! are supplied externally on every `advance_tick` call, so timed behavior
//! (report intervals, delayed events) is expressed as millisecond budgets
//! that activities count down against the supplied interval.

use std::fmt;

/// Milliseconds in one second.
pub const SECOND_MS: u64 = 1_000;

/// Milliseconds in one minute.
pub const MINUTE_MS: u64 = 60 * SECOND_MS;

/// An absolute simulation tick counter.
///
/// Stored as `u64`: at one tick per simulated second a u64 outlasts any
/// conceivable exercise by a comfortable margin.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }

    /// Ticks elapsed from `earlier` to `self`.
    ///
    /// # Panics
    /// Panics in debug mode if `earlier > self`.
    #[inline]
    pub fn since(self, earlier: Tick) -> u64 {
        self.0 - earlier.0
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
