//! Clock sources
//!
//! The engine never reads the system time itself. Every transition takes a
//! [`Timestamp`] supplied by the caller, which keeps replays deterministic.
//! [`SystemClock`] is the live source and [`ManualClock`] drives tests and
//! scripted replays.

use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;
use std::time::Instant;

/// Point in time, in seconds from an arbitrary origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(f64);

impl Timestamp {
    pub const ZERO: Timestamp = Timestamp(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    pub fn as_secs(self) -> f64 {
        self.0
    }

    /// Seconds elapsed since `earlier`, clamped to zero when the clock has
    /// moved backward.
    pub fn secs_since(self, earlier: Timestamp) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn add_secs(self, secs: f64) -> Self {
        Self(self.0 + secs)
    }
}

impl From<f64> for Timestamp {
    fn from(secs: f64) -> Self {
        Self(secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "t={:.3}s", self.0)
    }
}

/// Source of timestamps for a live session.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Monotonic wall clock, measured from the moment it was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.origin.elapsed().as_secs_f64())
    }
}

/// Hand-driven clock for tests and scripted replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    current: Cell<f64>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self { current: Cell::new(start) }
    }

    pub fn set(&self, secs: f64) {
        self.current.set(secs);
    }

    pub fn advance(&self, secs: f64) {
        self.current.set(self.current.get() + secs);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        Timestamp(self.current.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_since_clamps_backward_jumps() {
        let earlier = Timestamp::from_secs(10.0);
        let later = Timestamp::from_secs(12.5);

        assert_eq!(later.secs_since(earlier), 2.5);
        assert_eq!(earlier.secs_since(later), 0.0);
    }

    #[test]
    fn test_manual_clock_advance() {
        let clock = ManualClock::new(5.0);
        clock.advance(2.0);
        assert_eq!(clock.now(), Timestamp::from_secs(7.0));

        clock.set(1.0);
        assert_eq!(clock.now().as_secs(), 1.0);
    }

    #[test]
    fn test_system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
