//! Position ledger
//!
//! Per-player accumulated seconds in each on-field category, the player's
//! current position, and the timestamp of the last accumulation step. The
//! ledger does not know whether a quarter is running: the tracker decides
//! when accumulation is meaningful.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::position::PositionCategory;

/// Accumulated seconds per on-field category. Bench time is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PositionTimes {
    pub forward: f64,
    pub midfield: f64,
    pub defence: f64,
}

impl PositionTimes {
    pub fn get(&self, position: PositionCategory) -> f64 {
        match position {
            PositionCategory::Forward => self.forward,
            PositionCategory::Midfield => self.midfield,
            PositionCategory::Defence => self.defence,
            PositionCategory::Off => 0.0,
        }
    }

    /// Add time to a category. Adding to `Off` does nothing.
    pub fn add(&mut self, position: PositionCategory, secs: f64) {
        match position {
            PositionCategory::Forward => self.forward += secs,
            PositionCategory::Midfield => self.midfield += secs,
            PositionCategory::Defence => self.defence += secs,
            PositionCategory::Off => {}
        }
    }

    pub fn on_field_total(&self) -> f64 {
        self.forward + self.midfield + self.defence
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PositionLedger {
    times: Vec<PositionTimes>,
    positions: Vec<PositionCategory>,
    last_update: Timestamp,
}

impl PositionLedger {
    /// Empty ledger for `players` players, everyone on the bench.
    pub fn new(players: usize) -> Self {
        Self {
            times: vec![PositionTimes::default(); players],
            positions: vec![PositionCategory::Off; players],
            last_update: Timestamp::ZERO,
        }
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Attribute the time since the last update to every on-field player,
    /// then move the update mark to `now`. Returns the delta applied.
    pub fn accumulate(&mut self, now: Timestamp) -> f64 {
        let delta = now.secs_since(self.last_update);
        if delta > 0.0 {
            for (times, position) in self.times.iter_mut().zip(&self.positions) {
                times.add(*position, delta);
            }
        }
        self.last_update = now;
        delta
    }

    /// Move the update mark without attributing any time.
    pub fn mark(&mut self, now: Timestamp) {
        self.last_update = now;
    }

    pub fn last_update(&self) -> Timestamp {
        self.last_update
    }

    pub fn times(&self, player: usize) -> PositionTimes {
        self.times.get(player).copied().unwrap_or_default()
    }

    /// Times including the not-yet-accumulated delta up to `now`, without
    /// mutating the ledger.
    pub fn projected_times(&self, player: usize, now: Timestamp) -> PositionTimes {
        let mut times = self.times(player);
        times.add(self.position(player), now.secs_since(self.last_update));
        times
    }

    pub fn position(&self, player: usize) -> PositionCategory {
        self.positions.get(player).copied().unwrap_or_default()
    }

    /// Set a player's position, returning the previous one.
    pub fn set_position(&mut self, player: usize, position: PositionCategory) -> PositionCategory {
        match self.positions.get_mut(player) {
            Some(slot) => std::mem::replace(slot, position),
            None => PositionCategory::Off,
        }
    }

    pub fn positions(&self) -> &[PositionCategory] {
        &self.positions
    }

    /// Deep copy of the accumulated times, in roster order.
    pub fn snapshot(&self) -> Vec<PositionTimes> {
        self.times.clone()
    }

    /// Replace accumulated times with a snapshot. Positions are untouched.
    pub fn restore(&mut self, snapshot: &[PositionTimes]) {
        for (times, saved) in self.times.iter_mut().zip(snapshot) {
            *times = *saved;
        }
    }
}
