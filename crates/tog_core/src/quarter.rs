//! Quarter state machine
//!
//! ```text
//! Idle ──start──▶ Running ──end (q < last)──▶ Ended ──start──▶ Running ...
//!                    │
//!                    └──end (q == last)──▶ Finished (terminal)
//! ```
//!
//! The quarter number advances on end, never on start. Recorded durations are
//! kept per quarter and removed again when that quarter is restarted.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clock::Timestamp;
use crate::ledger::PositionTimes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QuarterPhase {
    #[default]
    Idle,
    Running,
    Ended,
    Finished,
}

/// Read-only view of the quarter state for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchState {
    pub quarter_number: u8,
    pub total_quarters: u8,
    pub phase: QuarterPhase,
    pub running: bool,
    pub finished: bool,
    pub started_at: Option<Timestamp>,
}

impl MatchState {
    /// Ending this quarter ends the match ("End Match" rather than "End Quarter").
    pub fn is_last_quarter(&self) -> bool {
        self.quarter_number == self.total_quarters
    }
}

/// Result of a successful end transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarterEnd {
    pub quarter: u8,
    pub duration_secs: f64,
    pub finished: bool,
}

/// Ledger copy taken when a quarter ends. Informational only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterLedgerReport {
    pub quarter: u8,
    pub players: Vec<PlayerTimes>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTimes {
    pub player: String,
    pub times: PositionTimes,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuarterClock {
    quarter_number: u8,
    total_quarters: u8,
    phase: QuarterPhase,
    started_at: Timestamp,
    durations: BTreeMap<u8, f64>,
}

impl QuarterClock {
    pub fn new(total_quarters: u8) -> Self {
        Self {
            quarter_number: 1,
            total_quarters: total_quarters.max(1),
            phase: QuarterPhase::Idle,
            started_at: Timestamp::ZERO,
            durations: BTreeMap::new(),
        }
    }

    pub fn quarter_number(&self) -> u8 {
        self.quarter_number
    }

    pub fn total_quarters(&self) -> u8 {
        self.total_quarters
    }

    pub fn phase(&self) -> QuarterPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == QuarterPhase::Running
    }

    pub fn is_finished(&self) -> bool {
        self.phase == QuarterPhase::Finished
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn state(&self) -> MatchState {
        MatchState {
            quarter_number: self.quarter_number,
            total_quarters: self.total_quarters,
            phase: self.phase,
            running: self.is_running(),
            finished: self.is_finished(),
            started_at: self.is_running().then_some(self.started_at),
        }
    }

    /// Idle/Ended → Running. Returns false (no-op) when running or finished.
    pub fn start(&mut self, now: Timestamp) -> bool {
        match self.phase {
            QuarterPhase::Idle | QuarterPhase::Ended => {
                self.phase = QuarterPhase::Running;
                self.started_at = now;
                true
            }
            QuarterPhase::Running | QuarterPhase::Finished => false,
        }
    }

    /// Running → Ended, or Running → Finished on the last quarter.
    pub fn end(&mut self, now: Timestamp) -> Option<QuarterEnd> {
        if !self.is_running() {
            return None;
        }

        let quarter = self.quarter_number;
        let duration_secs = now.secs_since(self.started_at);
        self.durations.insert(quarter, duration_secs);

        let finished = quarter >= self.total_quarters;
        if finished {
            self.phase = QuarterPhase::Finished;
        } else {
            self.phase = QuarterPhase::Ended;
            self.quarter_number += 1;
        }

        Some(QuarterEnd { quarter, duration_secs, finished })
    }

    /// Abandon the current quarter: back to Idle with its duration removed.
    pub fn cancel_current(&mut self) {
        self.durations.remove(&self.quarter_number);
        self.phase = QuarterPhase::Idle;
        self.started_at = Timestamp::ZERO;
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.total_quarters);
    }

    /// Elapsed time of the running quarter, 0 otherwise.
    pub fn live_elapsed(&self, now: Timestamp) -> f64 {
        if self.is_running() {
            now.secs_since(self.started_at)
        } else {
            0.0
        }
    }

    pub fn duration(&self, quarter: u8) -> Option<f64> {
        self.durations.get(&quarter).copied()
    }

    pub fn durations(&self) -> &BTreeMap<u8, f64> {
        &self.durations
    }

    /// Recorded length of completed quarters plus the live one.
    pub fn total_match_secs(&self, now: Timestamp) -> f64 {
        self.durations.values().sum::<f64>() + self.live_elapsed(now)
    }

    /// Length of one quarter as of `now`: recorded if completed, live if
    /// running, zero if not reached.
    pub fn quarter_length(&self, quarter: u8, now: Timestamp) -> f64 {
        if quarter == self.quarter_number && self.is_running() {
            return self.live_elapsed(now);
        }
        self.duration(quarter).unwrap_or(0.0)
    }
}
