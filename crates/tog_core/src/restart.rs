//! Restart / undo
//!
//! A snapshot of the ledger is taken whenever a quarter starts. Restarting the
//! quarter rolls the ledger back to it; restarting the match clears
//! everything except the roster.

use std::collections::BTreeMap;

use crate::ledger::{PositionLedger, PositionTimes};
use crate::quarter::QuarterClock;
use crate::rotation::RotationCounter;
use crate::tracker::{MatchNotice, MatchTracker};

/// Ledger copy taken at the start of `quarter`.
#[derive(Debug, Clone, PartialEq)]
pub struct QuarterSnapshot {
    pub quarter: u8,
    pub times: Vec<PositionTimes>,
}

impl QuarterSnapshot {
    pub fn capture(quarter: u8, ledger: &PositionLedger) -> Self {
        Self { quarter, times: ledger.snapshot() }
    }
}

impl MatchTracker {
    /// Roll the current quarter back to its start. Positions and rotations
    /// are kept; the quarter must be started again.
    ///
    /// No-op when the current quarter was never started, or after the match
    /// has finished.
    pub fn restart_quarter(&mut self) -> Option<MatchNotice> {
        let quarter = self.quarters.quarter_number();

        if self.quarters.is_finished() {
            log::warn!("Quarter restart ignored: match finished");
            return None;
        }

        let Some(snapshot) = self.snapshot.as_ref().filter(|s| s.quarter == quarter) else {
            log::warn!("Quarter restart ignored: quarter {} has no snapshot", quarter);
            return None;
        };

        self.ledger.restore(&snapshot.times);
        self.quarters.cancel_current();
        self.quarter_reports.remove(&quarter);
        self.ledger.mark(self.quarters.started_at());

        log::info!("Quarter {} reset", quarter);
        Some(MatchNotice::QuarterReset { quarter })
    }

    /// Clear all match data but keep the player list.
    pub fn restart_match(&mut self) -> MatchNotice {
        let players = self.roster.len();
        self.ledger = PositionLedger::new(players);
        self.rotations = RotationCounter::new(players);
        self.quarters = QuarterClock::new(self.config.quarters);
        self.snapshot = None;
        self.quarter_reports = BTreeMap::new();

        log::info!("Match reset, {} players kept", players);
        MatchNotice::MatchReset
    }
}

#[cfg(test)]
mod tests {
    use crate::clock::Timestamp;
    use crate::position::PositionCategory::*;
    use crate::quarter::QuarterPhase;
    use crate::tracker::{MatchNotice, MatchTracker};

    fn ts(secs: f64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    fn tracker_abcd() -> MatchTracker {
        let mut tracker = MatchTracker::default();
        tracker.set_roster(["A", "B", "C", "D"]);
        tracker
    }

    #[test]
    fn test_restart_first_quarter_clears_progress() {
        let mut tracker = tracker_abcd();
        tracker.start_quarter(ts(0.0));
        tracker.change_position("A", Forward, ts(0.0));
        tracker.change_position("B", Defence, ts(2.0));
        tracker.tick(ts(10.0));

        let notice = tracker.restart_quarter().unwrap();
        assert_eq!(notice, MatchNotice::QuarterReset { quarter: 1 });

        for p in ["A", "B", "C", "D"] {
            assert_eq!(tracker.times_of(p).unwrap().on_field_total(), 0.0);
        }
        let state = tracker.match_state();
        assert_eq!(state.quarter_number, 1);
        assert!(!state.running);
        assert_eq!(state.phase, QuarterPhase::Idle);
        assert_eq!(tracker.quarter_duration(1), None);

        // positions and rotations survive
        assert_eq!(tracker.position_of("A"), Some(Forward));
        assert_eq!(tracker.rotations_of("B"), Some(1));
    }

    #[test]
    fn test_restart_then_start_reproduces_quarter_start_ledger() {
        let mut tracker = tracker_abcd();
        tracker.start_quarter(ts(0.0));
        tracker.change_position("A", Midfield, ts(0.0));
        tracker.end_quarter(ts(20.0));

        tracker.start_quarter(ts(30.0));
        let at_start = tracker.times_of("A").unwrap();
        tracker.change_position("C", Forward, ts(31.0));
        tracker.tick(ts(45.0));
        assert!(tracker.times_of("A").unwrap().midfield > at_start.midfield);

        tracker.restart_quarter();
        tracker.start_quarter(ts(60.0));

        assert_eq!(tracker.times_of("A").unwrap(), at_start);
        assert_eq!(tracker.times_of("C").unwrap().forward, 0.0);
        assert_eq!(tracker.quarter_duration(1), Some(20.0));
        assert_eq!(tracker.match_state().quarter_number, 2);
    }

    #[test]
    fn test_restart_without_snapshot_is_noop() {
        let mut tracker = tracker_abcd();
        assert!(tracker.restart_quarter().is_none());

        tracker.start_quarter(ts(0.0));
        tracker.end_quarter(ts(5.0));
        // quarter 2 has not started yet
        assert!(tracker.restart_quarter().is_none());
        assert_eq!(tracker.quarter_duration(1), Some(5.0));
    }

    #[test]
    fn test_restart_after_finish_is_noop() {
        let mut tracker = tracker_abcd();
        for q in 0..4 {
            let base = q as f64 * 10.0;
            tracker.start_quarter(ts(base));
            tracker.end_quarter(ts(base + 5.0));
        }
        assert!(tracker.restart_quarter().is_none());
        assert_eq!(tracker.quarter_duration(4), Some(5.0));
    }

    #[test]
    fn test_restart_match_keeps_roster() {
        let mut tracker = tracker_abcd();
        tracker.start_quarter(ts(0.0));
        tracker.change_position("A", Forward, ts(0.0));
        tracker.end_quarter(ts(10.0));
        tracker.start_quarter(ts(12.0));

        assert_eq!(tracker.restart_match(), MatchNotice::MatchReset);

        assert_eq!(tracker.roster().names(), &["A", "B", "C", "D"]);
        assert_eq!(tracker.position_of("A"), Some(Off));
        assert_eq!(tracker.rotations_of("A"), Some(0));
        assert_eq!(tracker.times_of("A").unwrap().forward, 0.0);
        assert!(tracker.quarter_durations().is_empty());
        assert!(tracker.quarter_reports().is_empty());
        let state = tracker.match_state();
        assert_eq!(state.quarter_number, 1);
        assert!(!state.running && !state.finished);
        assert!(tracker.restart_quarter().is_none());
    }
}
