//! # tog_core - Time on Ground Accounting Engine
//!
//! Tracks how long each player spends in each on-field position during a
//! match played in quarters, and derives live and final participation
//! reports.
//!
//! ## Features
//! - Explicit match state; every transition takes the current timestamp
//! - Deterministic replay of any event sequence
//! - Quarter restart (roll back to quarter start) and match restart
//! - JSON command API for UI integration

pub mod api;
pub mod clock;
pub mod config;
pub mod error;
pub mod ledger;
pub mod position;
pub mod quarter;
pub mod report;
pub mod restart;
pub mod roster;
pub mod rotation;
pub mod session;
pub mod tracker;

pub use api::{execute_match_command_json, MatchCommand, MatchCommandRequest, MatchCommandResponse};
pub use clock::{Clock, ManualClock, SystemClock, Timestamp};
pub use config::TrackerConfig;
pub use error::{Result, TrackerError};
pub use ledger::{PositionLedger, PositionTimes};
pub use position::PositionCategory;
pub use quarter::{MatchState, QuarterLedgerReport, QuarterPhase};
pub use report::{
    format_elapsed, FormattedReportRow, MatchReport, PlayerReportRow, PositionBoard,
    QuarterLengths,
};
pub use roster::Roster;
pub use session::{LiveSession, TickSchedule};
pub use tracker::{MatchNotice, MatchTracker};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;
    use PositionCategory::*;

    fn ts(secs: f64) -> Timestamp {
        Timestamp::from_secs(secs)
    }

    fn tracker_abcd() -> MatchTracker {
        let mut tracker = MatchTracker::default();
        tracker.set_roster(["A", "B", "C", "D"]);
        tracker
    }

    #[test]
    fn test_full_match_walkthrough() {
        let mut tracker = tracker_abcd();
        tracker.change_position("A", Forward, ts(0.0));
        tracker.change_position("B", Midfield, ts(0.0));

        // Q1: A and B on from the start, C replaces B halfway
        tracker.start_quarter(ts(0.0));
        tracker.change_position("B", Off, ts(300.0));
        tracker.change_position("C", Midfield, ts(300.0));
        tracker.end_quarter(ts(600.0));

        // Q2: D in defence for the whole quarter
        tracker.change_position("D", Defence, ts(650.0));
        tracker.start_quarter(ts(700.0));
        tracker.tick(ts(1000.0));
        tracker.end_quarter(ts(1300.0));

        let report = tracker.report(ts(1300.0));
        assert_eq!(report.total_match_secs, 1200.0);

        let a = report.row("A").unwrap();
        assert_eq!(a.forward_secs, 1200.0);
        assert_eq!(a.rotations, 2);
        assert_eq!(a.percentage, 100.0);

        let b = report.row("B").unwrap();
        assert_eq!(b.midfield_secs, 300.0);
        assert_eq!(b.rotations, 1);

        let c = report.row("C").unwrap();
        assert_eq!(c.midfield_secs, 900.0);
        assert_eq!(c.rotations, 2);

        let d = report.row("D").unwrap();
        assert_eq!(d.defence_secs, 600.0);
        assert_eq!(d.percentage, 50.0);
        assert_eq!(d.rotations, 1);

        assert_eq!(report.rows[0].player, "A");
        assert_eq!(report.quarter_lengths.quarters, vec![600.0, 600.0, 0.0, 0.0]);
        assert_eq!(tracker.match_state().quarter_number, 3);
    }

    #[test]
    fn test_replay_is_deterministic() {
        let script = |tracker: &mut MatchTracker| {
            tracker.start_quarter(ts(0.0));
            tracker.change_position("A", Forward, ts(1.5));
            tracker.change_position("B", Defence, ts(2.25));
            tracker.tick(ts(3.0));
            tracker.change_position("A", Off, ts(7.75));
            tracker.end_quarter(ts(9.0));
        };

        let mut first = tracker_abcd();
        let mut second = tracker_abcd();
        script(&mut first);
        script(&mut second);

        assert_eq!(first.report(ts(9.0)), second.report(ts(9.0)));
    }
}

#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Step {
        Move { player: usize, position: PositionCategory, gap: f64 },
        Tick { gap: f64 },
    }

    fn position() -> impl Strategy<Value = PositionCategory> {
        prop_oneof![
            Just(PositionCategory::Forward),
            Just(PositionCategory::Midfield),
            Just(PositionCategory::Defence),
            Just(PositionCategory::Off),
        ]
    }

    fn step() -> impl Strategy<Value = Step> {
        prop_oneof![
            (0usize..4, position(), 0.0f64..30.0)
                .prop_map(|(player, position, gap)| Step::Move { player, position, gap }),
            (0.0f64..30.0).prop_map(|gap| Step::Tick { gap }),
        ]
    }

    const NAMES: [&str; 4] = ["A", "B", "C", "D"];

    proptest! {
        /// Property: every second of a running quarter is attributed to
        /// exactly the position the player held, no more and no less
        #[test]
        fn prop_no_time_double_counted_or_dropped(steps in prop::collection::vec(step(), 1..40)) {
            let mut tracker = MatchTracker::default();
            tracker.set_roster(NAMES);
            tracker.start_quarter(Timestamp::ZERO);

            let mut now = 0.0;
            let mut positions = [PositionCategory::Off; 4];
            let mut expected = [PositionTimes::default(); 4];
            let mut off_to_on = [0u32; 4];

            for s in &steps {
                let gap = match s { Step::Move { gap, .. } | Step::Tick { gap } => *gap };
                for (times, pos) in expected.iter_mut().zip(&positions) {
                    times.add(*pos, gap);
                }
                now += gap;
                match s {
                    Step::Move { player, position, .. } => {
                        if !positions[*player].is_on_field() && position.is_on_field() {
                            off_to_on[*player] += 1;
                        }
                        positions[*player] = *position;
                        tracker.change_position(NAMES[*player], *position, Timestamp::from_secs(now));
                    }
                    Step::Tick { .. } => {
                        tracker.tick(Timestamp::from_secs(now));
                    }
                }
            }
            tracker.end_quarter(Timestamp::from_secs(now));

            for (i, name) in NAMES.iter().enumerate() {
                let actual = tracker.times_of(name).unwrap();
                prop_assert!((actual.forward - expected[i].forward).abs() < 1e-6);
                prop_assert!((actual.midfield - expected[i].midfield).abs() < 1e-6);
                prop_assert!((actual.defence - expected[i].defence).abs() < 1e-6);
                prop_assert!(actual.on_field_total() <= now + 1e-6);
                prop_assert_eq!(tracker.rotations_of(name).unwrap(), off_to_on[i]);
            }
        }

        /// Property: total match time equals completed quarters plus live
        /// elapsed, and percentages stay within 0..=100
        #[test]
        fn prop_total_match_secs_consistent(
            lengths in prop::collection::vec(0.0f64..900.0, 1..4),
            live in 0.0f64..900.0
        ) {
            let mut tracker = MatchTracker::default();
            tracker.set_roster(NAMES);
            tracker.change_position("A", PositionCategory::Forward, Timestamp::ZERO);

            let mut now = 0.0;
            for len in &lengths {
                tracker.start_quarter(Timestamp::from_secs(now));
                now += len;
                tracker.end_quarter(Timestamp::from_secs(now));
                now += 60.0;
            }
            tracker.start_quarter(Timestamp::from_secs(now));
            let query = Timestamp::from_secs(now + live);

            let expected: f64 = lengths.iter().sum::<f64>() + live;
            let report = tracker.report(query);
            prop_assert!((report.total_match_secs - expected).abs() < 1e-6);
            for row in &report.rows {
                prop_assert!(row.percentage >= 0.0 && row.percentage <= 100.0 + 1e-9);
                if report.total_match_secs == 0.0 {
                    prop_assert_eq!(row.percentage, 0.0);
                }
            }
        }

        /// Property: restart then start reproduces the quarter-start ledger
        #[test]
        fn prop_restart_quarter_roundtrip(steps in prop::collection::vec(step(), 0..20)) {
            let mut tracker = MatchTracker::default();
            tracker.set_roster(NAMES);
            tracker.change_position("B", PositionCategory::Midfield, Timestamp::ZERO);
            tracker.start_quarter(Timestamp::ZERO);
            tracker.end_quarter(Timestamp::from_secs(100.0));
            tracker.start_quarter(Timestamp::from_secs(120.0));

            let at_start: Vec<PositionTimes> =
                NAMES.iter().map(|n| tracker.times_of(n).unwrap()).collect();

            let mut now = 120.0;
            for s in &steps {
                match s {
                    Step::Move { player, position, gap } => {
                        now += gap;
                        tracker.change_position(NAMES[*player], *position, Timestamp::from_secs(now));
                    }
                    Step::Tick { gap } => {
                        now += gap;
                        tracker.tick(Timestamp::from_secs(now));
                    }
                }
            }

            prop_assert!(tracker.restart_quarter().is_some());
            tracker.start_quarter(Timestamp::from_secs(now + 5.0));

            let after: Vec<PositionTimes> =
                NAMES.iter().map(|n| tracker.times_of(n).unwrap()).collect();
            prop_assert_eq!(at_start, after);
            prop_assert_eq!(tracker.match_state().quarter_number, 2);
        }
    }
}
