//! Live session
//!
//! Binds a [`Clock`] to a [`MatchTracker`] and owns the periodic tick. The
//! tick is armed only while a quarter runs and is dropped on any transition
//! out of `Running`.

use crate::clock::{Clock, Timestamp};
use crate::position::PositionCategory;
use crate::quarter::MatchState;
use crate::report::{MatchReport, PositionBoard};
use crate::tracker::{MatchNotice, MatchTracker};

/// When the next tick is due. `None` whenever the quarter is not running.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSchedule {
    interval_secs: f64,
    next_due: Option<Timestamp>,
}

impl TickSchedule {
    pub fn new(interval_secs: f64) -> Self {
        Self { interval_secs, next_due: None }
    }

    pub fn next_due(&self) -> Option<Timestamp> {
        self.next_due
    }

    /// Arm after entering `Running`, disarm after leaving it.
    pub fn sync(&mut self, running: bool, now: Timestamp) {
        match (running, self.next_due) {
            (true, None) => self.next_due = Some(now.add_secs(self.interval_secs)),
            (false, Some(_)) => self.next_due = None,
            _ => {}
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_due.is_some_and(|due| now >= due)
    }

    fn fired(&mut self, now: Timestamp) {
        self.next_due = Some(now.add_secs(self.interval_secs));
    }
}

pub struct LiveSession<C: Clock> {
    tracker: MatchTracker,
    clock: C,
    schedule: TickSchedule,
}

impl<C: Clock> LiveSession<C> {
    pub fn new(tracker: MatchTracker, clock: C) -> Self {
        let schedule = TickSchedule::new(tracker.config().tick_interval_secs());
        Self { tracker, clock, schedule }
    }

    pub fn tracker(&self) -> &MatchTracker {
        &self.tracker
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn schedule(&self) -> &TickSchedule {
        &self.schedule
    }

    pub fn into_tracker(self) -> MatchTracker {
        self.tracker
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    fn after_transition(&mut self, now: Timestamp) {
        self.schedule.sync(self.tracker.is_running(), now);
    }

    pub fn change_position(
        &mut self,
        player: &str,
        position: PositionCategory,
    ) -> Option<MatchNotice> {
        let now = self.now();
        self.tracker.change_position(player, position, now)
    }

    pub fn start_quarter(&mut self) -> Option<MatchNotice> {
        let now = self.now();
        let notice = self.tracker.start_quarter(now);
        self.after_transition(now);
        notice
    }

    pub fn end_quarter(&mut self) -> Option<MatchNotice> {
        let now = self.now();
        let notice = self.tracker.end_quarter(now);
        self.after_transition(now);
        notice
    }

    pub fn restart_quarter(&mut self) -> Option<MatchNotice> {
        let now = self.now();
        let notice = self.tracker.restart_quarter();
        self.after_transition(now);
        notice
    }

    pub fn restart_match(&mut self) -> MatchNotice {
        let now = self.now();
        let notice = self.tracker.restart_match();
        self.after_transition(now);
        notice
    }

    pub fn set_roster_text(&mut self, text: &str) -> MatchNotice {
        let now = self.now();
        let notice = self.tracker.set_roster_text(text);
        self.after_transition(now);
        notice
    }

    /// Tick if one is due. Returns whether a tick ran.
    pub fn poll(&mut self) -> bool {
        let now = self.now();
        if !self.schedule.is_due(now) {
            return false;
        }
        let ticked = self.tracker.tick(now);
        self.schedule.fired(now);
        ticked
    }

    pub fn report(&self) -> MatchReport {
        self.tracker.report(self.now())
    }

    pub fn position_board(&self) -> PositionBoard {
        self.tracker.position_board(self.now())
    }

    pub fn match_state(&self) -> MatchState {
        self.tracker.match_state()
    }
}
