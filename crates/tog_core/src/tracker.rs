//! Match tracker
//!
//! Explicit match state: roster, position ledger, rotation counts, quarter
//! state machine and the restart snapshot. Every operation takes the current
//! timestamp, runs to completion and either returns a [`MatchNotice`] or
//! `None` when the request did not apply (stale UI state, unknown player,
//! finished match). Nothing here fails hard.

use std::collections::BTreeMap;
use std::fmt;

use crate::clock::Timestamp;
use crate::config::TrackerConfig;
use crate::ledger::{PositionLedger, PositionTimes};
use crate::position::PositionCategory;
use crate::quarter::{MatchState, PlayerTimes, QuarterClock, QuarterLedgerReport};
use crate::report::format_elapsed;
use crate::restart::QuarterSnapshot;
use crate::roster::Roster;
use crate::rotation::RotationCounter;

/// What a transition did, with the alert text shown to the coach.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchNotice {
    RosterSaved { players: usize },
    PositionChanged {
        player: String,
        from: PositionCategory,
        to: PositionCategory,
        rotation_credited: bool,
    },
    QuarterStarted { quarter: u8 },
    QuarterEnded { quarter: u8, duration_secs: f64 },
    MatchFinished { duration_secs: f64 },
    QuarterReset { quarter: u8 },
    MatchReset,
}

impl fmt::Display for MatchNotice {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchNotice::RosterSaved { .. } => write!(f, "Settings saved!"),
            MatchNotice::PositionChanged { player, from, to, .. } => {
                write!(f, "{}: {} → {}", player, from.short_label(), to.short_label())
            }
            MatchNotice::QuarterStarted { quarter } => write!(f, "Quarter {} started!", quarter),
            MatchNotice::QuarterEnded { quarter, .. } => write!(f, "Quarter {} ended.", quarter),
            MatchNotice::MatchFinished { .. } => write!(f, "Match Finished!"),
            MatchNotice::QuarterReset { quarter } => {
                write!(f, "Quarter {} reset. Press Start to begin.", quarter)
            }
            MatchNotice::MatchReset => write!(f, "Match reset! Player list preserved."),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MatchTracker {
    pub(crate) config: TrackerConfig,
    pub(crate) roster: Roster,
    pub(crate) ledger: PositionLedger,
    pub(crate) rotations: RotationCounter,
    pub(crate) quarters: QuarterClock,
    pub(crate) snapshot: Option<QuarterSnapshot>,
    pub(crate) quarter_reports: BTreeMap<u8, QuarterLedgerReport>,
}

impl Default for MatchTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}

impl MatchTracker {
    /// Fresh tracker seeded with the configured default roster.
    pub fn new(config: TrackerConfig) -> Self {
        let roster = Roster::from_names(&config.default_roster, config.max_roster);
        Self::with_roster(config, roster)
    }

    pub fn with_roster(config: TrackerConfig, roster: Roster) -> Self {
        let players = roster.len();
        let quarters = QuarterClock::new(config.quarters);
        Self {
            config,
            roster,
            ledger: PositionLedger::new(players),
            rotations: RotationCounter::new(players),
            quarters,
            snapshot: None,
            quarter_reports: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn match_state(&self) -> MatchState {
        self.quarters.state()
    }

    pub fn is_running(&self) -> bool {
        self.quarters.is_running()
    }

    pub fn position_of(&self, player: &str) -> Option<PositionCategory> {
        self.roster.index_of(player).map(|i| self.ledger.position(i))
    }

    pub fn times_of(&self, player: &str) -> Option<PositionTimes> {
        self.roster.index_of(player).map(|i| self.ledger.times(i))
    }

    pub fn rotations_of(&self, player: &str) -> Option<u32> {
        self.roster.index_of(player).map(|i| self.rotations.count(i))
    }

    pub fn quarter_duration(&self, quarter: u8) -> Option<f64> {
        self.quarters.duration(quarter)
    }

    pub fn quarter_durations(&self) -> &BTreeMap<u8, f64> {
        self.quarters.durations()
    }

    pub fn quarter_reports(&self) -> &BTreeMap<u8, QuarterLedgerReport> {
        &self.quarter_reports
    }

    /// Running-quarter clock as `MM:SS`; `00:00` when stopped.
    pub fn quarter_clock(&self, now: Timestamp) -> String {
        format_elapsed(self.quarters.live_elapsed(now))
    }

    /// Replace the roster. All per-player and per-quarter state starts over.
    pub fn set_roster<I, S>(&mut self, names: I) -> MatchNotice
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let roster = Roster::from_names(names, self.config.max_roster);
        self.install_roster(roster)
    }

    /// Settings text area input: one name per line.
    pub fn set_roster_text(&mut self, text: &str) -> MatchNotice {
        let roster = Roster::parse_lines(text, self.config.max_roster);
        self.install_roster(roster)
    }

    fn install_roster(&mut self, roster: Roster) -> MatchNotice {
        let players = roster.len();
        *self = Self::with_roster(self.config.clone(), roster);
        log::info!("Roster saved with {} players", players);
        MatchNotice::RosterSaved { players }
    }

    /// Move a player to a new position, accumulating time up to `now` first.
    pub fn change_position(
        &mut self,
        player: &str,
        position: PositionCategory,
        now: Timestamp,
    ) -> Option<MatchNotice> {
        let Some(index) = self.roster.index_of(player) else {
            log::warn!("Position change for unknown player '{}' ignored", player);
            return None;
        };

        let running = self.quarters.is_running();
        if running {
            self.ledger.accumulate(now);
        }

        let from = self.ledger.set_position(index, position);
        let rotation_credited = self.rotations.record_change(index, from, position, running);
        self.ledger.mark(now);

        log::debug!(
            "{}: {} -> {} at {} (rotation: {})",
            player,
            from.short_label(),
            position.short_label(),
            now,
            rotation_credited
        );

        Some(MatchNotice::PositionChanged {
            player: player.to_string(),
            from,
            to: position,
            rotation_credited,
        })
    }

    /// Start the current quarter. No-op while running or after the match.
    pub fn start_quarter(&mut self, now: Timestamp) -> Option<MatchNotice> {
        if !self.quarters.start(now) {
            log::warn!(
                "Start ignored: quarter {} is {:?}",
                self.quarters.quarter_number(),
                self.quarters.phase()
            );
            return None;
        }

        let quarter = self.quarters.quarter_number();
        self.ledger.mark(now);
        self.snapshot = Some(QuarterSnapshot::capture(quarter, &self.ledger));
        let credited = self.rotations.credit_on_field(self.ledger.positions());

        log::info!("Quarter {} started at {} ({} on field)", quarter, now, credited);
        Some(MatchNotice::QuarterStarted { quarter })
    }

    /// End the running quarter; the last quarter finishes the match.
    pub fn end_quarter(&mut self, now: Timestamp) -> Option<MatchNotice> {
        if !self.quarters.is_running() {
            log::warn!("End ignored: no quarter running");
            return None;
        }

        self.ledger.accumulate(now);
        let end = self.quarters.end(now)?;
        self.quarter_reports.insert(end.quarter, self.ledger_report(end.quarter));

        log::info!(
            "Quarter {} ended after {}{}",
            end.quarter,
            format_elapsed(end.duration_secs),
            if end.finished { " (match finished)" } else { "" }
        );

        if end.finished {
            Some(MatchNotice::MatchFinished { duration_secs: end.duration_secs })
        } else {
            Some(MatchNotice::QuarterEnded {
                quarter: end.quarter,
                duration_secs: end.duration_secs,
            })
        }
    }

    /// Periodic clock pulse. Only accumulates while a quarter runs; returns
    /// whether anything was accumulated.
    pub fn tick(&mut self, now: Timestamp) -> bool {
        if !self.quarters.is_running() {
            return false;
        }
        let delta = self.ledger.accumulate(now);
        log::debug!("Tick at {} (+{:.3}s)", now, delta);
        true
    }

    fn ledger_report(&self, quarter: u8) -> QuarterLedgerReport {
        QuarterLedgerReport {
            quarter,
            players: self
                .roster
                .iter()
                .enumerate()
                .map(|(i, name)| PlayerTimes { player: name.to_string(), times: self.ledger.times(i) })
                .collect(),
        }
    }
}
