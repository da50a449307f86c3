//! Report generator
//!
//! Read-only projections over the tracker at a given instant: the sorted
//! player table, the quarter-length table and the position board. Nothing is
//! cached; every call recomputes from the ledger. While a quarter runs, time
//! not yet folded in by a tick is projected up to `now`.

use serde::{Deserialize, Serialize};

use crate::clock::Timestamp;
use crate::ledger::PositionTimes;
use crate::position::PositionCategory;
use crate::quarter::MatchState;
use crate::tracker::MatchTracker;

/// `MM:SS`, truncating fractional seconds.
pub fn format_elapsed(secs: f64) -> String {
    let whole = if secs.is_finite() && secs > 0.0 { secs as u64 } else { 0 };
    format!("{:02}:{:02}", whole / 60, whole % 60)
}

/// Share of match time, 0 when no match time has elapsed.
pub fn percentage_of(on_field_secs: f64, total_match_secs: f64) -> f64 {
    if total_match_secs > 0.0 {
        on_field_secs / total_match_secs * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReportRow {
    pub player: String,
    pub forward_secs: f64,
    pub midfield_secs: f64,
    pub defence_secs: f64,
    pub total_secs: f64,
    pub percentage: f64,
    pub rotations: u32,
}

impl PlayerReportRow {
    fn new(player: &str, times: PositionTimes, total_match_secs: f64, rotations: u32) -> Self {
        let total_secs = times.on_field_total();
        Self {
            player: player.to_string(),
            forward_secs: times.forward,
            midfield_secs: times.midfield,
            defence_secs: times.defence,
            total_secs,
            percentage: percentage_of(total_secs, total_match_secs),
            rotations,
        }
    }

    pub fn formatted(&self) -> FormattedReportRow {
        FormattedReportRow {
            player: self.player.clone(),
            forward: format_elapsed(self.forward_secs),
            midfield: format_elapsed(self.midfield_secs),
            defence: format_elapsed(self.defence_secs),
            total: format_elapsed(self.total_secs),
            percentage: format!("{:.0}%", self.percentage),
            rotations: self.rotations,
        }
    }
}

/// Display form of a report row, with the table's column headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedReportRow {
    #[serde(rename = "Player")]
    pub player: String,
    #[serde(rename = "FWD")]
    pub forward: String,
    #[serde(rename = "MID")]
    pub midfield: String,
    #[serde(rename = "DEF")]
    pub defence: String,
    #[serde(rename = "Total")]
    pub total: String,
    #[serde(rename = "Pct (Game)")]
    pub percentage: String,
    #[serde(rename = "Rotations")]
    pub rotations: u32,
}

impl FormattedReportRow {
    pub const HEADERS: [&'static str; 7] =
        ["Player", "FWD", "MID", "DEF", "Total", "Pct (Game)", "Rotations"];

    pub fn cells(&self) -> [String; 7] {
        [
            self.player.clone(),
            self.forward.clone(),
            self.midfield.clone(),
            self.defence.clone(),
            self.total.clone(),
            self.percentage.clone(),
            self.rotations.to_string(),
        ]
    }
}

/// Q1..Qn lengths and their sum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterLengths {
    pub quarters: Vec<f64>,
    pub total: f64,
}

impl QuarterLengths {
    /// `(label, MM:SS)` pairs: `Q1`..`Qn` then `Total`.
    pub fn formatted(&self) -> Vec<(String, String)> {
        let mut cells: Vec<(String, String)> = self
            .quarters
            .iter()
            .enumerate()
            .map(|(i, secs)| (format!("Q{}", i + 1), format_elapsed(*secs)))
            .collect();
        cells.push(("Total".to_string(), format_elapsed(self.total)));
        cells
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub state: MatchState,
    pub total_match_secs: f64,
    /// Sorted by percentage, highest first; ties keep roster order.
    pub rows: Vec<PlayerReportRow>,
    pub quarter_lengths: QuarterLengths,
}

impl MatchReport {
    pub fn formatted_rows(&self) -> Vec<FormattedReportRow> {
        self.rows.iter().map(PlayerReportRow::formatted).collect()
    }

    pub fn row(&self, player: &str) -> Option<&PlayerReportRow> {
        self.rows.iter().find(|r| r.player == player)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardEntry {
    pub player: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardColumn {
    pub position: PositionCategory,
    pub players: Vec<BoardEntry>,
}

/// Players grouped by current position, bench first. The bench lists the
/// least-used players first; field columns list the most-used first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionBoard {
    pub columns: Vec<BoardColumn>,
}

impl PositionBoard {
    pub fn column(&self, position: PositionCategory) -> Option<&BoardColumn> {
        self.columns.iter().find(|c| c.position == position)
    }
}

impl MatchTracker {
    /// Completed quarter durations plus the live one.
    pub fn total_match_secs(&self, now: Timestamp) -> f64 {
        self.quarters.total_match_secs(now)
    }

    fn live_times(&self, player: usize, now: Timestamp) -> PositionTimes {
        if self.quarters.is_running() {
            self.ledger.projected_times(player, now)
        } else {
            self.ledger.times(player)
        }
    }

    fn percentages(&self, now: Timestamp) -> Vec<f64> {
        let total = self.total_match_secs(now);
        (0..self.roster.len())
            .map(|i| percentage_of(self.live_times(i, now).on_field_total(), total))
            .collect()
    }

    pub fn report(&self, now: Timestamp) -> MatchReport {
        let total_match_secs = self.total_match_secs(now);

        let mut rows: Vec<PlayerReportRow> = self
            .roster
            .iter()
            .enumerate()
            .map(|(i, name)| {
                PlayerReportRow::new(
                    name,
                    self.live_times(i, now),
                    total_match_secs,
                    self.rotations.count(i),
                )
            })
            .collect();
        rows.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

        MatchReport {
            state: self.match_state(),
            total_match_secs,
            rows,
            quarter_lengths: self.quarter_lengths(now),
        }
    }

    pub fn quarter_lengths(&self, now: Timestamp) -> QuarterLengths {
        let quarters: Vec<f64> = (1..=self.quarters.total_quarters())
            .map(|q| self.quarters.quarter_length(q, now))
            .collect();
        let total = quarters.iter().sum();
        QuarterLengths { quarters, total }
    }

    pub fn position_board(&self, now: Timestamp) -> PositionBoard {
        let percentages = self.percentages(now);

        let columns = PositionCategory::BOARD_ORDER
            .iter()
            .map(|&position| {
                let mut players: Vec<BoardEntry> = self
                    .roster
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| self.ledger.position(*i) == position)
                    .map(|(i, name)| BoardEntry { player: name.to_string(), percentage: percentages[i] })
                    .collect();

                if position.is_on_field() {
                    players.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
                } else {
                    players.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
                }
                BoardColumn { position, players }
            })
            .collect();

        PositionBoard { columns }
    }
}
