//! Match Replay & Export Library
//!
//! Scripted match (JSON) → tog_core engine → report document
//! (plain-text table, CSV or JSON)

pub mod export;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use tog_core::{MatchCommand, MatchReport, MatchTracker, PositionBoard, Timestamp, TrackerConfig};

pub use export::{render_board, render_csv, render_json, render_table, ExportFormat};

/// A recorded match: the roster and the timestamped commands the UI sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchScript {
    /// Roster to install before replaying (keeps the tracker default if absent)
    #[serde(default)]
    pub roster: Option<Vec<String>>,
    pub commands: Vec<MatchCommand>,
    /// Instant the report is taken at (defaults to the last command's time)
    #[serde(default)]
    pub report_at: Option<Timestamp>,
}

impl MatchScript {
    pub fn from_json_str(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse match script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read match script: {}", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Latest timestamp mentioned by any command.
    pub fn last_timestamp(&self) -> Timestamp {
        self.commands
            .iter()
            .filter_map(MatchCommand::timestamp)
            .fold(Timestamp::ZERO, |acc, t| if t > acc { t } else { acc })
    }
}

/// Final tracker state after a replay.
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub tracker: MatchTracker,
    pub report_at: Timestamp,
    /// Alert texts, in order
    pub notices: Vec<String>,
    /// Commands that did not apply (stale transitions)
    pub skipped: usize,
}

impl ReplayResult {
    pub fn report(&self) -> MatchReport {
        self.tracker.report(self.report_at)
    }

    pub fn board(&self) -> PositionBoard {
        self.tracker.position_board(self.report_at)
    }
}

/// Run every command of the script through a fresh tracker.
pub fn replay(script: &MatchScript, config: TrackerConfig) -> Result<ReplayResult> {
    let mut tracker = MatchTracker::new(config);
    if let Some(roster) = &script.roster {
        tracker.set_roster(roster);
    }

    let mut notices = Vec::new();
    let mut skipped = 0;

    for (i, command) in script.commands.iter().enumerate() {
        let outcome = command
            .apply(&mut tracker)
            .with_context(|| format!("Command #{} ({:?}) failed", i + 1, command))?;

        if let Some(notice) = &outcome.notice {
            notices.push(notice.to_string());
        }
        if !outcome.applied {
            log::debug!("Command #{} skipped: {:?}", i + 1, command);
            skipped += 1;
        }
    }

    let report_at = script.report_at.unwrap_or_else(|| script.last_timestamp());
    log::info!(
        "Replayed {} commands ({} skipped), report at {}",
        script.commands.len(),
        skipped,
        report_at
    );

    Ok(ReplayResult { tracker, report_at, notices, skipped })
}

/// Load an optional YAML/JSON config file; defaults when none is given.
pub fn load_config(path: Option<&Path>) -> Result<TrackerConfig> {
    let Some(path) = path else {
        return Ok(TrackerConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        TrackerConfig::from_json_str(&text)
    } else {
        TrackerConfig::from_yaml_str(&text)
    };
    config.with_context(|| format!("Invalid config file: {}", path.display()))
}

/// Render the report in `format` and write it to `out`, creating parent
/// directories as needed.
pub fn write_report(report: &MatchReport, format: ExportFormat, out: &Path) -> Result<()> {
    let rendered = export::render(report, format)?;

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }
    fs::write(out, rendered)
        .with_context(|| format!("Failed to write report: {}", out.display()))?;

    log::info!("Report written to {}", out.display());
    Ok(())
}
