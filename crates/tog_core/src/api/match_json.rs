// Match command JSON API
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::clock::Timestamp;
use crate::error::{Result, TrackerError};
use crate::position::PositionCategory;
use crate::quarter::{MatchState, QuarterLedgerReport};
use crate::report::{FormattedReportRow, MatchReport, PositionBoard};
use crate::tracker::{MatchNotice, MatchTracker};
use crate::SCHEMA_VERSION;

/// Command request sent by the presentation layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCommandRequest {
    pub schema_version: u8,
    pub command: MatchCommand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// Replace the roster from a list of names
    SetRoster { names: Vec<String> },

    /// Replace the roster from the settings text area (one name per line)
    SetRosterText { text: String },

    /// Move a player; `position` is `FWD`/`MID`/`DEF`/`Off` or a full name
    ChangePosition { player: String, position: String, now: Timestamp },

    StartQuarter { now: Timestamp },

    EndQuarter { now: Timestamp },

    /// Live clock pulse
    Tick { now: Timestamp },

    RestartQuarter,

    RestartMatch,

    /// Report table, quarter lengths and position board as of `now`
    GetReport { now: Timestamp },

    GetState,
}

/// What applying a command produced, before serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub applied: bool,
    pub notice: Option<MatchNotice>,
    pub report: Option<MatchReport>,
    pub board: Option<PositionBoard>,
}

impl CommandOutcome {
    fn from_notice(notice: Option<MatchNotice>) -> Self {
        Self { applied: notice.is_some(), notice, report: None, board: None }
    }

    fn query() -> Self {
        Self { applied: true, notice: None, report: None, board: None }
    }
}

impl MatchCommand {
    /// Timestamp carried by the command, if time matters for it.
    pub fn timestamp(&self) -> Option<Timestamp> {
        match self {
            MatchCommand::ChangePosition { now, .. }
            | MatchCommand::StartQuarter { now }
            | MatchCommand::EndQuarter { now }
            | MatchCommand::Tick { now }
            | MatchCommand::GetReport { now } => Some(*now),
            _ => None,
        }
    }

    pub fn apply(&self, tracker: &mut MatchTracker) -> Result<CommandOutcome> {
        let outcome = match self {
            MatchCommand::SetRoster { names } => {
                CommandOutcome::from_notice(Some(tracker.set_roster(names)))
            }
            MatchCommand::SetRosterText { text } => {
                CommandOutcome::from_notice(Some(tracker.set_roster_text(text)))
            }
            MatchCommand::ChangePosition { player, position, now } => {
                let position: PositionCategory = position.parse()?;
                CommandOutcome::from_notice(tracker.change_position(player, position, *now))
            }
            MatchCommand::StartQuarter { now } => {
                CommandOutcome::from_notice(tracker.start_quarter(*now))
            }
            MatchCommand::EndQuarter { now } => {
                CommandOutcome::from_notice(tracker.end_quarter(*now))
            }
            MatchCommand::Tick { now } => CommandOutcome {
                applied: tracker.tick(*now),
                notice: None,
                report: None,
                board: None,
            },
            MatchCommand::RestartQuarter => CommandOutcome::from_notice(tracker.restart_quarter()),
            MatchCommand::RestartMatch => {
                CommandOutcome::from_notice(Some(tracker.restart_match()))
            }
            MatchCommand::GetReport { now } => {
                let mut outcome = CommandOutcome::query();
                outcome.report = Some(tracker.report(*now));
                outcome.board = Some(tracker.position_board(*now));
                outcome
            }
            MatchCommand::GetState => CommandOutcome::query(),
        };
        Ok(outcome)
    }
}

/// Response sent back to the presentation layer
#[derive(Debug, Serialize)]
pub struct MatchCommandResponse {
    pub schema_version: u8,
    pub success: bool,
    /// False when the command was a no-op (e.g. start after the match ended)
    pub applied: bool,
    /// Alert text for the coach
    pub notice: Option<String>,
    pub state: MatchState,
    pub report: Option<MatchReport>,
    pub report_rows: Option<Vec<FormattedReportRow>>,
    pub board: Option<PositionBoard>,
    pub quarter_reports: Option<BTreeMap<u8, QuarterLedgerReport>>,
    pub error_message: Option<String>,
}

impl MatchCommandResponse {
    fn error(tracker: &MatchTracker, err: &TrackerError) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            success: false,
            applied: false,
            notice: None,
            state: tracker.match_state(),
            report: None,
            report_rows: None,
            board: None,
            quarter_reports: None,
            error_message: Some(err.to_string()),
        }
    }
}

/// Main entry point: apply one JSON command to the tracker and return a JSON
/// response. Input errors come back as `success: false` responses.
pub fn execute_match_command_json(tracker: &mut MatchTracker, request_json: &str) -> Result<String> {
    let result = parse_request(request_json).and_then(|req| {
        let include_history = matches!(req.command, MatchCommand::GetState);
        req.command.apply(tracker).map(|outcome| (outcome, include_history))
    });

    let response = match result {
        Ok((outcome, include_history)) => MatchCommandResponse {
            schema_version: SCHEMA_VERSION,
            success: true,
            applied: outcome.applied,
            notice: outcome.notice.as_ref().map(ToString::to_string),
            state: tracker.match_state(),
            report_rows: outcome.report.as_ref().map(MatchReport::formatted_rows),
            report: outcome.report,
            board: outcome.board,
            quarter_reports: include_history.then(|| tracker.quarter_reports().clone()),
            error_message: None,
        },
        Err(err) if err.is_input_error() => {
            log::warn!("Rejected match command: {}", err);
            MatchCommandResponse::error(tracker, &err)
        }
        Err(err) => return Err(err),
    };

    serde_json::to_string(&response).map_err(TrackerError::from)
}

fn parse_request(request_json: &str) -> Result<MatchCommandRequest> {
    let request: MatchCommandRequest = serde_json::from_str(request_json)?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(TrackerError::SchemaVersion {
            found: request.schema_version,
            expected: SCHEMA_VERSION,
        });
    }
    Ok(request)
}
