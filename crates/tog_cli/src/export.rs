//! Report rendering: plain-text table, CSV and JSON.

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::str::FromStr;

use tog_core::{FormattedReportRow, MatchReport, MatchState, PositionBoard};

pub const REPORT_TITLE: &str = "Time on Ground Match Report";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExportFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "txt" => Ok(ExportFormat::Table),
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => anyhow::bail!("Unknown export format: {}", other),
        }
    }
}

pub fn render(report: &MatchReport, format: ExportFormat) -> Result<String> {
    match format {
        ExportFormat::Table => Ok(render_table(report)),
        ExportFormat::Csv => render_csv(report),
        ExportFormat::Json => render_json(report),
    }
}

/// Fixed-width text table: report rows, then quarter lengths.
pub fn render_table(report: &MatchReport) -> String {
    let rows: Vec<[String; 7]> = report.formatted_rows().iter().map(|r| r.cells()).collect();

    let mut widths = FormattedReportRow::HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push('\n');
    out.push_str(&status_line(&report.state));
    out.push_str("\n\n");

    let header = FormattedReportRow::HEADERS.map(str::to_string);
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }

    out.push_str("\nQuarter Lengths\n");
    let lengths = report.quarter_lengths.formatted();
    let line: Vec<String> =
        lengths.iter().map(|(label, value)| format!("{} {}", label, value)).collect();
    out.push_str(&line.join(" | "));
    out.push('\n');
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    out.push_str(padded.join("  ").trim_end());
    out.push('\n');
}

fn status_line(state: &MatchState) -> String {
    if state.finished {
        "Match Finished".to_string()
    } else if state.running {
        format!("Quarter {} (running)", state.quarter_number)
    } else {
        format!("Quarter {}", state.quarter_number)
    }
}

/// CSV with the report table's column headers.
pub fn render_csv(report: &MatchReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in report.formatted_rows() {
        writer.serialize(&row).context("Failed to write CSV row")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

#[derive(Debug, Serialize)]
struct ReportDocument<'a> {
    title: &'static str,
    generated_at: String,
    state: &'a MatchState,
    total_match_secs: f64,
    rows: Vec<FormattedReportRow>,
    quarter_lengths: Vec<(String, String)>,
    report: &'a MatchReport,
}

pub fn render_json(report: &MatchReport) -> Result<String> {
    let document = ReportDocument {
        title: REPORT_TITLE,
        generated_at: Utc::now().to_rfc3339(),
        state: &report.state,
        total_match_secs: report.total_match_secs,
        rows: report.formatted_rows(),
        quarter_lengths: report.quarter_lengths.formatted(),
        report,
    };
    serde_json::to_string_pretty(&document).context("Failed to serialize report")
}

/// Position board as one block per column, bench first.
pub fn render_board(board: &PositionBoard) -> String {
    let mut out = String::new();
    for column in &board.columns {
        out.push_str(&format!("[{}]\n", column.position.short_label()));
        if column.players.is_empty() {
            out.push_str("  -\n");
        }
        for entry in &column.players {
            out.push_str(&format!("  {} | {:.0}%\n", entry.player, entry.percentage));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tog_core::{MatchTracker, PositionCategory, Timestamp};

    fn finished_quarter() -> MatchTracker {
        let mut tracker = MatchTracker::default();
        tracker.set_roster(["Ann", "Bo"]);
        tracker.start_quarter(Timestamp::ZERO);
        tracker.change_position("Bo", PositionCategory::Defence, Timestamp::ZERO);
        tracker.end_quarter(Timestamp::from_secs(90.0));
        tracker
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!("table".parse::<ExportFormat>().unwrap(), ExportFormat::Table);
        assert!("pdf".parse::<ExportFormat>().is_err());
    }

    #[test]
    fn test_render_table() {
        let report = finished_quarter().report(Timestamp::from_secs(90.0));
        let table = render_table(&report);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines[0], REPORT_TITLE);
        assert_eq!(lines[1], "Quarter 2");
        assert!(lines[3].starts_with("Player  FWD"));
        assert!(lines[5].starts_with("Bo "));
        assert!(lines[5].contains("01:30"));
        assert!(lines[5].contains("100%"));
        assert!(lines[6].starts_with("Ann"));
        assert!(table.contains("Q1 01:30 | Q2 00:00 | Q3 00:00 | Q4 00:00 | Total 01:30"));
    }

    #[test]
    fn test_render_json() {
        let report = finished_quarter().report(Timestamp::from_secs(90.0));
        let json: serde_json::Value = serde_json::from_str(&render_json(&report).unwrap()).unwrap();

        assert_eq!(json["title"], REPORT_TITLE);
        assert!(json["generated_at"].as_str().unwrap().contains('T'));
        assert_eq!(json["rows"][0]["Player"], "Bo");
        assert_eq!(json["rows"][0]["DEF"], "01:30");
        assert_eq!(json["quarter_lengths"][4][0], "Total");
    }

    #[test]
    fn test_render_board() {
        let tracker = finished_quarter();
        let board = render_board(&tracker.position_board(Timestamp::from_secs(90.0)));
        assert_eq!(board, "[Off]\n  Ann | 0%\n[DEF]\n  Bo | 100%\n[MID]\n  -\n[FWD]\n  -\n");
    }
}
