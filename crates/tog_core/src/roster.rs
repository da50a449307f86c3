//! Match roster: ordered, unique player names with a size cap.

use serde::{Deserialize, Serialize};

/// Ordered list of player names. Order is input order and drives report
/// tie-breaking.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    /// Build a roster from names, trimming whitespace, skipping blanks and
    /// duplicates, and keeping at most `max` entries. Oversized input is
    /// truncated rather than rejected.
    pub fn from_names<I, S>(names: I, max: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut kept: Vec<String> = Vec::new();
        let mut dropped = 0usize;

        for raw in names {
            let name = raw.as_ref().trim();
            if name.is_empty() {
                continue;
            }
            if kept.iter().any(|n| n == name) {
                log::warn!("Duplicate player name '{}' ignored", name);
                continue;
            }
            if kept.len() >= max {
                dropped += 1;
                continue;
            }
            kept.push(name.to_string());
        }

        if dropped > 0 {
            log::warn!("Roster capped at {} players, {} name(s) dropped", max, dropped);
        }

        Self { names: kept }
    }

    /// Parse the settings text area: one name per line.
    pub fn parse_lines(text: &str, max: usize) -> Self {
        Self::from_names(text.lines(), max)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}
