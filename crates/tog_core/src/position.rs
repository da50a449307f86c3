use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// Where a player currently is. `Off` is the bench and never accumulates time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PositionCategory {
    Forward,
    Midfield,
    Defence,
    #[default]
    Off,
}

impl PositionCategory {
    /// The three categories that accumulate time.
    pub const ON_FIELD: [PositionCategory; 3] =
        [PositionCategory::Forward, PositionCategory::Midfield, PositionCategory::Defence];

    /// Board column order, bench first.
    pub const BOARD_ORDER: [PositionCategory; 4] = [
        PositionCategory::Off,
        PositionCategory::Defence,
        PositionCategory::Midfield,
        PositionCategory::Forward,
    ];

    pub fn is_on_field(self) -> bool {
        self != PositionCategory::Off
    }

    pub fn short_label(self) -> &'static str {
        match self {
            PositionCategory::Forward => "FWD",
            PositionCategory::Midfield => "MID",
            PositionCategory::Defence => "DEF",
            PositionCategory::Off => "Off",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PositionCategory::Forward => "Forward",
            PositionCategory::Midfield => "Midfield",
            PositionCategory::Defence => "Defence",
            PositionCategory::Off => "Off",
        }
    }
}

impl fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PositionCategory {
    type Err = TrackerError;

    /// Accepts short labels (`FWD`) and full names (`Forward`), any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fwd" | "forward" => Ok(PositionCategory::Forward),
            "mid" | "midfield" => Ok(PositionCategory::Midfield),
            "def" | "defence" | "defense" => Ok(PositionCategory::Defence),
            "off" | "bench" => Ok(PositionCategory::Off),
            _ => Err(TrackerError::UnknownPosition(s.to_string())),
        }
    }
}
