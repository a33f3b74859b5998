use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::shared::RugbyError;

/// Match minutes are whole minutes from kick-off.
pub type Minute = u32;

/// Minute used when a player comes on but no "off" is recorded.
pub const FULL_TIME: Minute = 80;

/// Conference label for teams the tournament does not group.
pub const DEFAULT_CONFERENCE: &str = "A";

/// Points awarded in the league table.
///
/// Every field has a default, so a rules file only needs the values it
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeagueRules {
    pub win_points: u32,
    pub draw_points: u32,
    /// A loss by this many points or fewer earns a bonus point.
    pub losing_bonus_margin: u32,
    /// Scoring this many tries or more earns a bonus point.
    pub try_bonus_threshold: u32,
}

impl Default for LeagueRules {
    fn default() -> Self {
        Self {
            win_points: 4,
            draw_points: 2,
            losing_bonus_margin: 7,
            try_bonus_threshold: 4,
        }
    }
}

impl LeagueRules {
    pub fn from_json_str(json: &str) -> Result<Self, RugbyError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RugbyError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }
}
