use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::LeagueRules;
use crate::game::MatchRecord;
use crate::team::Team;

/// Teams listed in a tournament file, either grouped by conference or as a
/// single list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamsRecord {
    Conferences(BTreeMap<String, Vec<Team>>),
    Flat(Vec<Team>),
}

/// On-disk shape of a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub name: String,
    pub season: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<TeamsRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<LeagueRules>,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}
