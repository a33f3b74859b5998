use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::Minute;
use crate::game::Side;
use crate::team::Team;

use super::standings::TeamStanding;

/// A played match seen from one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamOutcome {
    pub team: String,
    pub venue: Side,
    pub opponent: String,
    pub scored: u32,
    pub conceded: u32,
    /// `None` when the match has no scoring events.
    pub tries: Option<u32>,
}

impl TeamOutcome {
    pub fn won(&self) -> bool {
        self.scored > self.conceded
    }

    pub fn drawn(&self) -> bool {
        self.scored == self.conceded
    }

    pub fn lost(&self) -> bool {
        self.scored < self.conceded
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectedData {
    Outcome(TeamOutcome),
    PlayingTime {
        player: String,
        team: String,
        venue: Side,
        opponent: String,
        minutes: Minute,
    },
    PlayerPoints {
        player: String,
        team: String,
        venue: Side,
        opponent: String,
        points: u32,
    },
}

impl CollectedData {
    pub fn team(&self) -> &str {
        match self {
            CollectedData::Outcome(outcome) => &outcome.team,
            CollectedData::PlayingTime { team, .. } => team,
            CollectedData::PlayerPoints { team, .. } => team,
        }
    }
}

/// League-table points earned in a single match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TablePoints {
    pub result: u32,
    pub bonus: u32,
}

impl TablePoints {
    pub fn total(&self) -> u32 {
        self.result + self.bonus
    }
}

/// Everything the stats pipeline worked out for one match.
#[derive(Debug, Clone)]
pub struct MatchSummary {
    pub collected: Vec<CollectedData>,
    pub outcomes: Vec<TeamOutcome>,
    pub points: BTreeMap<String, TablePoints>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueRow {
    pub team: Team,
    pub conference: String,
    #[serde(flatten)]
    pub standing: TeamStanding,
    pub diff: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    pub home: String,
    pub away: String,
    pub home_score: u32,
    pub away_score: u32,
    pub difference: i64,
    pub home_tries: Option<u32>,
    pub away_tries: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureRow {
    pub date: NaiveDateTime,
    pub home: String,
    pub away: String,
}

/// A player's totals against each opponent, split by venue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerSplit {
    /// Opponent short name to total, for the team's home matches.
    pub home: BTreeMap<String, u32>,
    /// Opponent short name to total, for the team's away matches.
    pub away: BTreeMap<String, u32>,
}

impl PlayerSplit {
    pub fn add(&mut self, venue: Side, opponent: &str, amount: u32) {
        let column = match venue {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        };
        *column.entry(opponent.to_string()).or_default() += amount;
    }

    pub fn home_total(&self) -> u32 {
        self.home.values().sum()
    }

    pub fn away_total(&self) -> u32 {
        self.away.values().sum()
    }
}

/// Player name to venue split.
pub type SplitTable = BTreeMap<String, PlayerSplit>;
