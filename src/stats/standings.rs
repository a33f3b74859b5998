use std::collections::HashMap;

use serde::Serialize;

use super::{TablePoints, TeamOutcome};

/// Accumulated league record for one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TeamStanding {
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    #[serde(rename = "for")]
    pub points_for: u32,
    #[serde(rename = "against")]
    pub points_against: u32,
    pub bonus: u32,
    pub points: u32,
}

impl TeamStanding {
    pub fn difference(&self) -> i64 {
        i64::from(self.points_for) - i64::from(self.points_against)
    }
}

/// In-memory league standings, filled one match outcome at a time.
#[derive(Debug, Default)]
pub struct Standings {
    teams: HashMap<String, TeamStanding>,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a team with an empty record if it is not already present.
    pub fn enter(&mut self, team: &str) {
        self.teams.entry(team.to_string()).or_default();
    }

    pub fn record(&mut self, outcome: &TeamOutcome, points: TablePoints) {
        let standing = self.teams.entry(outcome.team.clone()).or_default();

        standing.played += 1;
        if outcome.won() {
            standing.won += 1;
        } else if outcome.drawn() {
            standing.drawn += 1;
        } else {
            standing.lost += 1;
        }
        standing.points_for += outcome.scored;
        standing.points_against += outcome.conceded;
        standing.bonus += points.bonus;
        standing.points += points.total();
    }

    pub fn get(&self, team: &str) -> Option<&TeamStanding> {
        self.teams.get(team)
    }

    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }
}
