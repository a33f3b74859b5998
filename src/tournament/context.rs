use std::collections::HashMap;

use tracing::debug;

use crate::config::{LeagueRules, DEFAULT_CONFERENCE};
use crate::team::Team;

/// The team directory, conference grouping and table rules a tournament's
/// matches are read against.
#[derive(Debug, Clone, Default)]
pub struct TournamentContext {
    teams: HashMap<String, Team>,
    order: Vec<String>,
    conferences: HashMap<String, String>,
    pub rules: LeagueRules,
}

impl TournamentContext {
    pub fn new(rules: LeagueRules) -> Self {
        Self {
            rules,
            ..Self::default()
        }
    }

    pub fn with_team(mut self, team: Team, conference: Option<&str>) -> Self {
        self.add_team(team, conference);
        self
    }

    /// Adds a team to the roster, replacing any team with the same short
    /// name.
    pub fn add_team(&mut self, team: Team, conference: Option<&str>) {
        let key = team.short_name.clone();
        if !self.teams.contains_key(&key) {
            self.order.push(key.clone());
        }
        match conference {
            Some(conference) => {
                self.conferences.insert(key.clone(), conference.to_string());
            }
            None => {
                self.conferences.remove(&key);
            }
        }
        self.teams.insert(key, team);
    }

    /// Looks a team key up by short name, then by full name. Unknown keys
    /// get a placeholder team.
    pub fn resolve(&self, key: &str) -> Team {
        match self.team(key) {
            Some(team) => team.clone(),
            None => {
                debug!(key, "team not in roster, using placeholder");
                Team::from_key(key)
            }
        }
    }

    pub fn team(&self, key: &str) -> Option<&Team> {
        let key = key.trim();
        self.teams
            .get(key)
            .or_else(|| self.teams.values().find(|team| team.name == key))
    }

    pub fn conference(&self, short_name: &str) -> &str {
        self.conferences
            .get(short_name)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CONFERENCE)
    }

    /// Whether any team has been given a conference.
    pub fn has_conferences(&self) -> bool {
        !self.conferences.is_empty()
    }

    /// Rostered teams in the order they were added.
    pub fn roster(&self) -> impl Iterator<Item = &Team> {
        self.order.iter().filter_map(|key| self.teams.get(key))
    }

    pub fn has_roster(&self) -> bool {
        !self.order.is_empty()
    }
}
