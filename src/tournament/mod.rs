mod context;
pub mod dense;
mod queries;
mod record;

pub use context::TournamentContext;
pub use record::{TeamsRecord, TournamentRecord};

use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::LeagueRules;
use crate::game::{Match, Side};
use crate::player::Player;
use crate::shared::{Entity, Result, RugbyError};
use crate::stats::{FixtureRow, LeagueRow, ResultRow, SplitTable, StatsService};
use crate::team::Team;

/// Mutual rates summed over the matches between two teams. Rows are the
/// first team's squad, columns the second's.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerCovariance {
    pub rows: Vec<Player>,
    pub columns: Vec<Player>,
    pub rate_for: Vec<Vec<f64>>,
    pub rate_against: Vec<Vec<f64>>,
}

/// A season of one competition: results, fixtures and the teams taking
/// part.
#[derive(Debug, Clone)]
pub struct Tournament {
    pub name: String,
    pub season: String,
    pub context: TournamentContext,
    played: Vec<Match>,
    future: Vec<Match>,
}

impl Tournament {
    pub fn new(
        name: impl Into<String>,
        season: impl Into<String>,
        context: TournamentContext,
        matches: Vec<Match>,
    ) -> Self {
        let mut tournament = Self {
            name: name.into(),
            season: season.into(),
            context,
            played: Vec::new(),
            future: Vec::new(),
        };
        for game in matches {
            tournament.file(game);
        }
        debug!(
            tournament = %tournament.name,
            season = %tournament.season,
            played = tournament.played.len(),
            future = tournament.future.len(),
            "loaded tournament"
        );
        tournament
    }

    pub fn from_record(record: TournamentRecord) -> Self {
        let mut context = TournamentContext::new(record.rules.unwrap_or_default());
        match record.teams {
            Some(TeamsRecord::Conferences(conferences)) => {
                for (conference, teams) in conferences {
                    for team in teams {
                        context.add_team(team, Some(&conference));
                    }
                }
            }
            Some(TeamsRecord::Flat(teams)) => {
                for team in teams {
                    context.add_team(team, None);
                }
            }
            None => {}
        }

        let matches = record
            .matches
            .into_iter()
            .map(|game| Match::from_record(game, Some(&context)))
            .collect();
        Self::new(record.name, record.season, context, matches)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let record: TournamentRecord = serde_json::from_str(json)?;
        Ok(Self::from_record(record))
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reads a dense one-row-per-player CSV export.
    pub fn from_dense_csv<R: Read>(
        reader: R,
        name: &str,
        season: &str,
        rules: LeagueRules,
    ) -> Result<Self> {
        let context = TournamentContext::new(rules);
        let matches = dense::read_matches(reader)?
            .into_iter()
            .map(|record| Match::from_record(record, Some(&context)))
            .collect();
        Ok(Self::new(name, season, context, matches))
    }

    pub fn to_record(&self) -> TournamentRecord {
        let teams = if self.context.has_conferences() {
            let mut grouped: BTreeMap<String, Vec<Team>> = BTreeMap::new();
            for team in self.context.roster() {
                grouped
                    .entry(self.context.conference(&team.short_name).to_string())
                    .or_default()
                    .push(team.clone());
            }
            Some(TeamsRecord::Conferences(grouped))
        } else if self.context.has_roster() {
            Some(TeamsRecord::Flat(self.context.roster().cloned().collect()))
        } else {
            None
        };
        let rules = (self.context.rules != LeagueRules::default()).then_some(self.context.rules);

        TournamentRecord {
            name: self.name.clone(),
            season: self.season.clone(),
            teams,
            rules,
            matches: self.matches().map(Match::to_record).collect(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Matches with a final score, in date order.
    pub fn played(&self) -> &[Match] {
        &self.played
    }

    /// Matches still to be played, postponed or cancelled, in date order.
    pub fn future(&self) -> &[Match] {
        &self.future
    }

    /// Played then future matches.
    pub fn matches(&self) -> impl Iterator<Item = &Match> {
        self.played.iter().chain(&self.future)
    }

    /// Adds a match, replacing any match with the same teams and kick-off.
    pub fn add_match(&mut self, mut game: Match) {
        let same = |other: &Match| {
            other.home.team == game.home.team
                && other.away.team == game.away.team
                && other.date == game.date
        };
        let before = self.played.len() + self.future.len();
        self.played.retain(|other| !same(other));
        self.future.retain(|other| !same(other));
        if self.played.len() + self.future.len() < before {
            debug!(%game, "replacing existing match");
        }

        game.tournament = Some(self.name.clone());
        game.season = Some(self.season.clone());
        self.file(game);
    }

    fn file(&mut self, game: Match) {
        let bucket = if game.is_played() {
            &mut self.played
        } else {
            &mut self.future
        };
        let at = bucket.partition_point(|other| other.date <= game.date);
        bucket.insert(at, game);
    }

    /// The rostered teams, or failing a roster every team seen in a match.
    pub fn teams(&self) -> Vec<Team> {
        if self.context.has_roster() {
            return self.context.roster().cloned().collect();
        }
        let mut teams: Vec<Team> = Vec::new();
        for game in self.matches() {
            for team in [&game.home.team, &game.away.team] {
                if !teams.contains(team) {
                    teams.push(team.clone());
                }
            }
        }
        teams
    }

    /// Everyone named in a played match lineup.
    pub fn players(&self) -> Vec<Player> {
        self.played
            .iter()
            .flat_map(Match::players)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Players who turned out for the team in a played match.
    pub fn squad(&self, team: &str) -> Result<Vec<Player>> {
        let team = self.team(team)?;
        let mut squad = BTreeSet::new();
        for game in &self.played {
            if let Some(side) = game.side_of_team(&team.short_name) {
                if let Some(lineup) = &game.side(side).lineup {
                    squad.extend(lineup.players());
                }
            }
        }
        Ok(squad.into_iter().collect())
    }

    /// Date and teams for played matches, or with `future` for the matches
    /// still to come.
    pub fn fixtures_table(&self, future: bool) -> Vec<FixtureRow> {
        let games = if future { &self.future } else { &self.played };
        games
            .iter()
            .map(|game| FixtureRow {
                date: game.date,
                home: game.home.team.short_name.clone(),
                away: game.away.team.short_name.clone(),
            })
            .collect()
    }

    /// Scores, difference and tries for every played match. Tries are
    /// `None` for matches without scoring events.
    pub fn results_table(&self) -> Vec<ResultRow> {
        self.played
            .iter()
            .filter_map(|game| {
                let home_score = game.home.score.final_points()?;
                let away_score = game.away.score.final_points()?;
                Some(ResultRow {
                    home: game.home.team.short_name.clone(),
                    away: game.away.team.short_name.clone(),
                    home_score,
                    away_score,
                    difference: i64::from(home_score) - i64::from(away_score),
                    home_tries: game.home.tries(),
                    away_tries: game.away.tries(),
                })
            })
            .collect()
    }

    pub fn league_table(&self) -> Result<Vec<LeagueRow>> {
        let service = StatsService::default();
        let rows = if self.context.has_roster() {
            service.league_table(&self.played, &self.context)?
        } else {
            let mut context = self.context.clone();
            for team in self.teams() {
                context.add_team(team, None);
            }
            service.league_table(&self.played, &context)?
        };
        Ok(rows)
    }

    /// Minutes played per player for one team, split by venue and opponent.
    pub fn player_time_table(&self, team: &str) -> Result<SplitTable> {
        let team = self.team(team)?;
        Ok(StatsService::default().player_time_table(&self.played, &team.short_name)?)
    }

    /// Points scored per player for one team, split by venue and opponent.
    /// With `squad`, players who never scored are listed with zeros.
    pub fn player_score_table(&self, team: &str, squad: bool) -> Result<SplitTable> {
        let team = self.team(team)?;
        Ok(StatsService::default().player_score_table(&self.played, &team.short_name, squad)?)
    }

    /// Mutual "for" and "against" rates between every pair of players from
    /// two teams, summed over their matches against each other. Pairings
    /// without a defined rate in a match add nothing.
    pub fn player_covariance(&self, first: &str, second: &str) -> Result<PlayerCovariance> {
        let first = self.team(first)?;
        let second = self.team(second)?;
        let rows = self.squad(&first.short_name)?;
        let columns = self.squad(&second.short_name)?;

        let mut rate_for = vec![vec![0.0; columns.len()]; rows.len()];
        let mut rate_against = vec![vec![0.0; columns.len()]; rows.len()];

        let meetings = self.played.iter().filter(|game| {
            game.side_of_team(&first.short_name).is_some()
                && game.side_of_team(&second.short_name).is_some()
        });
        for game in meetings {
            for (i, row) in rows.iter().enumerate() {
                for (j, column) in columns.iter().enumerate() {
                    let Ok(rate) = game.mutual_rate(&row.name, &column.name) else {
                        continue;
                    };
                    if rate.rate_for.is_finite() {
                        rate_for[i][j] += rate.rate_for;
                    }
                    if rate.rate_against.is_finite() {
                        rate_against[i][j] += rate.rate_against;
                    }
                }
            }
        }

        Ok(PlayerCovariance {
            rows,
            columns,
            rate_for,
            rate_against,
        })
    }

    /// The team with this short or full name, if it is rostered or plays in
    /// a match.
    pub fn team(&self, key: &str) -> Result<Team> {
        if let Some(team) = self.context.team(key) {
            return Ok(team.clone());
        }
        let key = key.trim();
        self.matches()
            .flat_map(|game| [&game.home.team, &game.away.team])
            .find(|team| team.short_name == key || team.name == key)
            .cloned()
            .ok_or_else(|| RugbyError::not_found(Entity::Team, key))
    }

    /// The team's played matches, optionally only at home or away.
    pub fn team_matches(&self, team: &str, venue: Option<Side>) -> Result<Vec<&Match>> {
        let team = self.team(team)?;
        Ok(self
            .played
            .iter()
            .filter(|game| match game.side_of_team(&team.short_name) {
                Some(side) => venue.map_or(true, |venue| venue == side),
                None => false,
            })
            .collect())
    }
}

/// League tables for many tournaments at once, one worker per tournament.
pub fn league_tables(tournaments: &[Tournament]) -> Vec<Result<Vec<LeagueRow>>> {
    info!(count = tournaments.len(), "computing league tables");
    tournaments
        .par_iter()
        .map(Tournament::league_table)
        .collect()
}
