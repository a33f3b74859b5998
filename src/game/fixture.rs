use std::fmt;

use chrono::NaiveDateTime;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::lineup::Lineup;
use crate::player::Player;
use crate::scores::{ScoreType, Scores};
use crate::shared::Result;
use crate::team::{Team, TeamRef};
use crate::tournament::TournamentContext;

use super::models::{MatchRecord, MatchScore, Side, SideRecord};

/// One team's part in a match.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSide {
    pub team: Team,
    pub score: MatchScore,
    pub lineup: Option<Lineup>,
    pub scores: Option<Scores>,
}

impl MatchSide {
    pub fn new(team: Team, score: MatchScore) -> Self {
        Self {
            team,
            score,
            lineup: None,
            scores: None,
        }
    }

    pub fn with_lineup(mut self, lineup: Lineup) -> Self {
        self.lineup = Some(lineup);
        self
    }

    pub fn with_scores(mut self, scores: Scores) -> Self {
        self.scores = Some(scores);
        self
    }

    /// Tries scored, when scoring events were recorded.
    pub fn tries(&self) -> Option<u32> {
        self.scores.as_ref().map(|scores| scores.count(ScoreType::Try))
    }

    fn to_record(&self) -> SideRecord {
        SideRecord {
            team: TeamRef::Inline(self.team.clone()),
            score: self.score,
            lineup: self.lineup.clone(),
            scores: self.scores.clone(),
        }
    }
}

/// A fixture or result between two teams.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub date: NaiveDateTime,
    pub stadium: Option<String>,
    pub round: Option<u32>,
    pub tournament: Option<String>,
    pub season: Option<String>,
    pub url: Option<String>,
    pub home: MatchSide,
    pub away: MatchSide,
}

impl Match {
    pub fn new(date: NaiveDateTime, home: MatchSide, away: MatchSide) -> Self {
        let mut game = Self {
            date,
            stadium: None,
            round: None,
            tournament: None,
            season: None,
            url: None,
            home,
            away,
        };
        game.resolve_scorers();
        game
    }

    /// Builds a match from a record, looking team keys up in the
    /// tournament's directory when there is one.
    pub fn from_record(record: MatchRecord, context: Option<&TournamentContext>) -> Self {
        let resolve = |team: &TeamRef| match (team, context) {
            (TeamRef::Inline(team), _) => team.clone(),
            (TeamRef::Key(key), Some(context)) => context.resolve(key),
            (TeamRef::Key(key), None) => Team::from_key(key),
        };

        let side = |record: SideRecord| MatchSide {
            team: resolve(&record.team),
            score: record.score,
            lineup: record.lineup,
            scores: record.scores,
        };

        let mut game = Self::new(record.date, side(record.home), side(record.away));
        game.stadium = record.stadium;
        game.round = record.round;
        game.tournament = record.tournament;
        game.season = record.season;
        game.url = record.url;
        game
    }

    pub fn to_record(&self) -> MatchRecord {
        MatchRecord {
            date: self.date,
            stadium: self.stadium.clone(),
            round: self.round,
            tournament: self.tournament.clone(),
            season: self.season.clone(),
            url: self.url.clone(),
            home: self.home.to_record(),
            away: self.away.to_record(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let record: MatchRecord = serde_json::from_str(json)?;
        Ok(Self::from_record(record, None))
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn side(&self, side: Side) -> &MatchSide {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn team(&self, side: Side) -> &Team {
        &self.side(side).team
    }

    /// Whether the team with this short name plays in the match, and on
    /// which side.
    pub fn side_of_team(&self, short_name: &str) -> Option<Side> {
        if self.home.team.short_name == short_name {
            Some(Side::Home)
        } else if self.away.team.short_name == short_name {
            Some(Side::Away)
        } else {
            None
        }
    }

    /// Both sides have a final score.
    pub fn is_played(&self) -> bool {
        matches!(
            (self.home.score, self.away.score),
            (MatchScore::Final(_), MatchScore::Final(_))
        )
    }

    pub fn has_lineups(&self) -> bool {
        self.home.lineup.is_some() && self.away.lineup.is_some()
    }

    pub fn has_scores(&self) -> bool {
        self.home.scores.is_some() && self.away.scores.is_some()
    }

    /// Everyone named in either lineup.
    pub fn players(&self) -> Vec<Player> {
        [&self.home.lineup, &self.away.lineup]
            .into_iter()
            .flatten()
            .flat_map(Lineup::players)
            .collect()
    }

    /// Which side the named player turned out for.
    pub fn side_of(&self, name: &str) -> Option<Side> {
        Side::iter().find(|&side| {
            self.side(side)
                .lineup
                .as_ref()
                .is_some_and(|lineup| lineup.contains(name))
        })
    }

    /// Rewrites scorer names given as fragments (e.g. a surname) to the full
    /// lineup name they match.
    fn resolve_scorers(&mut self) {
        let lineups: Vec<Lineup> = [&self.home.lineup, &self.away.lineup]
            .into_iter()
            .flatten()
            .cloned()
            .collect();
        if lineups.is_empty() {
            return;
        }

        for scores in [&mut self.home.scores, &mut self.away.scores].into_iter().flatten() {
            for event in scores.events_mut() {
                let Some(fragment) = event.player.as_deref() else {
                    continue;
                };
                if let Some(full) = lineups.iter().find_map(|l| l.resolve_name(fragment)) {
                    if full != fragment {
                        debug!(fragment, full, "resolved scorer name");
                        event.player = Some(full.to_string());
                    }
                }
            }
        }
    }
}

impl fmt::Display for Match {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let date = self.date.format("%Y-%m-%d %H:%M");
        match (self.home.score.final_points(), self.away.score.final_points()) {
            (Some(home), Some(away)) => write!(
                f,
                "{date} {} {home:>3} v {away:<3} {}",
                self.home.team, self.away.team
            ),
            _ => write!(f, "{date} {} v {}", self.home.team, self.away.team),
        }
    }
}
