use chrono::{NaiveDate, NaiveDateTime};

use rugby::{
    Lineup, Match, MatchScore, MatchSide, Position, ScoreEvent, ScoreType, Scores, Team,
    Tournament, TournamentContext,
};

// ============================================================================
// Match Setup Utilities
// ============================================================================

pub struct MatchBuilder {
    date: NaiveDateTime,
    home: MatchSide,
    away: MatchSide,
}

#[allow(dead_code)]
impl MatchBuilder {
    pub fn new(home: &str, away: &str) -> Self {
        Self {
            date: kick_off(1),
            home: MatchSide::new(Team::from_key(home), MatchScore::Pending),
            away: MatchSide::new(Team::from_key(away), MatchScore::Pending),
        }
    }

    /// Kick-off at 15:00 on the given day of September 2023.
    pub fn on_day(mut self, day: u32) -> Self {
        self.date = kick_off(day);
        self
    }

    pub fn score(mut self, home: u32, away: u32) -> Self {
        self.home.score = MatchScore::Final(home);
        self.away.score = MatchScore::Final(away);
        self
    }

    pub fn postponed(mut self) -> Self {
        self.home.score = MatchScore::Postponed;
        self.away.score = MatchScore::Postponed;
        self
    }

    /// Home tries at ten-minute intervals, with no scorer named.
    pub fn home_tries(mut self, tries: u32) -> Self {
        self.home.scores = Some(tries_from(tries));
        self.away.scores.get_or_insert_with(Scores::default);
        self
    }

    pub fn away_tries(mut self, tries: u32) -> Self {
        self.away.scores = Some(tries_from(tries));
        self.home.scores.get_or_insert_with(Scores::default);
        self
    }

    pub fn home_lineup(mut self, positions: Vec<(u8, Position)>) -> Self {
        self.home.lineup = Some(Lineup::from_iter(positions));
        self
    }

    pub fn away_lineup(mut self, positions: Vec<(u8, Position)>) -> Self {
        self.away.lineup = Some(Lineup::from_iter(positions));
        self
    }

    pub fn home_scores(mut self, events: Vec<ScoreEvent>) -> Self {
        self.home.scores = Some(Scores::new(events));
        self
    }

    pub fn away_scores(mut self, events: Vec<ScoreEvent>) -> Self {
        self.away.scores = Some(Scores::new(events));
        self
    }

    pub fn build(self) -> Match {
        Match::new(self.date, self.home, self.away)
    }
}

fn kick_off(day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 9, day)
        .and_then(|date| date.and_hms_opt(15, 0, 0))
        .expect("valid test date")
}

fn tries_from(tries: u32) -> Scores {
    Scores::new(
        (0..tries)
            .map(|i| ScoreEvent::new(ScoreType::Try, None, 5 + i * 10))
            .collect(),
    )
}

// ============================================================================
// Tournament Setup Utilities
// ============================================================================

pub struct TournamentBuilder {
    context: TournamentContext,
    matches: Vec<Match>,
}

#[allow(dead_code)]
impl TournamentBuilder {
    pub fn new() -> Self {
        Self {
            context: TournamentContext::default(),
            matches: vec![],
        }
    }

    pub fn with_team(mut self, short_name: &str, conference: Option<&str>) -> Self {
        self.context.add_team(Team::from_key(short_name), conference);
        self
    }

    pub fn with_match(mut self, game: MatchBuilder) -> Self {
        self.matches.push(game.build());
        self
    }

    pub fn build(self) -> Tournament {
        Tournament::new("Test Cup", "2023", self.context, self.matches)
    }
}
