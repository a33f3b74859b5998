use chrono::NaiveDate;

use crate::config::Minute;
use crate::game::{Match, OnFieldPoints, PointRate};
use crate::shared::{Entity, Result, RugbyError};

use super::Tournament;

impl Tournament {
    /// Played matches the named player appeared in.
    pub fn player_matches(&self, name: &str) -> Result<Vec<&Match>> {
        let games: Vec<&Match> = self
            .played()
            .iter()
            .filter(|game| game.side_of(name).is_some())
            .collect();
        if games.is_empty() {
            return Err(RugbyError::not_found(Entity::Player, name));
        }
        Ok(games)
    }

    pub fn player_total_playtime(&self, name: &str) -> Result<Minute> {
        self.player_matches(name)?
            .into_iter()
            .map(|game| game.playtime(name))
            .sum()
    }

    /// Points the player scored personally across the tournament.
    pub fn player_total_points(&self, name: &str) -> Result<u32> {
        Ok(self
            .player_matches(name)?
            .into_iter()
            .filter_map(|game| {
                let side = game.side_of(name)?;
                game.side(side).scores.as_ref()
            })
            .map(|scores| scores.points_by(name))
            .sum())
    }

    /// Points for and against while the player was on, over matches with
    /// scoring events.
    pub fn player_onfield_points(&self, name: &str) -> Result<OnFieldPoints> {
        let (points, _) = self.onfield_totals(name)?;
        Ok(points)
    }

    pub fn player_onfield_rate(&self, name: &str) -> Result<PointRate> {
        let (points, minutes) = self.onfield_totals(name)?;
        Ok(PointRate::over(points, minutes))
    }

    fn onfield_totals(&self, name: &str) -> Result<(OnFieldPoints, Minute)> {
        let mut total = OnFieldPoints::default();
        let mut minutes = 0;
        for game in self.player_matches(name)? {
            let Some(side) = game.side_of(name) else {
                continue;
            };
            let Some(ranges) = game.side(side).lineup.as_ref().and_then(|l| l.playing(name)) else {
                continue;
            };
            if let Some(points) = game.points_during(side, ranges) {
                total.points_for += points.points_for;
                total.points_against += points.points_against;
                minutes += ranges.total_minutes();
            }
        }
        Ok((total, minutes))
    }

    /// Scoring rate while both players were on together, seen from the
    /// first player's side, over every match they shared.
    pub fn player_mutual_rate(&self, first: &str, second: &str) -> Result<PointRate> {
        let first_matches = self.player_matches(first)?;
        self.player_matches(second)?;

        let mut total = OnFieldPoints::default();
        let mut minutes = 0;
        for game in first_matches {
            let (Some(side), Some(_)) = (game.side_of(first), game.side_of(second)) else {
                continue;
            };
            let shared = game.shared_time(first, second)?;
            if let Some(points) = game.points_during(side, &shared) {
                total.points_for += points.points_for;
                total.points_against += points.points_against;
                minutes += shared.total_minutes();
            }
        }
        Ok(PointRate::over(total, minutes))
    }

    /// The match between two teams, on a given day when they met more than
    /// once.
    pub fn find_match(&self, home: &str, away: &str, date: Option<NaiveDate>) -> Result<&Match> {
        let home = self.team(home)?;
        let away = self.team(away)?;
        self.matches()
            .find(|game| {
                game.home.team == home
                    && game.away.team == away
                    && date.map_or(true, |date| game.date.date() == date)
            })
            .ok_or_else(|| {
                RugbyError::not_found(Entity::Match, format!("{} v {}", home.short_name, away.short_name))
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::game::{MatchScore, MatchSide};
    use crate::lineup::{Lineup, Position};
    use crate::scores::{ScoreEvent, ScoreType, Scores};
    use crate::team::Team;
    use crate::tournament::{Tournament, TournamentContext};
    use chrono::NaiveDate;

    fn round(day: u32, home_events: Vec<ScoreEvent>, away_events: Vec<ScoreEvent>) -> crate::game::Match {
        let date = NaiveDate::from_ymd_opt(2023, 4, day)
            .unwrap()
            .and_hms_opt(19, 45, 0)
            .unwrap();
        let home = MatchSide::new(Team::from_key("Cardiff"), MatchScore::Final(20))
            .with_lineup(Lineup::from_iter([
                (1, Position::starter("Rhys Carre").with_off(&[60.0])),
                (10, Position::starter("Jarrod Evans")),
                (17, Position::new("Corey Domachowski").with_on(&[60.0])),
            ]))
            .with_scores(Scores::new(home_events));
        let away = MatchSide::new(Team::from_key("Ospreys"), MatchScore::Final(10))
            .with_lineup(Lineup::from_iter([(10, Position::starter("Owen Williams"))]))
            .with_scores(Scores::new(away_events));
        crate::game::Match::new(date, home, away)
    }

    fn tournament() -> Tournament {
        Tournament::new(
            "URC",
            "2022-2023",
            TournamentContext::default(),
            vec![
                round(
                    1,
                    vec![
                        ScoreEvent::new(ScoreType::Try, Some("Evans"), 40),
                        ScoreEvent::new(ScoreType::Conversion, Some("Evans"), 41),
                        ScoreEvent::new(ScoreType::Try, None, 70),
                    ],
                    vec![],
                ),
                round(
                    8,
                    vec![ScoreEvent::new(ScoreType::Penalty, Some("Evans"), 10)],
                    vec![ScoreEvent::new(ScoreType::Try, Some("Williams"), 75)],
                ),
            ],
        )
    }

    #[test]
    fn totals_across_matches() {
        let tournament = tournament();
        assert_eq!(tournament.player_matches("Jarrod Evans").unwrap().len(), 2);
        assert_eq!(tournament.player_total_playtime("Rhys Carre").unwrap(), 120);
        assert_eq!(tournament.player_total_points("Jarrod Evans").unwrap(), 10);
        assert_eq!(tournament.player_total_points("Owen Williams").unwrap(), 5);
    }

    #[test]
    fn onfield_rate_pools_points_and_minutes() {
        let tournament = tournament();
        let points = tournament.player_onfield_points("Rhys Carre").unwrap();
        assert_eq!(points.points_for, 10);
        assert_eq!(points.points_against, 0);

        let rate = tournament.player_onfield_rate("Corey Domachowski").unwrap();
        assert_eq!(rate.rate_for, 5.0 / 40.0);
        assert_eq!(rate.rate_against, 5.0 / 40.0);
    }

    #[test]
    fn mutual_rate_across_sides() {
        let tournament = tournament();
        let rate = tournament
            .player_mutual_rate("Owen Williams", "Jarrod Evans")
            .unwrap();
        assert_eq!(rate.rate_for, 5.0 / 160.0);
        assert_eq!(rate.rate_against, 15.0 / 160.0);

        let apart = tournament
            .player_mutual_rate("Rhys Carre", "Corey Domachowski")
            .unwrap();
        assert!(apart.rate_for.is_nan());
    }

    #[test]
    fn lookups_report_missing_entities() {
        let tournament = tournament();
        assert!(tournament.player_total_playtime("Nobody").unwrap_err().is_not_found());
        assert!(tournament
            .player_mutual_rate("Jarrod Evans", "Nobody")
            .unwrap_err()
            .is_not_found());
        assert!(tournament.find_match("Ospreys", "Cardiff", None).unwrap_err().is_not_found());

        let found = tournament
            .find_match("Cardiff", "Ospreys", NaiveDate::from_ymd_opt(2023, 4, 8))
            .unwrap();
        assert_eq!(found.away.scores.as_ref().unwrap().total(), 5);
    }
}
