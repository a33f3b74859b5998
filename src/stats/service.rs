use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::LeagueRules;
use crate::game::Match;
use crate::team::Team;
use crate::tournament::TournamentContext;

use super::{
    calculators::{LosingBonusCalculator, MatchResultCalculator, TryBonusCalculator},
    collectors::{OutcomeCollector, PlayingTimeCollector, ScorerCollector},
    CalculationContext, CollectedData, LeagueRow, MatchSummary, PointsCalculator, SplitTable,
    Standings, StatCollector, StatsError, TablePoints,
};

pub struct StatsService {
    collectors: Vec<Arc<dyn StatCollector>>,
    calculators: Vec<Arc<dyn PointsCalculator>>,
}

impl StatsService {
    pub fn builder() -> StatsServiceBuilder {
        StatsServiceBuilder::new()
    }

    pub fn collectors(&self) -> Vec<Arc<dyn StatCollector>> {
        self.collectors.clone()
    }

    pub fn collect_all(&self, game: &Match) -> Result<Vec<CollectedData>, StatsError> {
        let mut collected = Vec::new();
        for collector in &self.collectors {
            collected.extend(collector.collect(game)?);
        }
        Ok(collected)
    }

    /// Runs every collector over a played match and works out the table
    /// points each side earned.
    pub fn process_match(&self, game: &Match, rules: &LeagueRules) -> Result<MatchSummary, StatsError> {
        let collected = self.collect_all(game)?;

        let outcomes: Vec<_> = collected
            .iter()
            .filter_map(|data| match data {
                CollectedData::Outcome(outcome) => Some(outcome.clone()),
                _ => None,
            })
            .collect();
        let teams: Vec<String> = outcomes.iter().map(|o| o.team.clone()).collect();

        let points = self
            .calculate_points(&teams, &collected, rules)
            .into_iter()
            .collect();

        Ok(MatchSummary {
            collected,
            outcomes,
            points,
        })
    }

    fn calculate_points(
        &self,
        teams: &[String],
        collected: &[CollectedData],
        rules: &LeagueRules,
    ) -> HashMap<String, TablePoints> {
        let mut current_points: HashMap<String, TablePoints> = HashMap::new();

        for calculator in &self.calculators {
            let context = CalculationContext::new(rules, &current_points);

            let mut next_points = current_points.clone();
            for team in teams {
                let updated = calculator.calculate(team, collected, &context);
                next_points.insert(team.clone(), updated);
            }

            current_points = next_points;
        }

        current_points
    }

    /// League table over `games`, grouped by conference and ordered by
    /// points then difference. Unplayed matches are skipped.
    pub fn league_table<'a>(
        &self,
        games: impl IntoIterator<Item = &'a Match>,
        context: &TournamentContext,
    ) -> Result<Vec<LeagueRow>, StatsError> {
        let mut standings = Standings::new();
        let mut entries: Vec<Team> = Vec::new();
        let mut enter = |team: &Team, standings: &mut Standings| {
            if standings.get(&team.short_name).is_none() {
                standings.enter(&team.short_name);
                entries.push(team.clone());
            }
        };

        for team in context.roster() {
            enter(team, &mut standings);
        }

        for game in games {
            if !game.is_played() {
                debug!(%game, "skipping unplayed match");
                continue;
            }
            enter(&game.home.team, &mut standings);
            enter(&game.away.team, &mut standings);

            let summary = self.process_match(game, &context.rules)?;
            for outcome in &summary.outcomes {
                let points = summary.points.get(&outcome.team).copied().unwrap_or_default();
                standings.record(outcome, points);
            }
        }

        let mut rows: Vec<LeagueRow> = entries
            .into_iter()
            .filter_map(|team| {
                let standing = standings.get(&team.short_name)?.clone();
                Some(LeagueRow {
                    conference: context.conference(&team.short_name).to_string(),
                    diff: standing.difference(),
                    team,
                    standing,
                })
            })
            .collect();

        rows.sort_by_key(|row| (row.conference.clone(), Reverse(row.standing.points), Reverse(row.diff)));
        Ok(rows)
    }

    /// Minutes played by each of the team's players, split by venue and
    /// opponent.
    pub fn player_time_table<'a>(
        &self,
        games: impl IntoIterator<Item = &'a Match>,
        team: &str,
    ) -> Result<SplitTable, StatsError> {
        let mut table = SplitTable::new();
        for data in self.collect_for_team(games, team)? {
            if let CollectedData::PlayingTime {
                player,
                venue,
                opponent,
                minutes,
                ..
            } = data
            {
                table.entry(player).or_default().add(venue, &opponent, minutes);
            }
        }
        Ok(table)
    }

    /// Points scored personally by each of the team's players, split by
    /// venue and opponent. With `squad` every lineup player is listed,
    /// otherwise only entries with points.
    pub fn player_score_table<'a>(
        &self,
        games: impl IntoIterator<Item = &'a Match>,
        team: &str,
        squad: bool,
    ) -> Result<SplitTable, StatsError> {
        let mut table = SplitTable::new();
        for data in self.collect_for_team(games, team)? {
            if let CollectedData::PlayerPoints {
                player,
                venue,
                opponent,
                points,
                ..
            } = data
            {
                if points == 0 && !squad {
                    continue;
                }
                table.entry(player).or_default().add(venue, &opponent, points);
            }
        }
        Ok(table)
    }

    fn collect_for_team<'a>(
        &self,
        games: impl IntoIterator<Item = &'a Match>,
        team: &str,
    ) -> Result<Vec<CollectedData>, StatsError> {
        let mut collected = Vec::new();
        for game in games {
            if game.side_of_team(team).is_none() {
                continue;
            }
            if !game.is_played() {
                warn!(%game, "player tables only cover played matches");
                continue;
            }
            collected.extend(
                self.collect_all(game)?
                    .into_iter()
                    .filter(|data| data.team() == team),
            );
        }
        Ok(collected)
    }
}

impl Default for StatsService {
    fn default() -> Self {
        Self::builder().build()
    }
}

pub struct StatsServiceBuilder {
    collectors: Vec<Arc<dyn StatCollector>>,
    calculators: Vec<Arc<dyn PointsCalculator>>,
}

impl StatsServiceBuilder {
    fn new() -> Self {
        Self {
            collectors: vec![
                Arc::new(OutcomeCollector::default()),
                Arc::new(PlayingTimeCollector::default()),
                Arc::new(ScorerCollector::default()),
            ],
            calculators: vec![
                Arc::new(MatchResultCalculator::default()),
                Arc::new(LosingBonusCalculator::default()),
                Arc::new(TryBonusCalculator::default()),
            ],
        }
    }

    pub fn with_collector(mut self, collector: Arc<dyn StatCollector>) -> Self {
        self.collectors.push(collector);
        self
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn PointsCalculator>) -> Self {
        self.calculators.push(calculator);
        self
    }

    pub fn build(mut self) -> StatsService {
        self.calculators.sort_by_key(|c| c.priority());
        StatsService {
            collectors: self.collectors,
            calculators: self.calculators,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{MatchScore, MatchSide};
    use crate::lineup::{Lineup, Position};
    use crate::scores::{ScoreEvent, ScoreType, Scores};
    use crate::stats::collectors::test_support::played_match;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    fn result(day: u32, home: &str, hs: u32, away: &str, aws: u32) -> Match {
        let date = NaiveDate::from_ymd_opt(2022, 2, day)
            .unwrap()
            .and_hms_opt(15, 0, 0)
            .unwrap();
        Match::new(
            date,
            MatchSide::new(Team::from_key(home), MatchScore::Final(hs)),
            MatchSide::new(Team::from_key(away), MatchScore::Final(aws)),
        )
    }

    fn with_tries(mut game: Match, home_tries: u32) -> Match {
        game.home.scores = Some(Scores::new(
            (0..home_tries)
                .map(|i| ScoreEvent::new(ScoreType::Try, None, 10 + i * 10))
                .collect(),
        ));
        game.away.scores = Some(Scores::default());
        game
    }

    #[derive(Default)]
    struct CountingCollector {
        calls: Mutex<u32>,
    }

    impl StatCollector for CountingCollector {
        fn collect(&self, _game: &Match) -> Result<Vec<CollectedData>, StatsError> {
            *self.calls.lock().unwrap() += 1;
            Ok(Vec::new())
        }
    }

    struct DoublePoints;

    impl PointsCalculator for DoublePoints {
        fn calculate(
            &self,
            team: &str,
            _collected_data: &[CollectedData],
            context: &CalculationContext,
        ) -> TablePoints {
            let current = context.current(team);
            TablePoints {
                result: current.result * 2,
                bonus: current.bonus,
            }
        }

        fn priority(&self) -> u32 {
            300
        }
    }

    #[test]
    fn process_match_awards_result_and_bonus_points() {
        let game = with_tries(result(5, "Wales", 28, "Italy", 22), 4);
        let summary = StatsService::default()
            .process_match(&game, &LeagueRules::default())
            .unwrap();

        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.points["Wales"], TablePoints { result: 4, bonus: 1 });
        assert_eq!(summary.points["Italy"], TablePoints { result: 0, bonus: 1 });
    }

    #[test]
    fn custom_collectors_are_called_once_per_match() {
        let counter = Arc::new(CountingCollector::default());
        let service = StatsService::builder()
            .with_collector(counter.clone())
            .build();
        service.collect_all(&result(5, "Wales", 10, "Italy", 3)).unwrap();
        assert_eq!(*counter.calls.lock().unwrap(), 1);
        assert_eq!(service.collectors().len(), 4);
    }

    #[test]
    fn calculators_run_in_priority_order() {
        let service = StatsService::builder()
            .with_calculator(Arc::new(DoublePoints))
            .build();
        let summary = service
            .process_match(&result(5, "Wales", 30, "Italy", 3), &LeagueRules::default())
            .unwrap();
        assert_eq!(summary.points["Wales"].result, 8);
    }

    #[test]
    fn league_table_orders_by_points_then_difference() {
        let games = vec![
            result(5, "Wales", 20, "Italy", 10),
            result(6, "France", 40, "Italy", 10),
            result(12, "Italy", 15, "Wales", 15),
        ];
        let rows = StatsService::default()
            .league_table(&games, &TournamentContext::default())
            .unwrap();

        let order: Vec<&str> = rows.iter().map(|r| r.team.short_name.as_str()).collect();
        assert_eq!(order, vec!["Wales", "France", "Italy"]);

        let wales = &rows[0];
        assert_eq!(wales.standing.points, 6);
        assert_eq!((wales.standing.won, wales.standing.drawn), (1, 1));
        assert_eq!(wales.conference, "A");

        let italy = &rows[2];
        assert_eq!(italy.standing.played, 3);
        assert_eq!(italy.standing.points, 2);
        assert_eq!(italy.diff, -40);
    }

    #[test]
    fn league_table_skips_unplayed_matches() {
        let mut postponed = result(5, "Wales", 0, "Italy", 0);
        postponed.home.score = MatchScore::Postponed;
        postponed.away.score = MatchScore::Postponed;
        let rows = StatsService::default()
            .league_table(&[postponed], &TournamentContext::default())
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn player_time_table_splits_by_venue() {
        let game = played_match();
        let service = StatsService::default();

        let bath = service.player_time_table([&game], "Bath").unwrap();
        assert_eq!(bath.len(), 4);
        assert_eq!(bath["Danny Cipriani"].home["Bristol"], 65);
        assert!(bath["Danny Cipriani"].away.is_empty());

        let bristol = service.player_time_table([&game], "Bristol").unwrap();
        assert_eq!(bristol["Harry Randall"].away_total(), 80);
    }

    #[test]
    fn player_score_table_can_include_the_whole_squad() {
        let game = played_match();
        let service = StatsService::default();

        let scorers = service.player_score_table([&game], "Bath", false).unwrap();
        assert_eq!(scorers.len(), 2);
        assert_eq!(scorers["Semesa Rokoduguni"].home_total(), 15);

        let squad = service.player_score_table([&game], "Bath", true).unwrap();
        assert_eq!(squad.len(), 4);
        assert_eq!(squad["Unused Back"].home_total(), 0);
    }

    #[test]
    fn player_tables_ignore_other_teams_matches() {
        let mut game = result(5, "Wales", 20, "Italy", 10);
        game.home.lineup = Some(Lineup::from_iter([(10, Position::starter("Dan Biggar"))]));
        let table = StatsService::default()
            .player_time_table([&game], "Bath")
            .unwrap();
        assert!(table.is_empty());
    }
}
