use strum::IntoEnumIterator;

use crate::game::{Match, Side};

use super::super::{CollectedData, CollectedDataBatch, StatCollector, StatsError};

/// Minutes played by every lineup slot. Matches without lineups yield
/// nothing.
pub struct PlayingTimeCollector;

impl Default for PlayingTimeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl PlayingTimeCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for PlayingTimeCollector {
    fn collect(&self, game: &Match) -> Result<CollectedDataBatch, StatsError> {
        let mut data = Vec::new();
        for side in Side::iter() {
            let Some(lineup) = &game.side(side).lineup else {
                continue;
            };
            let team = &game.team(side).short_name;
            let opponent = &game.team(side.opponent()).short_name;

            data.extend(lineup.game_times().into_iter().map(|(_, name, minutes)| {
                CollectedData::PlayingTime {
                    player: name.to_string(),
                    team: team.clone(),
                    venue: side,
                    opponent: opponent.clone(),
                    minutes,
                }
            }));
        }
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::collectors::test_support::played_match;

    fn minutes_for(data: &[CollectedData], name: &str) -> Option<u32> {
        data.iter().find_map(|d| match d {
            CollectedData::PlayingTime { player, minutes, .. } if player == name => Some(*minutes),
            _ => None,
        })
    }

    #[test]
    fn reports_every_slot() {
        let data = PlayingTimeCollector::new().collect(&played_match()).unwrap();
        assert_eq!(data.len(), 5);
        assert_eq!(minutes_for(&data, "Danny Cipriani"), Some(65));
        assert_eq!(minutes_for(&data, "Rhys Priestland"), Some(15));
        assert_eq!(minutes_for(&data, "Unused Back"), Some(0));
        assert_eq!(minutes_for(&data, "Harry Randall"), Some(80));
        assert!(data
            .iter()
            .any(|d| matches!(d, CollectedData::PlayingTime { venue: Side::Away, opponent, .. } if opponent == "Bath")));
    }

    #[test]
    fn results_only_matches_yield_nothing() {
        let mut game = played_match();
        game.home.lineup = None;
        game.away.lineup = None;
        assert!(PlayingTimeCollector::new().collect(&game).unwrap().is_empty());
    }
}
