use std::collections::BTreeMap;

use strum::IntoEnumIterator;

use crate::game::{Match, Side};

use super::super::{CollectedData, CollectedDataBatch, StatCollector, StatsError};

/// Points each player scored personally, one entry per player per side.
/// Lineup players who did not score are reported with zero so squad tables
/// can list them.
pub struct ScorerCollector;

impl Default for ScorerCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl ScorerCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for ScorerCollector {
    fn collect(&self, game: &Match) -> Result<CollectedDataBatch, StatsError> {
        let mut data = Vec::new();
        for side in Side::iter() {
            let match_side = game.side(side);
            let mut points: BTreeMap<String, u32> = BTreeMap::new();

            if let Some(lineup) = &match_side.lineup {
                for player in lineup.players() {
                    points.entry(player.name).or_default();
                }
            }
            if let Some(scores) = &match_side.scores {
                for event in scores.events() {
                    if let Some(player) = &event.player {
                        *points.entry(player.clone()).or_default() += event.value;
                    }
                }
            }

            let team = &match_side.team.short_name;
            let opponent = &game.team(side.opponent()).short_name;
            data.extend(points.into_iter().map(|(player, points)| {
                CollectedData::PlayerPoints {
                    player,
                    team: team.clone(),
                    venue: side,
                    opponent: opponent.clone(),
                    points,
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

    fn points_for(data: &[CollectedData], name: &str) -> Option<u32> {
        data.iter().find_map(|d| match d {
            CollectedData::PlayerPoints { player, points, .. } if player == name => Some(*points),
            _ => None,
        })
    }

    #[test]
    fn sums_points_per_resolved_player() {
        let data = ScorerCollector::new().collect(&played_match()).unwrap();
        assert_eq!(points_for(&data, "Semesa Rokoduguni"), Some(15));
        assert_eq!(points_for(&data, "Danny Cipriani"), Some(2));
        assert_eq!(points_for(&data, "Harry Randall"), Some(8));
        assert_eq!(points_for(&data, "Unused Back"), Some(0));
    }

    #[test]
    fn unnamed_scorers_are_skipped() {
        let data = ScorerCollector::new().collect(&played_match()).unwrap();
        let home_total: u32 = data
            .iter()
            .filter(|d| d.team() == "Bath")
            .map(|d| match d {
                CollectedData::PlayerPoints { points, .. } => *points,
                _ => 0,
            })
            .sum();
        assert_eq!(home_total, 17);
    }

    #[test]
    fn scorers_without_lineups_are_still_reported() {
        let mut game = played_match();
        game.away.lineup = None;
        let data = ScorerCollector::new().collect(&game).unwrap();
        assert_eq!(points_for(&data, "Harry Randall"), Some(8));
    }
}
