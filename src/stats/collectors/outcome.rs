use crate::game::{Match, Side};

use super::super::{CollectedData, CollectedDataBatch, StatCollector, StatsError, TeamOutcome};

/// Final score and tries for both sides of a played match.
pub struct OutcomeCollector;

impl Default for OutcomeCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl OutcomeCollector {
    pub fn new() -> Self {
        Self
    }
}

impl StatCollector for OutcomeCollector {
    fn collect(&self, game: &Match) -> Result<CollectedDataBatch, StatsError> {
        let (Some(home), Some(away)) = (
            game.home.score.final_points(),
            game.away.score.final_points(),
        ) else {
            return Err(StatsError::Validation(format!(
                "OutcomeCollector requires a played match, got {game}"
            )));
        };

        let data = [(Side::Home, home, away), (Side::Away, away, home)]
            .into_iter()
            .map(|(side, scored, conceded)| {
                CollectedData::Outcome(TeamOutcome {
                    team: game.team(side).short_name.clone(),
                    venue: side,
                    opponent: game.team(side.opponent()).short_name.clone(),
                    scored,
                    conceded,
                    tries: game.side(side).tries(),
                })
            })
            .collect();

        Ok(data)
    }
}
