pub mod calculators;
pub mod collectors;
pub mod service;

mod errors;
pub mod models;
pub mod standings;

pub use errors::StatsError;
pub use models::*;
pub use service::{StatsService, StatsServiceBuilder};
pub use standings::{Standings, TeamStanding};

use std::collections::HashMap;

use crate::config::LeagueRules;
use crate::game::Match;

pub type CollectedDataBatch = Vec<CollectedData>;

/// Priority constants for table-points calculators.
/// Lower values run first. Calculators with higher priority
/// can read and adjust points from lower-priority calculators.
pub mod calculator_priority {
    /// Win/draw/loss points
    pub const RESULT: u32 = 100;
    /// Bonus points on top of the result
    pub const BONUS: u32 = 200;
}

pub trait StatCollector: Send + Sync {
    fn collect(&self, game: &Match) -> Result<CollectedDataBatch, StatsError>;
}

pub trait PointsCalculator: Send + Sync {
    /// Returns the team's table points for the match after this
    /// calculator has run.
    fn calculate(
        &self,
        team: &str,
        collected_data: &[CollectedData],
        context: &CalculationContext,
    ) -> TablePoints;

    fn priority(&self) -> u32;
}

pub struct CalculationContext<'a> {
    pub rules: &'a LeagueRules,
    pub current_points: &'a HashMap<String, TablePoints>,
}

impl<'a> CalculationContext<'a> {
    pub fn new(rules: &'a LeagueRules, current_points: &'a HashMap<String, TablePoints>) -> Self {
        Self {
            rules,
            current_points,
        }
    }

    pub fn current(&self, team: &str) -> TablePoints {
        self.current_points.get(team).copied().unwrap_or_default()
    }
}

/// The outcome of a match for `team`, found among collected data.
pub fn outcome_for<'a>(team: &str, collected_data: &'a [CollectedData]) -> Option<&'a TeamOutcome> {
    collected_data.iter().find_map(|data| match data {
        CollectedData::Outcome(outcome) if outcome.team == team => Some(outcome),
        _ => None,
    })
}
