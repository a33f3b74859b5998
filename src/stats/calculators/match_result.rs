use super::super::{outcome_for, CalculationContext, CollectedData, PointsCalculator, TablePoints};

/// Win and draw points.
pub struct MatchResultCalculator;

impl Default for MatchResultCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchResultCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl PointsCalculator for MatchResultCalculator {
    fn calculate(
        &self,
        team: &str,
        collected_data: &[CollectedData],
        context: &CalculationContext,
    ) -> TablePoints {
        let current = context.current(team);
        let Some(outcome) = outcome_for(team, collected_data) else {
            return current;
        };

        let result = if outcome.won() {
            context.rules.win_points
        } else if outcome.drawn() {
            context.rules.draw_points
        } else {
            0
        };

        TablePoints { result, ..current }
    }

    fn priority(&self) -> u32 {
        crate::stats::calculator_priority::RESULT
    }
}
