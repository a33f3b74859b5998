use super::super::{outcome_for, CalculationContext, CollectedData, PointsCalculator, TablePoints};

/// One bonus point for losing by the configured margin or less.
pub struct LosingBonusCalculator;

impl Default for LosingBonusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl LosingBonusCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl PointsCalculator for LosingBonusCalculator {
    fn calculate(
        &self,
        team: &str,
        collected_data: &[CollectedData],
        context: &CalculationContext,
    ) -> TablePoints {
        let current = context.current(team);
        let close_loss = outcome_for(team, collected_data).is_some_and(|outcome| {
            outcome.lost() && outcome.conceded - outcome.scored <= context.rules.losing_bonus_margin
        });

        if close_loss {
            TablePoints {
                bonus: current.bonus + 1,
                ..current
            }
        } else {
            current
        }
    }

    fn priority(&self) -> u32 {
        crate::stats::calculator_priority::BONUS
    }
}

/// One bonus point for scoring the configured number of tries, win or lose.
/// Matches without scoring events never earn it.
pub struct TryBonusCalculator;

impl Default for TryBonusCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl TryBonusCalculator {
    pub fn new() -> Self {
        Self
    }
}

impl PointsCalculator for TryBonusCalculator {
    fn calculate(
        &self,
        team: &str,
        collected_data: &[CollectedData],
        context: &CalculationContext,
    ) -> TablePoints {
        let current = context.current(team);
        let enough_tries = outcome_for(team, collected_data)
            .and_then(|outcome| outcome.tries)
            .is_some_and(|tries| tries >= context.rules.try_bonus_threshold);

        if enough_tries {
            TablePoints {
                bonus: current.bonus + 1,
                ..current
            }
        } else {
            current
        }
    }

    fn priority(&self) -> u32 {
        crate::stats::calculator_priority::BONUS
    }
}
