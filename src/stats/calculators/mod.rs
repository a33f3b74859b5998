mod bonus;
mod match_result;

pub use bonus::{LosingBonusCalculator, TryBonusCalculator};
pub use match_result::MatchResultCalculator;
