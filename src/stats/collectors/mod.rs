mod outcome;
mod playing_time;
mod scorers;

pub use outcome::OutcomeCollector;
pub use playing_time::PlayingTimeCollector;
pub use scorers::ScorerCollector;
