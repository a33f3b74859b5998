// Library crate for rugby match statistics
// Exposes the public API for the CLI and integration tests

pub mod config;
pub mod game;
pub mod lineup;
pub mod player;
pub mod scores;
pub mod shared;
pub mod stats;
pub mod team;
pub mod tournament;

// Re-export commonly used types for easier access in tests
pub use config::{LeagueRules, Minute, FULL_TIME};
pub use game::{Match, MatchRecord, MatchScore, MatchSide, OnFieldPoints, PointRate, Side};
pub use lineup::{Lineup, Position, RangeSet, TimeRange};
pub use player::Player;
pub use scores::{ScoreEvent, ScoreType, Scores};
pub use shared::{Entity, RugbyError};
pub use stats::{LeagueRow, StatsService};
pub use team::{Team, TeamRef};
pub use tournament::{league_tables, Tournament, TournamentContext};
