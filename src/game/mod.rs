// Public API
pub use aggregate::{CovarianceMatrix, OnFieldPoints, PointRate};
pub use fixture::{Match, MatchSide};
pub use models::{match_date, MatchRecord, MatchScore, Side, SideRecord};

// Internal modules
mod aggregate;
mod fixture;
mod models;
