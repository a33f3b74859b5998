use thiserror::Error;

use crate::stats::StatsError;

/// Kinds of entity a lookup can miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Entity {
    Team,
    Player,
    Match,
}

#[derive(Error, Debug)]
pub enum RugbyError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: Entity, key: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl RugbyError {
    pub fn not_found(entity: Entity, key: impl Into<String>) -> Self {
        RugbyError::NotFound {
            entity,
            key: key.into(),
        }
    }

    /// True for lookups that missed, which callers usually map to their own
    /// "not found" response.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RugbyError::NotFound { .. })
    }
}

pub type Result<T, E = RugbyError> = std::result::Result<T, E>;
