use thiserror::Error;

/// On/off data that cannot be turned into playing time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error("non-numeric minute: {0:?}")]
    NonNumeric(String),

    #[error("{offs} off events recorded against {ons} on events")]
    UnmatchedOff { ons: usize, offs: usize },

    #[error("negative minute: {0}")]
    NegativeMinute(f64),
}
