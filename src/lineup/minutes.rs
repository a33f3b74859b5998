use serde::{Deserialize, Serialize};

use super::IntervalError;

/// A substitution or card field exactly as the source delivered it.
///
/// Scrapers emit a bare minute, a list, a list rendered as text
/// (`"[12, 55]"`, `"12,55"`), or nothing at all. The raw shape is kept so a
/// lineup serializes back to what was read.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawMinutes {
    #[default]
    Missing,
    Minute(f64),
    Text(String),
    List(Vec<Option<f64>>),
}

impl RawMinutes {
    pub fn from_minutes(minutes: &[f64]) -> Self {
        match minutes {
            [] => RawMinutes::Missing,
            [single] => RawMinutes::Minute(*single),
            many => RawMinutes::List(many.iter().copied().map(Some).collect()),
        }
    }

    /// Coerces to a list of minutes where gaps are `NaN`. An absent value is
    /// `[NaN]`.
    pub fn coerce(&self) -> Result<Vec<f64>, IntervalError> {
        match self {
            RawMinutes::Missing => Ok(vec![f64::NAN]),
            RawMinutes::Minute(minute) => Ok(vec![*minute]),
            RawMinutes::List(minutes) if minutes.is_empty() => Ok(vec![f64::NAN]),
            RawMinutes::List(minutes) => Ok(minutes
                .iter()
                .map(|minute| minute.unwrap_or(f64::NAN))
                .collect()),
            RawMinutes::Text(text) => parse_text(text),
        }
    }

    /// The recorded minutes with gaps dropped.
    pub fn known(&self) -> Result<Vec<f64>, IntervalError> {
        Ok(self
            .coerce()?
            .into_iter()
            .filter(|minute| !minute.is_nan())
            .collect())
    }
}

fn parse_text(text: &str) -> Result<Vec<f64>, IntervalError> {
    let inner = text
        .trim()
        .trim_start_matches(['[', '('])
        .trim_end_matches([']', ')']);

    let minutes: Vec<f64> = inner
        .split([',', ';'])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_token)
        .collect::<Result<_, _>>()?;

    if minutes.is_empty() {
        Ok(vec![f64::NAN])
    } else {
        Ok(minutes)
    }
}

fn parse_token(token: &str) -> Result<f64, IntervalError> {
    match token.to_ascii_lowercase().as_str() {
        "nan" | "none" | "null" => Ok(f64::NAN),
        _ => token
            .parse::<f64>()
            .map_err(|_| IntervalError::NonNumeric(token.to_string())),
    }
}
