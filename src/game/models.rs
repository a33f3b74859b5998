use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::lineup::Lineup;
use crate::scores::Scores;
use crate::team::TeamRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Home => write!(f, "H"),
            Side::Away => write!(f, "A"),
        }
    }
}

/// A side's final score, or why there is none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "ScoreValue", into = "ScoreValue")]
pub enum MatchScore {
    Final(u32),
    /// Not played yet.
    #[default]
    Pending,
    Postponed,
    Cancelled,
}

impl MatchScore {
    /// Points scored, `NaN` unless the match has a final score.
    pub fn points(&self) -> f64 {
        match self {
            MatchScore::Final(points) => f64::from(*points),
            _ => f64::NAN,
        }
    }

    pub fn final_points(&self) -> Option<u32> {
        match self {
            MatchScore::Final(points) => Some(*points),
            _ => None,
        }
    }
}

/// Wire shape of a score: a number, `"P"`, `"C"`, or null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum ScoreValue {
    Null,
    Integer(u32),
    Float(f64),
    Text(String),
}

impl TryFrom<ScoreValue> for MatchScore {
    type Error = String;

    fn try_from(value: ScoreValue) -> Result<Self, Self::Error> {
        match value {
            ScoreValue::Null => Ok(MatchScore::Pending),
            ScoreValue::Integer(points) => Ok(MatchScore::Final(points)),
            ScoreValue::Float(points) if points.is_nan() => Ok(MatchScore::Pending),
            ScoreValue::Float(points) if points >= 0.0 && points.fract() == 0.0 => {
                Ok(MatchScore::Final(points as u32))
            }
            ScoreValue::Float(points) => Err(format!("invalid score {points}")),
            ScoreValue::Text(text) => match text.trim() {
                "" => Ok(MatchScore::Pending),
                "P" | "p" => Ok(MatchScore::Postponed),
                "C" | "c" => Ok(MatchScore::Cancelled),
                other => other
                    .parse::<u32>()
                    .map(MatchScore::Final)
                    .map_err(|_| format!("invalid score {other:?}")),
            },
        }
    }
}

impl From<MatchScore> for ScoreValue {
    fn from(score: MatchScore) -> Self {
        match score {
            MatchScore::Final(points) => ScoreValue::Integer(points),
            MatchScore::Pending => ScoreValue::Null,
            MatchScore::Postponed => ScoreValue::Text("P".to_string()),
            MatchScore::Cancelled => ScoreValue::Text("C".to_string()),
        }
    }
}

/// One side of a match record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideRecord {
    pub team: TeamRef,
    #[serde(default)]
    pub score: MatchScore,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lineup: Option<Lineup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scores: Option<Scores>,
}

/// A match as delivered by scrapers and stored in tournament files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(with = "match_date")]
    pub date: NaiveDateTime,
    #[serde(default)]
    pub stadium: Option<String>,
    #[serde(default, alias = "tround", skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tournament: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub home: SideRecord,
    pub away: SideRecord,
}

/// Dates are written as `YYYY-MM-DDTHH:MM:SS`, with fractional seconds only
/// when present, and read from most common renderings.
pub mod match_date {
    use super::*;
    use serde::{de, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
    const FRACTIONAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    pub fn parse(text: &str) -> Option<NaiveDateTime> {
        let text = text.trim();
        if let Ok(stamped) = DateTime::parse_from_rfc3339(text) {
            return Some(stamped.naive_local());
        }
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .or_else(|| {
                ["%Y-%m-%d", "%d/%m/%Y"]
                    .iter()
                    .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }

    pub fn serialize<S: Serializer>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        let format = if date.nanosecond() == 0 {
            FORMAT
        } else {
            FRACTIONAL_FORMAT
        };
        serializer.serialize_str(&date.format(format).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse(&text).ok_or_else(|| de::Error::custom(format!("unreadable date {text:?}")))
    }
}
