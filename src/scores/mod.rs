use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::config::Minute;
use crate::lineup::RangeSet;

/// Ways to score, each worth a fixed number of points.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScoreType {
    Try,
    Conversion,
    Penalty,
    Kick,
    #[serde(rename = "drop goal", alias = "drop_goal", alias = "drop")]
    #[strum(to_string = "drop goal", serialize = "drop_goal", serialize = "drop")]
    DropGoal,
}

impl ScoreType {
    pub fn points(&self) -> u32 {
        match self {
            ScoreType::Try => 5,
            ScoreType::Conversion => 2,
            ScoreType::Penalty | ScoreType::Kick | ScoreType::DropGoal => 3,
        }
    }
}

/// A single scoring event for one side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEvent {
    #[serde(rename = "type")]
    pub kind: ScoreType,
    pub player: Option<String>,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub value: u32,
    #[serde(deserialize_with = "whole_number::deserialize")]
    pub minute: Minute,
}

/// Event numbers may arrive as integral floats (`14.0`).
mod whole_number {
    use serde::{de, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Integer(u32),
        Float(f64),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        match Number::deserialize(deserializer)? {
            Number::Integer(value) => Ok(value),
            Number::Float(value)
                if value >= 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) =>
            {
                Ok(value as u32)
            }
            Number::Float(value) => Err(de::Error::custom(format!(
                "expected a whole non-negative number, found {value}"
            ))),
        }
    }
}

impl ScoreEvent {
    /// An event worth the standard value for its type.
    pub fn new(kind: ScoreType, player: Option<&str>, minute: Minute) -> Self {
        Self {
            kind,
            player: player.map(str::to_string),
            value: kind.points(),
            minute,
        }
    }

    pub fn scored_by(&self, name: &str) -> bool {
        self.player.as_deref() == Some(name)
    }
}

/// One side's scoring events for a match, ordered by minute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<ScoreEvent>", into = "Vec<ScoreEvent>")]
pub struct Scores {
    events: Vec<ScoreEvent>,
}

impl Scores {
    pub fn new(mut events: Vec<ScoreEvent>) -> Self {
        events.sort_by_key(|event| event.minute);
        Self { events }
    }

    pub fn events(&self) -> &[ScoreEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn total(&self) -> u32 {
        self.events.iter().map(|event| event.value).sum()
    }

    pub fn count(&self, kind: ScoreType) -> u32 {
        self.events.iter().filter(|event| event.kind == kind).count() as u32
    }

    /// Events whose minute falls inside any of the ranges, bounds included.
    /// Every score type counts, conversions included.
    pub fn in_ranges<'a>(&'a self, ranges: &'a RangeSet) -> impl Iterator<Item = &'a ScoreEvent> {
        self.events
            .iter()
            .filter(move |event| ranges.contains(event.minute))
    }

    pub fn points_in(&self, ranges: &RangeSet) -> u32 {
        self.in_ranges(ranges).map(|event| event.value).sum()
    }

    /// Points the named player scored personally.
    pub fn points_by(&self, name: &str) -> u32 {
        self.events
            .iter()
            .filter(|event| event.scored_by(name))
            .map(|event| event.value)
            .sum()
    }

    pub(crate) fn events_mut(&mut self) -> impl Iterator<Item = &mut ScoreEvent> {
        self.events.iter_mut()
    }
}

impl From<Vec<ScoreEvent>> for Scores {
    fn from(events: Vec<ScoreEvent>) -> Self {
        Self::new(events)
    }
}

impl From<Scores> for Vec<ScoreEvent> {
    fn from(scores: Scores) -> Self {
        scores.events
    }
}
