use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{Minute, FULL_TIME};
use crate::player::Player;

use super::{IntervalError, Jersey, RangeSet, RawMinutes, LAST_STARTER};

/// One lineup slot: the player wearing a jersey and their raw
/// substitution and card fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub name: String,
    #[serde(default)]
    pub on: RawMinutes,
    #[serde(default)]
    pub off: RawMinutes,
    #[serde(default)]
    pub reds: RawMinutes,
    #[serde(default)]
    pub yellows: RawMinutes,
}

/// Card minutes shown to a player.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cards {
    pub reds: Vec<Minute>,
    pub yellows: Vec<Minute>,
}

impl Position {
    /// A named slot with no recorded events (an unused replacement).
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on: RawMinutes::Missing,
            off: RawMinutes::Missing,
            reds: RawMinutes::Missing,
            yellows: RawMinutes::Missing,
        }
    }

    /// A player on from kick-off.
    pub fn starter(name: impl Into<String>) -> Self {
        Self::new(name).with_on(&[0.0])
    }

    pub fn with_on(mut self, minutes: &[f64]) -> Self {
        self.on = RawMinutes::from_minutes(minutes);
        self
    }

    pub fn with_off(mut self, minutes: &[f64]) -> Self {
        self.off = RawMinutes::from_minutes(minutes);
        self
    }

    pub fn with_cards(mut self, reds: &[f64], yellows: &[f64]) -> Self {
        self.reds = RawMinutes::from_minutes(reds);
        self.yellows = RawMinutes::from_minutes(yellows);
        self
    }

    pub fn player(&self) -> Player {
        Player::new(self.name.clone())
    }

    /// The minutes this player spent on the field wearing `jersey`.
    /// Starting jerseys with no "on" data count as on from kick-off.
    pub fn playing(&self, jersey: Jersey) -> Result<RangeSet, IntervalError> {
        playing_ranges(&self.on, &self.off, is_starter(jersey))
    }

    /// Card minutes; unreadable card fields count as no cards.
    pub fn cards(&self) -> Cards {
        Cards {
            reds: card_minutes(&self.name, &self.reds),
            yellows: card_minutes(&self.name, &self.yellows),
        }
    }
}

pub fn is_starter(jersey: Jersey) -> bool {
    (1..=LAST_STARTER).contains(&jersey)
}

/// Turns raw on/off fields into a range-set.
///
/// A player who comes on with no recorded "off" plays to full time, and
/// every unmatched "on" is closed at full time. A starter, or a player with
/// "off" events, who has no "on" is on from minute 0.
pub fn playing_ranges(
    on: &RawMinutes,
    off: &RawMinutes,
    starter: bool,
) -> Result<RangeSet, IntervalError> {
    let mut ons = on.coerce()?;
    let mut offs = off.coerce()?;

    let went_off = offs.iter().any(|minute| !minute.is_nan());
    if (starter || went_off) && ons.iter().all(|minute| minute.is_nan()) {
        ons = vec![0.0];
    }

    let came_on = ons.iter().any(|minute| !minute.is_nan());
    if came_on && offs.iter().all(|minute| minute.is_nan()) {
        offs = vec![f64::from(FULL_TIME)];
    }
    while ons.len() > offs.len() {
        offs.push(f64::from(FULL_TIME));
    }

    let ons: Vec<f64> = ons.into_iter().filter(|m| !m.is_nan()).collect();
    let offs: Vec<f64> = offs.into_iter().filter(|m| !m.is_nan()).collect();

    if offs.len() > ons.len() {
        return Err(IntervalError::UnmatchedOff {
            ons: ons.len(),
            offs: offs.len(),
        });
    }

    let boundaries = ons
        .iter()
        .chain(offs.iter())
        .map(|&minute| to_minute(minute))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RangeSet::from_boundaries(boundaries, FULL_TIME))
}

fn to_minute(value: f64) -> Result<Minute, IntervalError> {
    if value < 0.0 {
        return Err(IntervalError::NegativeMinute(value));
    }
    Ok((value.round() as Minute).min(FULL_TIME))
}

fn card_minutes(name: &str, raw: &RawMinutes) -> Vec<Minute> {
    match raw.known() {
        Ok(minutes) => minutes
            .into_iter()
            .filter_map(|minute| to_minute(minute).ok())
            .collect(),
        Err(err) => {
            warn!(player = name, error = %err, "ignoring unreadable card minutes");
            Vec::new()
        }
    }
}
