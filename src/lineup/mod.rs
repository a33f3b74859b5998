mod errors;
mod minutes;
mod position;
mod ranges;

pub use errors::IntervalError;
pub use minutes::RawMinutes;
pub use position::{is_starter, playing_ranges, Cards, Position};
pub use ranges::{RangeSet, TimeRange};

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::Minute;
use crate::player::Player;

/// Jersey numbers run 1..=23; 1..=15 start the match.
pub type Jersey = u8;

pub const LAST_STARTER: Jersey = 15;

/// One team's lineup for one match, with playing time worked out for every
/// slot when the lineup is built.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Jersey, Position>", into = "BTreeMap<Jersey, Position>")]
pub struct Lineup {
    positions: BTreeMap<Jersey, Position>,
    playing: BTreeMap<Jersey, RangeSet>,
    anomalies: BTreeMap<Jersey, IntervalError>,
}

impl Lineup {
    pub fn new(positions: BTreeMap<Jersey, Position>) -> Self {
        let mut playing = BTreeMap::new();
        let mut anomalies = BTreeMap::new();

        for (&jersey, position) in &positions {
            match position.playing(jersey) {
                Ok(ranges) => {
                    playing.insert(jersey, ranges);
                }
                Err(err) => {
                    warn!(
                        jersey,
                        player = %position.name,
                        error = %err,
                        "unusable substitution data, counting no playing time"
                    );
                    playing.insert(jersey, RangeSet::empty());
                    anomalies.insert(jersey, err);
                }
            }
        }

        Self {
            positions,
            playing,
            anomalies,
        }
    }

    pub fn positions(&self) -> &BTreeMap<Jersey, Position> {
        &self.positions
    }

    pub fn get(&self, jersey: Jersey) -> Option<&Position> {
        self.positions.get(&jersey)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Players in jersey order.
    pub fn players(&self) -> Vec<Player> {
        self.positions.values().map(Position::player).collect()
    }

    /// First slot worn by the named player.
    pub fn find(&self, name: &str) -> Option<Jersey> {
        self.positions
            .iter()
            .find(|(_, position)| position.name == name)
            .map(|(&jersey, _)| jersey)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// The full lineup name matching `fragment`: an exact match, or else the
    /// first name containing it.
    pub fn resolve_name(&self, fragment: &str) -> Option<&str> {
        let names = || self.positions.values().map(|position| position.name.as_str());
        names()
            .find(|name| *name == fragment)
            .or_else(|| names().find(|name| name.contains(fragment)))
    }

    pub fn playing(&self, name: &str) -> Option<&RangeSet> {
        self.find(name).and_then(|jersey| self.playing.get(&jersey))
    }

    pub fn playing_at(&self, jersey: Jersey) -> Option<&RangeSet> {
        self.playing.get(&jersey)
    }

    pub fn game_time(&self, name: &str) -> Option<Minute> {
        self.playing(name).map(RangeSet::total_minutes)
    }

    /// `(jersey, name, minutes played)` for every slot.
    pub fn game_times(&self) -> Vec<(Jersey, &str, Minute)> {
        self.positions
            .iter()
            .map(|(&jersey, position)| {
                let minutes = self
                    .playing
                    .get(&jersey)
                    .map(RangeSet::total_minutes)
                    .unwrap_or_default();
                (jersey, position.name.as_str(), minutes)
            })
            .collect()
    }

    /// Slots whose substitution data could not be used.
    pub fn anomalies(&self) -> &BTreeMap<Jersey, IntervalError> {
        &self.anomalies
    }
}

impl From<BTreeMap<Jersey, Position>> for Lineup {
    fn from(positions: BTreeMap<Jersey, Position>) -> Self {
        Self::new(positions)
    }
}

impl From<Lineup> for BTreeMap<Jersey, Position> {
    fn from(lineup: Lineup) -> Self {
        lineup.positions
    }
}

impl FromIterator<(Jersey, Position)> for Lineup {
    fn from_iter<T: IntoIterator<Item = (Jersey, Position)>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (jersey, name, minutes) in self.game_times() {
            writeln!(f, "{jersey}\t{name}\t{minutes}")?;
            if jersey == LAST_STARTER {
                writeln!(f, "{}", "---".repeat(5))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Lineup {
        Lineup::from_iter([
            (1, Position::starter("Allan Dell").with_off(&[55.0])),
            (15, Position::starter("Stuart Hogg")),
            (16, Position::new("George Turner").with_on(&[55.0])),
            (17, Position::new("Unused Prop")),
            (18, Position::new("Bad Data").with_on(&[0.0]).with_off(&[20.0, 40.0])),
        ])
    }

    #[test]
    fn computes_game_times_per_slot() {
        let lineup = sample();
        assert_eq!(lineup.game_time("Allan Dell"), Some(55));
        assert_eq!(lineup.game_time("Stuart Hogg"), Some(80));
        assert_eq!(lineup.game_time("George Turner"), Some(25));
        assert_eq!(lineup.game_time("Unused Prop"), Some(0));
        assert_eq!(lineup.game_time("Nobody"), None);
    }

    #[test]
    fn malformed_slots_play_no_minutes_and_are_flagged() {
        let lineup = sample();
        assert_eq!(lineup.game_time("Bad Data"), Some(0));
        assert!(lineup.playing("Bad Data").unwrap().is_empty());
        assert!(matches!(
            lineup.anomalies().get(&18),
            Some(IntervalError::UnmatchedOff { .. })
        ));
        assert_eq!(lineup.anomalies().len(), 1);
    }

    #[test]
    fn starters_without_events_play_the_full_match() {
        let lineup: Lineup =
            serde_json::from_str(r#"{"1": {"name": "Prop"}, "16": {"name": "Sub"}}"#).unwrap();
        assert_eq!(lineup.game_time("Prop"), Some(80));
        assert_eq!(lineup.game_time("Sub"), Some(0));
        assert!(lineup.anomalies().is_empty());
    }

    #[test]
    fn resolves_partial_names() {
        let lineup = sample();
        assert_eq!(lineup.resolve_name("Hogg"), Some("Stuart Hogg"));
        assert_eq!(lineup.resolve_name("Stuart Hogg"), Some("Stuart Hogg"));
        assert_eq!(lineup.resolve_name("Russell"), None);
    }

    #[test]
    fn reads_jersey_keyed_json() {
        let lineup: Lineup = serde_json::from_str(
            r#"{
                "2": {"name": "Fraser Brown", "on": 0, "off": "62", "reds": null, "yellows": null},
                "1": {"name": "Allan Dell", "on": [0], "off": [50]},
                "16": {"name": "George Turner", "on": 62}
            }"#,
        )
        .unwrap();

        assert_eq!(lineup.len(), 3);
        assert_eq!(lineup.players()[0].name, "Allan Dell");
        assert_eq!(lineup.game_time("Fraser Brown"), Some(62));
        assert_eq!(lineup.game_time("George Turner"), Some(18));

        let json = serde_json::to_string(&lineup).unwrap();
        let reread: Lineup = serde_json::from_str(&json).unwrap();
        assert_eq!(reread, lineup);
    }

    #[test]
    fn display_marks_the_bench() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "1\tAllan Dell\t55");
        assert_eq!(lines[2], "---------------");
        assert_eq!(lines[3], "16\tGeorge Turner\t25");
    }
}
