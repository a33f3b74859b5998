//! Per-match player statistics built from playing time and scoring events.

use serde::Serialize;

use crate::config::Minute;
use crate::lineup::RangeSet;
use crate::player::Player;
use crate::shared::{Entity, Result, RugbyError};

use super::fixture::Match;
use super::models::Side;

/// Points scored while a player was on the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OnFieldPoints {
    /// By the player's own side.
    pub points_for: u32,
    /// By the opposition.
    pub points_against: u32,
}

/// Points per minute over some window. `NaN` when the window is empty or
/// no scoring events were recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointRate {
    pub rate_for: f64,
    pub rate_against: f64,
}

impl PointRate {
    pub const UNDEFINED: PointRate = PointRate {
        rate_for: f64::NAN,
        rate_against: f64::NAN,
    };

    pub fn over(points: OnFieldPoints, minutes: Minute) -> Self {
        if minutes == 0 {
            return Self::UNDEFINED;
        }
        let minutes = f64::from(minutes);
        Self {
            rate_for: f64::from(points.points_for) / minutes,
            rate_against: f64::from(points.points_against) / minutes,
        }
    }
}

/// Pairwise mutual rates within one lineup. Above the diagonal, row player's
/// "for" rate with the column player; below it, the negated "against" rate;
/// the diagonal is `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CovarianceMatrix {
    pub players: Vec<Player>,
    pub values: Vec<Vec<f64>>,
}

impl Match {
    fn playing(&self, name: &str) -> Result<(Side, &RangeSet)> {
        let side = self
            .side_of(name)
            .ok_or_else(|| RugbyError::not_found(Entity::Player, name))?;
        let ranges = self
            .side(side)
            .lineup
            .as_ref()
            .and_then(|lineup| lineup.playing(name))
            .ok_or_else(|| RugbyError::not_found(Entity::Player, name))?;
        Ok((side, ranges))
    }

    /// Minutes the named player spent on the field.
    pub fn playtime(&self, name: &str) -> Result<Minute> {
        self.playing(name).map(|(_, ranges)| ranges.total_minutes())
    }

    /// Points for and against while `ranges` were being played, seen from
    /// `side`. `None` when scoring events are missing.
    pub fn points_during(&self, side: Side, ranges: &RangeSet) -> Option<OnFieldPoints> {
        let own = self.side(side).scores.as_ref()?;
        let opposition = self.side(side.opponent()).scores.as_ref()?;
        Some(OnFieldPoints {
            points_for: own.points_in(ranges),
            points_against: opposition.points_in(ranges),
        })
    }

    /// Points scored by either side while the named player was on.
    pub fn onfield_points(&self, name: &str) -> Result<OnFieldPoints> {
        let (side, ranges) = self.playing(name)?;
        Ok(self.points_during(side, ranges).unwrap_or_default())
    }

    pub fn onfield_rate(&self, name: &str) -> Result<PointRate> {
        let (side, ranges) = self.playing(name)?;
        Ok(match self.points_during(side, ranges) {
            Some(points) => PointRate::over(points, ranges.total_minutes()),
            None => PointRate::UNDEFINED,
        })
    }

    /// Minutes both players were on the field together.
    pub fn shared_time(&self, first: &str, second: &str) -> Result<RangeSet> {
        let (_, a) = self.playing(first)?;
        let (_, b) = self.playing(second)?;
        Ok(a.intersect(b))
    }

    /// Scoring rate while both players were on, seen from `first`'s side.
    pub fn mutual_rate(&self, first: &str, second: &str) -> Result<PointRate> {
        let (side, _) = self.playing(first)?;
        let shared = self.shared_time(first, second)?;
        Ok(match self.points_during(side, &shared) {
            Some(points) => PointRate::over(points, shared.total_minutes()),
            None => PointRate::UNDEFINED,
        })
    }

    /// Raw points and shared minutes behind [`Match::mutual_rate`], for
    /// summing across matches.
    pub fn mutual_points(&self, first: &str, second: &str) -> Result<(OnFieldPoints, Minute)> {
        let (side, _) = self.playing(first)?;
        let shared = self.shared_time(first, second)?;
        let points = self.points_during(side, &shared).unwrap_or_default();
        Ok((points, shared.total_minutes()))
    }

    /// Mutual-rate matrix over one side's lineup, in jersey order.
    pub fn covariance(&self, side: Side) -> Result<CovarianceMatrix> {
        let lineup = self
            .side(side)
            .lineup
            .as_ref()
            .ok_or_else(|| RugbyError::not_found(Entity::Team, &self.team(side).short_name))?;
        let players = lineup.players();

        let mut values = vec![vec![f64::NAN; players.len()]; players.len()];
        for (i, row) in players.iter().enumerate() {
            for (j, column) in players.iter().enumerate() {
                if i == j {
                    continue;
                }
                let rate = self.mutual_rate(&row.name, &column.name)?;
                values[i][j] = if i < j {
                    rate.rate_for
                } else {
                    -rate.rate_against
                };
            }
        }

        Ok(CovarianceMatrix { players, values })
    }
}
