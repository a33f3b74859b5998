//! Reading tournaments from "dense" CSV exports: one row per player per
//! match, with the match details repeated on every row.

use std::collections::{BTreeMap, HashMap};
use std::io::Read;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::game::{match_date, MatchRecord, MatchScore, Side, SideRecord};
use crate::lineup::{Jersey, Lineup, Position, RawMinutes};
use crate::scores::{ScoreEvent, ScoreType, Scores};
use crate::shared::{Result, RugbyError};
use crate::team::TeamRef;

#[derive(Debug, Deserialize)]
struct DenseRow {
    round: Option<u32>,
    date: String,
    home: String,
    away: String,
    home_score: Option<f64>,
    away_score: Option<f64>,
    team: Option<String>,
    player: Option<String>,
    position: Option<Jersey>,
    on: Option<String>,
    off: Option<String>,
    yellow: Option<String>,
    red: Option<String>,
    #[serde(rename = "try")]
    try_minute: Option<f64>,
    conversion: Option<f64>,
    kick: Option<f64>,
    penalty: Option<f64>,
}

impl DenseRow {
    fn events(&self, player: &str) -> Vec<ScoreEvent> {
        [
            (ScoreType::Try, self.try_minute),
            (ScoreType::Conversion, self.conversion),
            (ScoreType::Kick, self.kick),
            (ScoreType::Penalty, self.penalty),
        ]
        .into_iter()
        .filter_map(|(kind, minute)| {
            let minute = minute.filter(|m| m.is_finite() && *m > 0.0)?;
            Some(ScoreEvent::new(kind, Some(player), minute.round() as u32))
        })
        .collect()
    }
}

#[derive(Default)]
struct SideRows {
    positions: BTreeMap<Jersey, Position>,
    events: Vec<ScoreEvent>,
}

struct MatchRows {
    round: Option<u32>,
    date: String,
    home: String,
    away: String,
    home_score: Option<f64>,
    away_score: Option<f64>,
    sides: HashMap<Side, SideRows>,
}

impl MatchRows {
    fn into_record(self) -> Result<MatchRecord> {
        let date = match_date::parse(&self.date).ok_or_else(|| {
            RugbyError::InvalidRecord(format!("unreadable date {:?}", self.date))
        })?;
        let mut sides = self.sides;
        let mut build = |side: Side, team: String, score: Option<f64>| -> Result<SideRecord> {
            let score = match score {
                Some(points) if points >= 0.0 && points.fract() == 0.0 => {
                    MatchScore::Final(points as u32)
                }
                Some(points) if points.is_nan() => MatchScore::Pending,
                Some(points) => {
                    return Err(RugbyError::InvalidRecord(format!(
                        "invalid score {points} for {team}"
                    )))
                }
                None => MatchScore::Pending,
            };
            let rows = sides.remove(&side);
            Ok(SideRecord {
                team: TeamRef::Key(team),
                score,
                lineup: rows
                    .as_ref()
                    .map(|rows| Lineup::new(rows.positions.clone())),
                scores: rows.map(|rows| Scores::new(rows.events)),
            })
        };

        let home = build(Side::Home, self.home, self.home_score)?;
        let away = build(Side::Away, self.away, self.away_score)?;
        Ok(MatchRecord {
            date,
            stadium: None,
            round: self.round,
            tournament: None,
            season: None,
            url: None,
            home,
            away,
        })
    }
}

fn raw_minutes(cell: Option<&str>) -> RawMinutes {
    match cell.map(str::trim) {
        None | Some("") => RawMinutes::Missing,
        Some(text) => text
            .parse::<f64>()
            .map(RawMinutes::Minute)
            .unwrap_or_else(|_| RawMinutes::Text(text.to_string())),
    }
}

/// Groups dense rows into match records by round, date, home and away, in
/// the order matches first appear. Matches with empty scores are fixtures.
pub fn read_matches<R: Read>(reader: R) -> Result<Vec<MatchRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut matches: Vec<MatchRows> = Vec::new();
    let mut index: HashMap<(Option<u32>, String, String, String), usize> = HashMap::new();

    for row in reader.deserialize::<DenseRow>() {
        let row = row?;
        let key = (row.round, row.date.clone(), row.home.clone(), row.away.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            matches.push(MatchRows {
                round: row.round,
                date: row.date.clone(),
                home: row.home.clone(),
                away: row.away.clone(),
                home_score: None,
                away_score: None,
                sides: HashMap::new(),
            });
            matches.len() - 1
        });
        let entry = &mut matches[slot];
        entry.home_score = entry.home_score.or(row.home_score);
        entry.away_score = entry.away_score.or(row.away_score);

        let (Some(team), Some(player)) = (row.team.as_deref(), row.player.as_deref()) else {
            continue;
        };
        let side = if team == row.home {
            Side::Home
        } else if team == row.away {
            Side::Away
        } else {
            warn!(team, home = %row.home, away = %row.away, "row team plays in neither side, skipping");
            continue;
        };

        let rows = entry.sides.entry(side).or_default();
        rows.events.extend(row.events(player));
        if let Some(jersey) = row.position {
            rows.positions.entry(jersey).or_insert_with(|| Position {
                name: player.to_string(),
                on: raw_minutes(row.on.as_deref()),
                off: raw_minutes(row.off.as_deref()),
                reds: raw_minutes(row.red.as_deref()),
                yellows: raw_minutes(row.yellow.as_deref()),
            });
        }
    }

    debug!(matches = matches.len(), "grouped dense rows");
    matches.into_iter().map(MatchRows::into_record).collect()
}
