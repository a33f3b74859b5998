use rugby::{Match, MatchScore, Side, Tournament};

const MATCH_JSON: &str = r##"{
    "date": "2019-10-05 19:35",
    "stadium": "Scotstoun",
    "tround": 2,
    "home": {
        "team": {"name": "Glasgow Warriors", "short name": "Glasgow",
                 "colors": {"primary": "#1d3c6e"}, "country": "Scotland"},
        "score": 24,
        "lineup": {
            "1": {"name": "Oli Kebble", "on": 0, "off": "[55]", "reds": null, "yellows": null},
            "10": {"name": "Adam Hastings", "on": [0], "off": null},
            "15": {"name": "Stuart Hogg", "on": [0, 70], "off": [60], "yellows": 62},
            "17": {"name": "Jamie Bhatti", "on": "55", "off": null}
        },
        "scores": [
            {"type": "try", "player": "Hogg", "value": 5, "minute": 12},
            {"type": "conversion", "player": "Hastings", "value": 2, "minute": 13},
            {"type": "drop goal", "player": "Hastings", "value": 3, "minute": 79}
        ]
    },
    "away": {
        "team": {"name": "Edinburgh Rugby", "short name": "Edinburgh", "colors": {}},
        "score": "17",
        "lineup": {"9": {"name": "Ali Price", "on": 0, "off": 80}},
        "scores": [{"type": "penalty", "player": "Price", "value": 3, "minute": 40}]
    }
}"##;

#[test]
fn reads_irregular_lineup_encodings() {
    let game = Match::from_json(MATCH_JSON).expect("match should parse");
    assert_eq!(game.round, Some(2));
    assert_eq!(game.home.team.name, "Glasgow Warriors");
    assert_eq!(game.away.score, MatchScore::Final(17));

    assert_eq!(game.playtime("Oli Kebble").unwrap(), 55);
    assert_eq!(game.playtime("Jamie Bhatti").unwrap(), 25);
    assert_eq!(game.playtime("Stuart Hogg").unwrap(), 70);
    assert_eq!(game.playtime("Ali Price").unwrap(), 80);

    let lineup = game.home.lineup.as_ref().unwrap();
    assert_eq!(lineup.get(15).unwrap().cards().yellows, vec![62]);
}

#[test]
fn resolves_scorers_and_attributes_points() {
    let game = Match::from_json(MATCH_JSON).unwrap();
    let scores = game.home.scores.as_ref().unwrap();
    assert_eq!(scores.points_by("Adam Hastings"), 5);
    assert_eq!(scores.points_by("Stuart Hogg"), 5);

    let hogg = game.onfield_points("Stuart Hogg").unwrap();
    assert_eq!(hogg.points_for, 10);
    assert_eq!(hogg.points_against, 3);
    assert_eq!(game.side_of("Ali Price"), Some(Side::Away));
}

#[test]
fn match_survives_a_json_round_trip() {
    let game = Match::from_json(MATCH_JSON).unwrap();
    let json = game.to_json().unwrap();
    let reread = Match::from_json(&json).unwrap();

    assert_eq!(reread, game);
    assert_eq!(reread.date, game.date);
    assert_eq!(reread.home.lineup, game.home.lineup);
    assert_eq!(reread.away.scores, game.away.scores);
}

#[test]
fn tournament_survives_a_json_round_trip() {
    let json = format!(
        r##"{{
            "name": "Pro14",
            "season": "2019-2020",
            "teams": {{
                "A": [{{"name": "Glasgow Warriors", "short name": "Glasgow", "colors": {{}}}}],
                "B": [{{"name": "Edinburgh Rugby", "short name": "Edinburgh", "colors": {{}}}}]
            }},
            "matches": [
                {MATCH_JSON},
                {{"date": "2019-10-12T17:15:00", "stadium": null,
                  "home": {{"team": "Edinburgh", "score": "P"}},
                  "away": {{"team": "Glasgow Warriors", "score": "P"}}}}
            ]
        }}"##
    );

    let tournament = Tournament::from_json_str(&json).expect("tournament should parse");
    assert_eq!(tournament.played().len(), 1);
    assert_eq!(tournament.future().len(), 1);

    let postponed = &tournament.future()[0];
    assert_eq!(postponed.home.team.name, "Edinburgh Rugby");
    assert_eq!(postponed.away.team.short_name, "Glasgow");
    assert!(postponed.home.score.points().is_nan());

    let reread = Tournament::from_json_str(&tournament.to_json().unwrap()).unwrap();
    assert_eq!(reread.played(), tournament.played());
    assert_eq!(reread.future(), tournament.future());
    assert_eq!(reread.context.conference("Edinburgh"), "B");
}

#[test]
fn float_event_minutes_load_and_round_trip() {
    let json = MATCH_JSON.replace(r#""value": 3, "minute": 40"#, r#""value": 3.0, "minute": 40.0"#);
    assert_ne!(json, MATCH_JSON);

    let game = Match::from_json(&json).expect("float minutes should parse");
    let event = &game.away.scores.as_ref().unwrap().events()[0];
    assert_eq!(event.minute, 40);
    assert_eq!(event.value, 3);

    let written = game.to_json().unwrap();
    assert!(written.contains(r#""minute": 40"#) || written.contains(r#""minute":40"#));
    assert_eq!(Match::from_json(&written).unwrap(), game);
}

#[test]
fn fractional_kickoff_seconds_round_trip() {
    let json = MATCH_JSON.replace("2019-10-05 19:35", "2019-10-05T19:35:00.5");
    let game = Match::from_json(&json).unwrap();
    let reread = Match::from_json(&game.to_json().unwrap()).unwrap();
    assert_eq!(reread.date, game.date);
    assert_eq!(reread, game);
}
