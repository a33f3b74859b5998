use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rugby::stats::SplitTable;
use rugby::{LeagueRules, Side, Tournament};

#[derive(Parser)]
#[command(name = "rugby")]
#[command(about = "League tables and player statistics from rugby match data", long_about = None)]
struct Cli {
    /// Tournament JSON file, or a dense CSV export
    #[arg(short, long)]
    input: PathBuf,

    /// Tournament name, required for CSV input
    #[arg(long)]
    name: Option<String>,

    /// Season label, required for CSV input
    #[arg(long)]
    season: Option<String>,

    /// JSON file overriding league table points
    #[arg(long)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scores and tries for every played match
    Results,
    /// Played matches, or the ones still to come
    Fixtures {
        #[arg(long)]
        future: bool,
    },
    /// League table grouped by conference
    Table,
    /// Teams taking part
    Teams,
    /// Totals and on-field scoring rate for one player
    Player { name: String },
    /// Per-player minutes and points for one team, split home and away
    Team {
        team: String,
        /// List players who never scored in the points table
        #[arg(long)]
        squad: bool,
        #[arg(long, value_enum)]
        venue: Option<Venue>,
    },
    /// Scoring rate while two players were on together
    Mutual { first: String, second: String },
    /// A single match with lineups
    Match {
        home: String,
        away: String,
        /// Match day, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Venue {
    Home,
    Away,
}

impl From<Venue> for Side {
    fn from(venue: Venue) -> Self {
        match venue {
            Venue::Home => Side::Home,
            Venue::Away => Side::Away,
        }
    }
}

fn load(cli: &Cli) -> Result<Tournament> {
    let is_csv = cli
        .input
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    if !is_csv {
        let mut tournament = Tournament::from_json_file(&cli.input)
            .with_context(|| format!("Failed to read tournament: {}", cli.input.display()))?;
        if let Some(path) = &cli.rules {
            tournament.context.rules = read_rules(path)?;
        }
        return Ok(tournament);
    }

    let (Some(name), Some(season)) = (&cli.name, &cli.season) else {
        bail!("CSV input needs --name and --season");
    };
    let rules = match &cli.rules {
        Some(path) => read_rules(path)?,
        None => LeagueRules::default(),
    };
    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open CSV file: {}", cli.input.display()))?;
    Ok(Tournament::from_dense_csv(file, name, season, rules)?)
}

fn read_rules(path: &Path) -> Result<LeagueRules> {
    LeagueRules::from_json_file(path)
        .with_context(|| format!("Failed to read rules: {}", path.display()))
}

fn print_split(title: &str, table: &SplitTable) {
    println!("{title}");
    for (player, split) in table {
        let home: Vec<String> = split.home.iter().map(|(o, v)| format!("{o} {v}")).collect();
        let away: Vec<String> = split.away.iter().map(|(o, v)| format!("{o} {v}")).collect();
        println!(
            "{player:<28} H {:>4} [{}]  A {:>4} [{}]",
            split.home_total(),
            home.join(", "),
            split.away_total(),
            away.join(", ")
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rugby=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let tournament = load(&cli)?;
    info!(
        tournament = %tournament.name,
        season = %tournament.season,
        played = tournament.played().len(),
        "tournament loaded"
    );

    match &cli.command {
        Commands::Results => {
            for row in tournament.results_table() {
                let tries = |t: Option<u32>| t.map_or("-".to_string(), |t| t.to_string());
                println!(
                    "{:<16} {:>3} v {:<3} {:<16} {:>+4}  tries {}-{}",
                    row.home,
                    row.home_score,
                    row.away_score,
                    row.away,
                    row.difference,
                    tries(row.home_tries),
                    tries(row.away_tries)
                );
            }
        }
        Commands::Fixtures { future } => {
            for row in tournament.fixtures_table(*future) {
                println!("{} {} v {}", row.date.format("%Y-%m-%d %H:%M"), row.home, row.away);
            }
        }
        Commands::Table => {
            println!(
                "{:<4} {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>5} {:>3} {:>4}",
                "conf", "team", "P", "W", "D", "L", "for", "agst", "diff", "B", "pts"
            );
            for row in tournament.league_table()? {
                let s = &row.standing;
                println!(
                    "{:<4} {:<24} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>+5} {:>3} {:>4}",
                    row.conference,
                    row.team.name,
                    s.played,
                    s.won,
                    s.drawn,
                    s.lost,
                    s.points_for,
                    s.points_against,
                    row.diff,
                    s.bonus,
                    s.points
                );
            }
        }
        Commands::Teams => {
            for team in tournament.teams() {
                println!("{:<12} {}", team.short_name, team.name);
            }
        }
        Commands::Player { name } => {
            let games = tournament.player_matches(name)?;
            let rate = tournament.player_onfield_rate(name)?;
            println!("{name}");
            println!("  matches   {}", games.len());
            println!("  minutes   {}", tournament.player_total_playtime(name)?);
            println!("  points    {}", tournament.player_total_points(name)?);
            println!(
                "  on field  {:.3} for, {:.3} against per minute",
                rate.rate_for, rate.rate_against
            );
        }
        Commands::Team { team, squad, venue } => {
            for game in tournament.team_matches(team, venue.map(Side::from))? {
                println!("{game}");
            }
            print_split("Minutes", &tournament.player_time_table(team)?);
            print_split("Points", &tournament.player_score_table(team, *squad)?);
        }
        Commands::Mutual { first, second } => {
            let rate = tournament.player_mutual_rate(first, second)?;
            println!(
                "{first} with {second}: {:.3} for, {:.3} against per minute",
                rate.rate_for, rate.rate_against
            );
        }
        Commands::Match { home, away, date } => {
            let game = tournament.find_match(home, away, *date)?;
            println!("{game}");
            for side in [Side::Home, Side::Away] {
                if let Some(lineup) = &game.side(side).lineup {
                    println!("\n{}\n{lineup}", game.team(side));
                }
            }
        }
    }

    Ok(())
}
