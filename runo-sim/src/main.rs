use std::{fs, fs::File, io::BufWriter, path::PathBuf};

use clap::Parser;
use color_eyre::{eyre::WrapErr, Result};
use runo::{
    agent::{PlayerAgent, RandomAgent},
    error::UnoError,
    rules::Rules,
    uno::{Outcome, Uno},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Play seeded games of UNO between random agents.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 1)]
    games: u64,

    /// Players per game; overrides the rules file
    #[arg(short, long)]
    players: Option<usize>,

    /// Base seed; game `i` uses `seed + i`
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Decisions allowed per game before it counts as stalled
    #[arg(long, default_value_t = 10_000)]
    max_steps: usize,

    /// JSON file with house rules
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Write the final state of the last game here as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

#[derive(Default)]
struct Tally {
    wins: Vec<u64>,
    stalled: u64,
    exhausted: u64,
}

fn load_rules(args: &Args) -> Result<Rules> {
    let mut rules = match &args.rules {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading rules from {}", path.display()))?;
            serde_json::from_str(&text)
                .wrap_err_with(|| format!("parsing rules from {}", path.display()))?
        }
        None => Rules::default(),
    };
    if let Some(players) = args.players {
        rules.player_count = players;
    }
    Ok(rules)
}

fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let rules = load_rules(&args)?;
    let mut tally = Tally {
        wins: vec![0; rules.player_count],
        ..Tally::default()
    };
    let mut last_state = None;

    for game in 0..args.games {
        let seed = args.seed.wrapping_add(game);
        let mut uno = Uno::new(rules.clone(), seed)?;
        let mut agents: Vec<Box<dyn PlayerAgent>> = (0..uno.rules().player_count)
            .map(|seat| {
                Box::new(RandomAgent::new(uno.seed().wrapping_mul(31).wrapping_add(seat as u64)))
                    as Box<dyn PlayerAgent>
            })
            .collect();

        match uno.play_to_completion(&mut agents, args.max_steps) {
            Ok(Outcome::Won { player }) => {
                info!(game, seed = uno.seed(), winner = player, "game won");
                tally.wins[player] += 1;
            }
            Ok(Outcome::Stalled) => {
                warn!(game, seed = uno.seed(), "game stalled");
                tally.stalled += 1;
            }
            Err(UnoError::DeckExhausted { needed, available }) => {
                warn!(game, seed = uno.seed(), needed, available, "ran out of cards");
                tally.exhausted += 1;
            }
            Err(err) => return Err(err).wrap_err_with(|| format!("game {} (seed {})", game, seed)),
        }

        last_state = Some(uno.into_state());
    }

    for (seat, wins) in tally.wins.iter().enumerate() {
        println!("Player {}: {} wins", seat + 1, wins);
    }
    println!("Stalled: {}", tally.stalled);
    println!("Out of cards: {}", tally.exhausted);

    if let (Some(path), Some(state)) = (&args.snapshot, &last_state) {
        let file = File::create(path).wrap_err_with(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), state)?;
        info!(path = %path.display(), "snapshot written");
    }

    Ok(())
}
