//! Hegemon - entry point
//!
//! Loads a TOML board description and plays scripted games with seeded
//! random agents, reporting the winner of each.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;

use hegemon::agents::{Agent, RandomAgent};
use hegemon::core::error::Result;
use hegemon::engine::{run, Game};
use hegemon::setup::GameConfig;

#[derive(Parser, Debug)]
#[command(name = "hegemon", about = "Territory-conquest rules engine")]
struct Args {
    /// Path to the TOML board configuration
    config: PathBuf,

    /// Override the seed from the config file
    #[arg(long)]
    seed: Option<u64>,

    /// Number of games to play (seed advances by one per game)
    #[arg(long, default_value_t = 1)]
    games: u64,

    /// Print results as JSON instead of plain lines
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct GameRow {
    game: u64,
    seed: u64,
    winner: String,
    steps: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hegemon=info".into()),
        )
        .init();

    let args = Args::parse();
    let config = GameConfig::from_path(&args.config)?;
    let base_seed = args.seed.unwrap_or(config.seed);

    let mut rows = Vec::with_capacity(args.games as usize);
    for game_idx in 0..args.games {
        let seed = base_seed.wrapping_add(game_idx);
        let mut game = Game::new(&config, seed)?;
        let mut agents: Vec<Box<dyn Agent>> = game
            .players()
            .iter()
            .map(|p| {
                Box::new(RandomAgent::seeded(seed.wrapping_add(1 + u64::from(p.id.0))))
                    as Box<dyn Agent>
            })
            .collect();

        tracing::info!(game = game_idx, seed, "starting game");
        let report = run(&mut game, &mut agents)?;
        rows.push(GameRow {
            game: game_idx,
            seed,
            winner: game.player(report.winner).name.clone(),
            steps: report.steps,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!(
                "game {}: {} wins in {} steps (seed {})",
                row.game, row.winner, row.steps, row.seed
            );
        }
    }
    Ok(())
}
