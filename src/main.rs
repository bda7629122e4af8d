use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use connect_four::ai::{Agent, MoveRequest};
use connect_four::config::{GameConfig, Strategy};
use connect_four::game::Player;
use connect_four::session::{GameSession, Outcome, Status};

#[derive(Parser)]
#[command(name = "connect_four")]
#[command(about = "Connect Four between human, alpha-beta, and random players")]
struct Cli {
    /// TOML config file; the flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strategy for player 1: human, ai, or random
    #[arg(long, value_parser = Strategy::from_str)]
    player_one: Option<Strategy>,

    /// Strategy for player 2: human, ai, or random
    #[arg(long, value_parser = Strategy::from_str)]
    player_two: Option<Strategy>,

    /// Search depth for ai players (1-8)
    #[arg(long)]
    depth: Option<usize>,

    /// Pacing delay before non-human moves, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Suppress the status feed on stdout
    #[arg(long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => GameConfig::default(),
    };
    if let Some(strategy) = cli.player_one {
        config.player_one = strategy;
    }
    if let Some(strategy) = cli.player_two {
        config.player_two = strategy;
    }
    if let Some(depth) = cli.depth {
        config.search_depth = depth;
    }
    if let Some(delay) = cli.delay_ms {
        config.move_delay_ms = delay;
    }
    config.validate()?;

    let (status_tx, status_rx) = mpsc::unbounded_channel();
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let player_one = Agent::build(config.player_one, Player::One, config.search_depth, &input_tx);
    let player_two = Agent::build(config.player_two, Player::Two, config.search_depth, &input_tx);
    drop(input_tx);

    let mut game = GameSession::new(player_one, player_two, status_tx, config.move_delay());

    if cli.quiet {
        drop(status_rx);
    } else {
        tokio::spawn(print_status(status_rx));
    }
    tokio::spawn(drive_human_input(input_rx));

    let outcome = game.play().await.context("game stopped on a defect")?;

    println!("{}", game.board());
    let (one, two) = game.scores();
    match outcome {
        Outcome::Winner(player) => println!("{player} wins ({one:.0} / {two:.0})"),
        Outcome::Tie => println!("Tie ({one:.0} / {two:.0})"),
    }
    Ok(())
}

async fn print_status(mut status: mpsc::UnboundedReceiver<Status>) {
    while let Some(update) = status.recv().await {
        println!("{update}");
    }
}

/// Minimal stdin front end for human players: print the position, read a
/// column, resolve the request. Unparseable input cancels the request,
/// which makes the coordinator reissue it.
async fn drive_human_input(mut requests: mpsc::UnboundedReceiver<MoveRequest>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(request) = requests.recv().await {
        println!("{}", request.board());
        println!("{}, choose a column (0-6):", request.player());
        match lines.next_line().await {
            Ok(Some(line)) => match line.trim().parse::<usize>() {
                Ok(column) => request.resolve(column),
                Err(_) => {
                    eprintln!("not a column number: {line}");
                    request.cancel();
                }
            },
            // Stdin is gone; dropping the queue fails the turn cleanly
            _ => break,
        }
    }
}
