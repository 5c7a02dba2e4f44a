//! checkers-ai: play checkers against a minimax engine.
//!
//! ## Usage
//!
//! - `checkers-ai` - Show a demo
//! - `checkers-ai play` - Play against the computer in the terminal
//! - `checkers-ai protocol` - Start the text protocol server for front ends
//! - `checkers-ai selfplay` - Pit the engine against a random mover

use std::io::{self, BufRead, Write};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use checkers_ai::board::Board;
use checkers_ai::constants::{DEFAULT_DEPTH, MAX_GAME_PLIES};
use checkers_ai::game::Game;
use checkers_ai::moves::{Move, parse_move};
use checkers_ai::piece::Player;
use checkers_ai::position::Position;
use checkers_ai::protocol::ProtocolEngine;
use checkers_ai::random::RandomPlayer;
use checkers_ai::search::Engine;

/// checkers-ai: checkers against an alpha-beta engine
#[derive(Parser)]
#[command(name = "checkers-ai")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter, e.g. `info` or `checkers_ai=debug`. Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play against the computer in the terminal
    Play {
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
    },
    /// Start the text protocol server on stdin/stdout
    Protocol {
        /// Search depth in plies
        #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
    },
    /// Play the engine (computer side) against a seeded random mover
    Selfplay {
        /// Search depth in plies
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
        depth: u32,
        /// Number of games
        #[arg(long, default_value_t = 10)]
        games: u32,
        /// Seed of the random mover
        #[arg(long, default_value_t = 1)]
        seed: u64,
    },
    /// Run a short demo of the engine
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Some(Commands::Play { depth }) => run_play(depth),
        Some(Commands::Protocol { depth }) => ProtocolEngine::with_depth(depth).run(),
        Some(Commands::Selfplay { depth, games, seed }) => {
            run_selfplay(depth, games, seed);
            Ok(())
        }
        Some(Commands::Demo) | None => {
            run_demo();
            Ok(())
        }
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_play(depth: u32) -> anyhow::Result<()> {
    let mut game = Game::new(depth);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    println!("You play o (moving up), the computer plays x.");
    println!("Enter moves like c3-d4 or b3xd5; `moves` lists them, `quit` exits.\n");

    while !game.is_over() {
        if game.to_move() == Player::Computer {
            if let Some(mv) = game.play_computer()? {
                println!("Computer plays {mv}\n");
            }
            continue;
        }

        print!("{}\nYour move: ", game.board());
        stdout.flush().context("flushing prompt")?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line.context("reading move")?;
        let input = line.trim();
        match input {
            "" => continue,
            "quit" | "exit" => return Ok(()),
            "moves" => {
                let moves: Vec<String> =
                    game.legal_moves().iter().map(|m| m.to_string()).collect();
                println!("{}\n", moves.join(" "));
                continue;
            }
            _ => {}
        }
        match parse_move(input) {
            Ok(mv) => match game.play(&mv) {
                Ok(played) => println!("You play {played}\n"),
                Err(e) => println!("{e}\n"),
            },
            Err(e) => println!("{e}\n"),
        }
    }

    println!("{}", game.board());
    match game.winner() {
        Some(Player::Human) => println!("You win!"),
        Some(Player::Computer) => println!("The computer wins."),
        None => {}
    }
    Ok(())
}

fn run_selfplay(depth: u32, games: u32, seed: u64) {
    let mut engine = Engine::new(depth);
    let mut random = RandomPlayer::new(seed);
    let (mut engine_wins, mut random_wins, mut unfinished) = (0, 0, 0);

    for n in 1..=games {
        let mut board = Board::new();
        let mut to_move = Player::Human;
        let mut plies = 0;

        let winner = loop {
            if let Some(winner) = board.winner() {
                break Some(winner);
            }
            if plies >= MAX_GAME_PLIES {
                break None;
            }
            let mv = match to_move {
                Player::Human => random.choose(&board, to_move),
                Player::Computer => engine.best_move(&board),
            };
            let Some(mv) = mv else {
                break Some(to_move.opponent());
            };
            board.apply_move(&mv);
            to_move = to_move.opponent();
            plies += 1;
        };

        match winner {
            Some(Player::Computer) => engine_wins += 1,
            Some(Player::Human) => random_wins += 1,
            None => unfinished += 1,
        }
        let outcome = winner.map_or("unfinished".to_string(), |w| format!("{w} wins"));
        println!("game {n}: {outcome} after {plies} plies");
    }

    println!("\nengine {engine_wins}, random {random_wins}, unfinished {unfinished}");
}

fn run_demo() {
    println!("checkers-ai: minimax checkers engine\n");

    let board = Board::new();
    println!("{board}");

    let moves: Vec<String> = board
        .legal_moves(Player::Human)
        .iter()
        .map(|m| m.to_string())
        .collect();
    println!("Human opening moves ({}): {}", moves.len(), moves.join(" "));

    let mut board = board;
    let opening = Move::simple(Position::new(2, 3), Position::new(3, 4));
    board.apply_move(&opening);
    println!("\nAfter {opening}:\n{board}");

    let mut engine = Engine::default();
    let result = engine.search_root(&board);
    match result.best_move {
        Some(mv) => println!(
            "Computer replies {mv} (score {}, {} nodes at depth {})",
            result.score,
            result.nodes,
            engine.depth()
        ),
        None => println!("Computer has no move"),
    }
}
