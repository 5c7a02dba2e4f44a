//! Line-oriented text protocol for driving the engine.
//!
//! Modeled on the usual engine text protocols: one command per line, an
//! optional numeric id in front, and a response of `=[id] text` on success or
//! `?[id] text` on failure, each followed by a blank line. This lets a front
//! end, a script, or a person at a terminal play against the engine.
//!
//! ## Supported Commands
//!
//! - `name` - Return engine name
//! - `version` - Return engine version
//! - `list_commands` - List all supported commands
//! - `known_command <cmd>` - Check if a command is supported
//! - `quit` - Exit the loop
//! - `new` - Start a new game
//! - `show` - Print the board
//! - `moves` - List the legal moves of the side to move
//! - `play <move>` - Play a move (`c3-d4`, `b3xd5`) for the side to move
//! - `genmove` - Let the computer search and play its move
//! - `depth [n]` - Get or set the search depth
//! - `result` - Winner so far (`human`, `computer`, or `none`)
//! - `turn` - Side to move
//! - `setboard <side> <diagram>` - Load a `/`-separated diagram
//!
//! ## Example
//!
//! ```ignore
//! use checkers_ai::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new();
//! engine.run();
//! ```

use std::io::{self, BufRead, Write};

use anyhow::{Context, bail};

use crate::board::Board;
use crate::constants::DEFAULT_DEPTH;
use crate::game::Game;
use crate::moves::parse_move;
use crate::piece::Player;

/// The list of known commands.
const KNOWN_COMMANDS: &[&str] = &[
    "depth",
    "genmove",
    "known_command",
    "list_commands",
    "moves",
    "name",
    "new",
    "play",
    "quit",
    "result",
    "setboard",
    "show",
    "turn",
    "version",
];

/// Protocol engine state.
pub struct ProtocolEngine {
    game: Game,
}

impl Default for ProtocolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProtocolEngine {
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_DEPTH)
    }

    pub fn with_depth(depth: u32) -> Self {
        Self {
            game: Game::new(depth),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop on stdin and stdout.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Run the command loop over any line source and sink.
    pub fn serve<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line.context("reading command")?;
            let Some(reply) = self.handle_line(&line) else {
                continue;
            };
            write!(output, "{reply}").context("writing response")?;
            output.flush().context("flushing response")?;
            if reply.quit {
                break;
            }
        }
        Ok(())
    }

    /// Process one input line. Blank lines and comments yield `None`.
    pub fn handle_line(&mut self, line: &str) -> Option<Reply> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let (id, command_line) = Self::parse_id(line);
        let parts: Vec<&str> = command_line.split_whitespace().collect();
        let (command, args) = parts.split_first()?;
        let command = command.to_lowercase();

        let result = self.execute(&command, args);
        Some(Reply {
            id,
            quit: command == "quit",
            result: result.map_err(|e| format!("{e:#}")),
        })
    }

    /// Parse an optional numeric command id from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        if end == 0 {
            return (None, trimmed);
        }
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Execute a command and return its response text.
    fn execute(&mut self, command: &str, args: &[&str]) -> anyhow::Result<String> {
        match command {
            "name" => Ok(env!("CARGO_PKG_NAME").to_string()),

            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),

            "list_commands" => Ok(KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let name = args.first().context("missing argument")?;
                let known = KNOWN_COMMANDS.contains(&name.to_lowercase().as_str());
                Ok(known.to_string())
            }

            "quit" => Ok(String::new()),

            "new" => {
                self.game.reset();
                Ok(String::new())
            }

            "show" => Ok(format!("\n{}", self.game.board())),

            "moves" => Ok(self
                .game
                .legal_moves()
                .iter()
                .map(|mv| mv.to_string())
                .collect::<Vec<_>>()
                .join(" ")),

            "play" => {
                if args.is_empty() {
                    bail!("missing argument");
                }
                let mv = parse_move(&args.join(" "))?;
                let played = self.game.play(&mv)?;
                Ok(played.to_string())
            }

            "genmove" => match self.game.play_computer()? {
                Some(mv) => Ok(mv.to_string()),
                None => Ok("none".to_string()),
            },

            "depth" => match args.first() {
                None => Ok(self.game.depth().to_string()),
                Some(arg) => {
                    let depth: u32 = arg
                        .parse()
                        .with_context(|| format!("invalid depth {arg:?}"))?;
                    if depth == 0 {
                        bail!("depth must be at least 1");
                    }
                    self.game.set_depth(depth);
                    Ok(String::new())
                }
            },

            "result" => Ok(match self.game.winner() {
                Some(player) => player.to_string(),
                None => "none".to_string(),
            }),

            "turn" => Ok(self.game.to_move().to_string()),

            "setboard" => {
                let [side, diagram] = args else {
                    bail!("usage: setboard <human|computer> <diagram>");
                };
                let to_move = parse_side(side)?;
                let board = Board::from_diagram(diagram)?;
                self.game.set_position(board, to_move);
                Ok(String::new())
            }

            _ => bail!("unknown command: {command}"),
        }
    }
}

fn parse_side(s: &str) -> anyhow::Result<Player> {
    match s.to_lowercase().as_str() {
        "human" => Ok(Player::Human),
        "computer" => Ok(Player::Computer),
        _ => bail!("invalid side {s:?}"),
    }
}

/// Response to one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub id: Option<u32>,
    pub quit: bool,
    pub result: Result<String, String>,
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (prefix, message) = match &self.result {
            Ok(message) => ('=', message),
            Err(message) => ('?', message),
        };
        let id_str = self.id.map(|i| i.to_string()).unwrap_or_default();
        writeln!(f, "{prefix}{id_str} {message}")?;
        writeln!(f)
    }
}
