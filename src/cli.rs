//! Command-line interface for hero_tictactoe.

use clap::{Parser, Subcommand, ValueEnum};
use hero_tictactoe::Mark;
use std::path::PathBuf;

/// Hero tic-tac-toe - play the rule-based opponent or inspect its choices
#[derive(Parser, Debug)]
#[command(name = "hero_tictactoe")]
#[command(about = "Tic-tac-toe against a rule-based opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "hero_tictactoe.toml")]
    pub config: PathBuf,

    /// Seed for engine tie-breaks (overrides the settings file)
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play in the terminal as X
    Play {
        /// Delay before the opponent moves, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the engine's move for a board
    Suggest {
        /// Nine cells, row-major: X, O, and . _ or - for empty (e.g. "XX..O....")
        board: String,

        /// Side the engine plays
        #[arg(long = "as", value_enum, default_value_t = Side::O)]
        side: Side,
    },

    /// Play the engine (O) against a random X many times and report the tally
    Simulate {
        /// Number of games
        #[arg(short, long, default_value = "1000")]
        games: usize,

        /// Print the tally as JSON
        #[arg(long)]
        json: bool,
    },
}

/// A side on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The first player.
    X,
    /// The second player.
    O,
}

impl From<Side> for Mark {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Mark::X,
            Side::O => Mark::O,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_suggest() {
        let cli = Cli::try_parse_from(["hero_tictactoe", "suggest", "XX..O....", "--as", "x"])
            .unwrap();
        match cli.command {
            Command::Suggest { board, side } => {
                assert_eq!(board, "XX..O....");
                assert_eq!(side, Side::X);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_global_seed_after_subcommand() {
        let cli = Cli::try_parse_from(["hero_tictactoe", "simulate", "-g", "5", "--seed", "3"])
            .unwrap();
        assert_eq!(cli.seed, Some(3));
        assert!(matches!(
            cli.command,
            Command::Simulate {
                games: 5,
                json: false
            }
        ));
    }
}
