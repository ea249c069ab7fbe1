//! Hero tic-tac-toe - the portfolio hero's mini-game as a library
//!
//! A rule-based opponent and the session controller that hosts it.
//!
//! # Architecture
//!
//! - **Engine**: fixed-priority move selection (win, block, center, corner, any)
//! - **Controller**: `NotStarted -> Playing -> Finished` state machine with
//!   generation-stamped automated-turn tickets
//! - **Scheduler**: tokio timer that fires tickets after the turn delay
//! - **Simulate**: headless self-play against a random opponent
//!
//! # Example
//!
//! ```
//! use hero_tictactoe::{GameController, Mark, Position, RuleEngine, Transition};
//!
//! let mut game = GameController::with_selector(RuleEngine::seeded(1));
//! game.start();
//!
//! if let Transition::AutomatedPending(ticket) = game.human_move(Position::TopLeft) {
//!     game.play_automated(ticket).unwrap();
//! }
//! assert_eq!(game.board().get(Position::Center).mark(), Some(Mark::O));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod scheduler;
mod simulate;

// Crate-level exports - Configuration
pub use config::{ConfigError, Settings};

// Crate-level exports - Turn scheduling
pub use scheduler::TurnScheduler;

// Crate-level exports - Self-play
pub use simulate::{SimulateError, Tally, play_one, simulate};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    AUTOMATED, Board, BoardConsistent, BoardParseError, Decision, EngineError, GameController,
    GameResult, HUMAN, Mark, Move, MoveSelector, Outcome, PendingTurn, Phase, Position,
    RuleEngine, Square, Strategy, Transition, UnreachableBoard,
};

// Crate-level exports - Rule functions
pub use games::tictactoe::engine::{completing_square, decide};
pub use games::tictactoe::rules;
