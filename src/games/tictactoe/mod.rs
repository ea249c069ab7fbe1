//! Tic-tac-toe: board model, rules, the rule-based engine and the session controller.

mod action;
pub mod contracts;
pub mod controller;
pub mod engine;
mod phases;
mod position;
pub mod rules;
mod types;

pub use action::Move;
pub use contracts::{BoardConsistent, UnreachableBoard};
pub use controller::{AUTOMATED, GameController, HUMAN, PendingTurn, Transition};
pub use engine::{Decision, EngineError, MoveSelector, RuleEngine, Strategy};
pub use phases::{GameResult, Outcome, Phase};
pub use position::Position;
pub use types::{Board, BoardParseError, Mark, Square};
