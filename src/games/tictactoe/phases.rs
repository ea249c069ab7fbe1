//! Lifecycle phases and results of a game session.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Outcome of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Mark completed a line.
    Winner(Mark),
    /// Board filled with no completed line.
    Draw,
}

impl Outcome {
    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            Outcome::Winner(mark) => Some(*mark),
            Outcome::Draw => None,
        }
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::Winner(mark) => write!(f, "{} Wins!", mark),
            Outcome::Draw => write!(f, "Draw!"),
        }
    }
}

/// Session phase.
///
/// `Playing` carries whose turn it is; a finished session always has an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Empty board, waiting for an explicit start.
    #[default]
    NotStarted,
    /// Moves are being played.
    Playing {
        /// Mark allowed to move next.
        turn: Mark,
    },
    /// Game over.
    Finished(Outcome),
}

impl Phase {
    /// Whether the session has reached a terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Phase::Finished(_))
    }
}

/// Result of the current game as seen by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// No terminal state reached (including before the game starts).
    InProgress,
    /// A mark completed a line.
    Win(Mark),
    /// Full board, no line.
    Draw,
}

impl From<Phase> for GameResult {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::NotStarted | Phase::Playing { .. } => GameResult::InProgress,
            Phase::Finished(Outcome::Winner(mark)) => GameResult::Win(mark),
            Phase::Finished(Outcome::Draw) => GameResult::Draw,
        }
    }
}

impl GameResult {
    /// Terminal once `Win` or `Draw`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameResult::InProgress)
    }
}
