//! Rule-based move selection for the automated player.
//!
//! The engine walks a fixed-priority chain of strategies and takes the first
//! one that yields a square:
//!
//! 1. [`Strategy::WinNow`]: complete a line we already hold two squares of.
//! 2. [`Strategy::Block`]: fill the gap in an opponent two-in-a-row.
//! 3. [`Strategy::Center`]: take the center.
//! 4. [`Strategy::Corner`]: random free corner.
//! 5. [`Strategy::Any`]: random free square.
//!
//! This is a greedy heuristic, not game-tree search, and it can be beaten.
//! Lines are scanned in [`WINNING_LINES`] order, so when several lines
//! qualify the earliest one is played.

use super::rules::WINNING_LINES;
use super::{Board, Mark, Position, Square};
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Engine failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum EngineError {
    /// The board has no empty square; callers must not ask for a move.
    #[display("No move available: board is full")]
    NoMoveAvailable,
}

/// One rung of the priority chain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::Display,
)]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Complete our own two-in-a-row.
    WinNow,
    /// Block the opponent's two-in-a-row.
    Block,
    /// Take the center square.
    Center,
    /// Take a random free corner.
    Corner,
    /// Take any random free square.
    Any,
}

impl Strategy {
    /// The square this strategy would play, if it applies to `board`.
    pub fn candidate<R: Rng + ?Sized>(
        self,
        board: &Board,
        own: Mark,
        opponent: Mark,
        rng: &mut R,
    ) -> Option<Position> {
        match self {
            Strategy::WinNow => completing_square(board, own),
            Strategy::Block => completing_square(board, opponent),
            Strategy::Center => board.is_empty(Position::Center).then_some(Position::Center),
            Strategy::Corner => {
                let corners: Vec<Position> = Position::CORNERS
                    .iter()
                    .copied()
                    .filter(|pos| board.is_empty(*pos))
                    .collect();
                corners.choose(rng).copied()
            }
            Strategy::Any => board.empty_positions().choose(rng).copied(),
        }
    }
}

/// First line (in scan order) where `mark` holds exactly two squares and the
/// third is empty; returns that empty square.
pub fn completing_square(board: &Board, mark: Mark) -> Option<Position> {
    WINNING_LINES.iter().find_map(|line| {
        let held = line
            .iter()
            .filter(|pos| board.get(**pos) == Square::Occupied(mark))
            .count();
        if held != 2 {
            return None;
        }
        line.iter().copied().find(|pos| board.is_empty(*pos))
    })
}

/// A chosen square together with the strategy that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    /// Square to play.
    pub position: Position,
    /// Strategy that produced it.
    pub strategy: Strategy,
}

/// Runs the strategy chain on `board` for `own`, using `rng` for tie-breaks.
///
/// # Errors
///
/// Returns [`EngineError::NoMoveAvailable`] if the board is full.
#[instrument(skip(board, rng), fields(board = %board))]
pub fn decide<R: Rng + ?Sized>(
    board: &Board,
    own: Mark,
    opponent: Mark,
    rng: &mut R,
) -> Result<Decision, EngineError> {
    let decision = Strategy::iter()
        .find_map(|strategy| {
            strategy
                .candidate(board, own, opponent, &mut *rng)
                .map(|position| Decision { position, strategy })
        })
        .ok_or(EngineError::NoMoveAvailable)?;

    debug!(
        strategy = %decision.strategy,
        position = %decision.position,
        "Engine chose move"
    );
    Ok(decision)
}

/// Anything that can pick a move for one side of the board.
///
/// The controller is generic over this so tests can script the automated player.
pub trait MoveSelector {
    /// Picks an empty square for `own` to play.
    fn select_move(
        &mut self,
        board: &Board,
        own: Mark,
        opponent: Mark,
    ) -> Result<Position, EngineError>;
}

/// The rule-based engine with its own random source for tie-breaks.
#[derive(Debug, Clone)]
pub struct RuleEngine<R = StdRng> {
    rng: R,
}

impl RuleEngine<StdRng> {
    /// Creates an engine seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates an engine with reproducible tie-breaks.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded if `seed` is given, entropy otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }
}

impl Default for RuleEngine<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> RuleEngine<R> {
    /// Creates an engine drawing tie-breaks from `rng`.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Runs the strategy chain and reports which strategy fired.
    pub fn decide(
        &mut self,
        board: &Board,
        own: Mark,
        opponent: Mark,
    ) -> Result<Decision, EngineError> {
        decide(board, own, opponent, &mut self.rng)
    }
}

impl<R: Rng> MoveSelector for RuleEngine<R> {
    fn select_move(
        &mut self,
        board: &Board,
        own: Mark,
        opponent: Mark,
    ) -> Result<Position, EngineError> {
        self.decide(board, own, opponent).map(|d| d.position)
    }
}
