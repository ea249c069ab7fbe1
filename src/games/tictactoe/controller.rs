//! Game session state machine hosting the automated player.
//!
//! ```text
//! NotStarted --start--> Playing(X) --human_move--> Playing(O) --play_automated--> Playing(X) ...
//!                            \                           \
//!                             `--------------------------`--> Finished(outcome)
//! any phase --reset--> NotStarted
//! ```
//!
//! The automated turn is not played inline. When the human's move hands the
//! turn to O, the controller returns a [`PendingTurn`] ticket; the host fires
//! it after a delay via [`GameController::play_automated`]. Every ticket is
//! stamped with the session generation and ply it was issued for, and is
//! ignored if either has moved on. A reset between issue and fire therefore
//! never lets an old move land on the new board.
//!
//! Invalid input (occupied square, wrong turn, game not running) is ignored
//! silently and reported only as [`Transition::Ignored`].

use super::action::Move;
use super::contracts::assert_invariants;
use super::engine::{EngineError, MoveSelector, RuleEngine};
use super::phases::{GameResult, Outcome, Phase};
use super::{Board, Mark, Position, Square, rules};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};

/// The human side.
pub const HUMAN: Mark = Mark::X;
/// The automated side.
pub const AUTOMATED: Mark = Mark::O;

/// Permission for one automated move, valid only for the game state it was issued in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PendingTurn {
    generation: u64,
    ply: usize,
}

impl PendingTurn {
    /// Session generation the ticket was issued in.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Number of moves on the board when the ticket was issued.
    pub fn ply(&self) -> usize {
        self.ply
    }
}

/// What a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Nothing changed.
    Ignored,
    /// Waiting for the human's move.
    HumanToMove,
    /// The automated player is up; fire the ticket after the turn delay.
    AutomatedPending(PendingTurn),
    /// The game ended.
    Finished(Outcome),
}

/// Owns one game session and drives the automated player.
#[derive(Debug)]
pub struct GameController<S = RuleEngine> {
    board: Board,
    phase: Phase,
    history: Vec<Move>,
    generation: u64,
    selector: S,
}

impl GameController<RuleEngine> {
    /// Creates a controller using the rule engine with entropy-seeded tie-breaks.
    pub fn new() -> Self {
        Self::with_selector(RuleEngine::new())
    }
}

impl Default for GameController<RuleEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MoveSelector> GameController<S> {
    /// Creates a controller in the `NotStarted` phase using `selector` for O.
    pub fn with_selector(selector: S) -> Self {
        Self {
            board: Board::new(),
            phase: Phase::NotStarted,
            history: Vec::new(),
            generation: 0,
            selector,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the session phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns the current result.
    pub fn result(&self) -> GameResult {
        self.phase.into()
    }

    /// Mark to move, if a game is being played.
    pub fn turn(&self) -> Option<Mark> {
        match self.phase {
            Phase::Playing { turn } => Some(turn),
            _ => None,
        }
    }

    /// Moves played in the current game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Generation counter, bumped by every reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `NotStarted -> Playing(X)`.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn start(&mut self) -> Transition {
        if self.phase != Phase::NotStarted {
            trace!(phase = ?self.phase, "Start ignored");
            return Transition::Ignored;
        }
        self.phase = Phase::Playing { turn: HUMAN };
        info!("Game started");
        Transition::HumanToMove
    }

    /// Clears the board and returns to `NotStarted` from any phase.
    ///
    /// Outstanding [`PendingTurn`] tickets become stale.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.history.clear();
        self.phase = Phase::NotStarted;
        self.generation = self.generation.wrapping_add(1);
        info!(generation = self.generation, "Game reset");
    }

    /// Plays X at `position` if it is X's turn and the square is empty.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn human_move(&mut self, position: Position) -> Transition {
        if self.phase != (Phase::Playing { turn: HUMAN }) {
            trace!(phase = ?self.phase, "Human move ignored: not X's turn");
            return Transition::Ignored;
        }
        if !self.board.is_empty(position) {
            trace!("Human move ignored: square occupied");
            return Transition::Ignored;
        }
        self.apply(Move::new(HUMAN, position))
    }

    /// Plays the engine's move for O if `ticket` is still current.
    ///
    /// Stale tickets (older generation, or a ply that has already been played)
    /// return `Ok(Transition::Ignored)`.
    ///
    /// # Errors
    ///
    /// Propagates [`EngineError`] from the selector. The rule engine only fails
    /// on a full board, which a current ticket never sees.
    #[instrument(skip(self), fields(generation = self.generation))]
    pub fn play_automated(&mut self, ticket: PendingTurn) -> Result<Transition, EngineError> {
        if ticket.generation != self.generation || ticket.ply != self.history.len() {
            debug!(?ticket, "Discarding stale automated turn");
            return Ok(Transition::Ignored);
        }
        if self.phase != (Phase::Playing { turn: AUTOMATED }) {
            trace!(phase = ?self.phase, "Automated move ignored: not O's turn");
            return Ok(Transition::Ignored);
        }

        let position = self
            .selector
            .select_move(&self.board, AUTOMATED, HUMAN)?;
        if !self.board.is_empty(position) {
            // Selectors must return an empty square; anything else is dropped.
            debug!(%position, "Selector chose an occupied square");
            return Ok(Transition::Ignored);
        }
        Ok(self.apply(Move::new(AUTOMATED, position)))
    }

    /// Places the mark, runs the terminal check, and advances the phase.
    fn apply(&mut self, action: Move) -> Transition {
        self.board.set(action.position, Square::Occupied(action.mark));
        self.history.push(action);
        assert_invariants(&self.board, &self.history);
        debug!(%action, ply = self.history.len(), "Move applied");

        if let Some(outcome) = rules::evaluate(&self.board) {
            self.phase = Phase::Finished(outcome);
            info!(%outcome, "Game finished");
            return Transition::Finished(outcome);
        }

        let turn = action.mark.opponent();
        self.phase = Phase::Playing { turn };
        if turn == AUTOMATED {
            Transition::AutomatedPending(PendingTurn {
                generation: self.generation,
                ply: self.history.len(),
            })
        } else {
            Transition::HumanToMove
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Plays a fixed script of squares for O.
    struct Scripted(Vec<Position>);

    impl MoveSelector for Scripted {
        fn select_move(
            &mut self,
            _board: &Board,
            _own: Mark,
            _opponent: Mark,
        ) -> Result<Position, EngineError> {
            if self.0.is_empty() {
                return Err(EngineError::NoMoveAvailable);
            }
            Ok(self.0.remove(0))
        }
    }

    fn pending(t: Transition) -> PendingTurn {
        match t {
            Transition::AutomatedPending(ticket) => ticket,
            other => panic!("expected pending automated turn, got {other:?}"),
        }
    }

    #[test]
    fn test_starts_not_started() {
        let c = GameController::with_selector(Scripted(vec![]));
        assert_eq!(c.phase(), Phase::NotStarted);
        assert_eq!(c.result(), GameResult::InProgress);
        assert_eq!(c.turn(), None);
    }

    #[test]
    fn test_start_only_from_not_started() {
        let mut c = GameController::with_selector(Scripted(vec![]));
        assert_eq!(c.start(), Transition::HumanToMove);
        assert_eq!(c.start(), Transition::Ignored);
        assert_eq!(c.turn(), Some(Mark::X));
    }

    #[test]
    fn test_move_before_start_ignored() {
        let mut c = GameController::with_selector(Scripted(vec![]));
        assert_eq!(c.human_move(Position::Center), Transition::Ignored);
        assert_eq!(c.board(), &Board::new());
    }

    #[test]
    fn test_ticket_is_single_use() {
        let mut c = GameController::with_selector(Scripted(vec![
            Position::Center,
            Position::TopRight,
        ]));
        c.start();
        let ticket = pending(c.human_move(Position::TopLeft));
        assert_eq!(c.play_automated(ticket), Ok(Transition::HumanToMove));
        assert_eq!(c.play_automated(ticket), Ok(Transition::Ignored));

        let next = pending(c.human_move(Position::BottomLeft));
        // Replaying the first ticket in the same generation is still stale.
        assert_eq!(c.play_automated(ticket), Ok(Transition::Ignored));
        assert_eq!(c.play_automated(next), Ok(Transition::HumanToMove));
        assert_eq!(c.history().len(), 4);
    }

    #[test]
    fn test_occupied_choice_from_selector_ignored() {
        let mut c = GameController::with_selector(Scripted(vec![Position::TopLeft]));
        c.start();
        let ticket = pending(c.human_move(Position::TopLeft));
        assert_eq!(c.play_automated(ticket), Ok(Transition::Ignored));
        assert_eq!(c.turn(), Some(Mark::O));
    }

    #[test]
    fn test_reset_bumps_generation() {
        let mut c = GameController::with_selector(Scripted(vec![]));
        c.start();
        c.human_move(Position::Center);
        c.reset();
        assert_eq!(c.generation(), 1);
        assert_eq!(c.phase(), Phase::NotStarted);
        assert!(c.history().is_empty());
        assert_eq!(c.board(), &Board::new());
    }
}
