//! Headless self-play: the rule engine against a uniformly random opponent.

use crate::games::tictactoe::{
    AUTOMATED, EngineError, GameController, MoveSelector, Outcome, RuleEngine, Transition,
};
use derive_more::{Display, Error};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Failure while driving a simulated game.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum SimulateError {
    /// The engine could not produce a move.
    #[display("Engine error: {}", _0)]
    Engine(EngineError),
    /// A move was refused, so the game could not progress.
    #[display("Game stalled after {} moves", _0)]
    Stalled(#[error(not(source))] usize),
}

impl From<EngineError> for SimulateError {
    fn from(err: EngineError) -> Self {
        Self::Engine(err)
    }
}

/// Results of a batch of simulated games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    /// Games played.
    pub games: usize,
    /// Games the engine (O) won.
    pub engine_wins: usize,
    /// Games the random player (X) won.
    pub opponent_wins: usize,
    /// Drawn games.
    pub draws: usize,
}

impl Tally {
    /// Counts one finished game.
    pub fn record(&mut self, outcome: Outcome) {
        self.games += 1;
        match outcome.winner() {
            Some(mark) if mark == AUTOMATED => self.engine_wins += 1,
            Some(_) => self.opponent_wins += 1,
            None => self.draws += 1,
        }
    }
}

impl std::fmt::Display for Tally {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "games: {}  engine (O) wins: {}  random (X) wins: {}  draws: {}",
            self.games, self.engine_wins, self.opponent_wins, self.draws
        )
    }
}

/// Plays one game to completion through the controller, X choosing uniformly at random.
///
/// Automated tickets are fired immediately.
#[instrument(skip(controller, rng))]
pub fn play_one<S: MoveSelector, R: Rng + ?Sized>(
    controller: &mut GameController<S>,
    rng: &mut R,
) -> Result<Outcome, SimulateError> {
    controller.reset();
    controller.start();

    loop {
        let ply = controller.history().len();
        let position = controller
            .board()
            .empty_positions()
            .choose(&mut *rng)
            .copied()
            .ok_or(SimulateError::Stalled(ply))?;

        let ticket = match controller.human_move(position) {
            Transition::AutomatedPending(ticket) => ticket,
            Transition::Finished(outcome) => return Ok(outcome),
            Transition::HumanToMove | Transition::Ignored => {
                return Err(SimulateError::Stalled(ply));
            }
        };

        match controller.play_automated(ticket)? {
            Transition::HumanToMove => {}
            Transition::Finished(outcome) => return Ok(outcome),
            Transition::AutomatedPending(_) | Transition::Ignored => {
                return Err(SimulateError::Stalled(controller.history().len()));
            }
        }
        debug!(ply = controller.history().len(), "Round complete");
    }
}

/// Plays `games` games of the rule engine against random X.
#[instrument(skip(rng))]
pub fn simulate<R: Rng + ?Sized>(
    games: usize,
    engine_seed: Option<u64>,
    rng: &mut R,
) -> Result<Tally, SimulateError> {
    let mut controller = GameController::with_selector(RuleEngine::from_seed(engine_seed));
    let mut tally = Tally::default();

    for _ in 0..games {
        let outcome = play_one(&mut controller, &mut *rng)?;
        tally.record(outcome);
    }

    info!(%tally, "Simulation complete");
    Ok(tally)
}
