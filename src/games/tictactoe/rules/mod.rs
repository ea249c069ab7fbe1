//! Game rules for tic-tac-toe.
//!
//! Pure functions evaluating a board. Rules are separated from board
//! storage so the controller and the engine share one definition of a line.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{WINNING_LINES, check_winner};

use super::Board;
use super::phases::Outcome;
use tracing::instrument;

/// Terminal check: a completed line wins, otherwise a full board draws.
///
/// Returns `None` while the game can continue.
#[instrument(skip(board), fields(board = %board))]
pub fn evaluate(board: &Board) -> Option<Outcome> {
    if let Some(winner) = check_winner(board) {
        return Some(Outcome::Winner(winner));
    }
    if is_full(board) {
        return Some(Outcome::Draw);
    }
    None
}
