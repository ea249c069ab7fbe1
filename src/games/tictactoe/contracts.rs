//! Consistency checks for boards and move histories.
//!
//! These formalize what every reachable position satisfies. The controller
//! asserts them after each move in debug builds, and externally supplied
//! boards are validated against them before the engine sees them.

use super::action::Move;
use super::{Board, Mark, Square};
use derive_more::{Display, Error};
use tracing::{instrument, warn};

/// A board that no legal sequence of moves can produce.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Unreachable board: {} X marks vs {} O marks (X moves first)", x_count, o_count)]
pub struct UnreachableBoard {
    /// Number of X marks.
    pub x_count: usize,
    /// Number of O marks.
    pub o_count: usize,
}

/// Invariant: X moves first and turns alternate, so X count is O count or O count + 1.
pub struct BoardConsistent;

impl BoardConsistent {
    /// Checks the mark-count invariant, reporting the counts on failure.
    #[instrument(skip(board), fields(board = %board))]
    pub fn check(board: &Board) -> Result<(), UnreachableBoard> {
        let x_count = board.count(Mark::X);
        let o_count = board.count(Mark::O);

        if x_count == o_count || x_count == o_count + 1 {
            Ok(())
        } else {
            warn!(x_count, o_count, "Board consistency violated");
            Err(UnreachableBoard { x_count, o_count })
        }
    }

    /// Returns true if the invariant holds.
    pub fn holds(board: &Board) -> bool {
        Self::check(board).is_ok()
    }
}

/// Invariant: every occupied square was produced by exactly one recorded move.
pub struct HistoryComplete;

impl HistoryComplete {
    /// Returns true if the history replays onto the board exactly.
    #[instrument(skip(board, history))]
    pub fn holds(board: &Board, history: &[Move]) -> bool {
        let filled = board
            .squares()
            .iter()
            .filter(|s| !matches!(s, Square::Empty))
            .count();

        let replays = history
            .iter()
            .all(|m| board.get(m.position) == Square::Occupied(m.mark));

        let valid = filled == history.len() && replays;
        if !valid {
            warn!(filled, history_len = history.len(), "History completeness violated");
        }
        valid
    }
}

/// Asserts that all invariants hold (panics on violation in debug builds).
pub fn assert_invariants(board: &Board, history: &[Move]) {
    debug_assert!(BoardConsistent::holds(board), "Board consistency violated");
    debug_assert!(
        HistoryComplete::holds(board, history),
        "History completeness violated"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::tictactoe::Position;

    #[test]
    fn test_balanced_boards_hold() {
        for text in [".........", "X........", "X...O....", "XOX.O.X.."] {
            let board: Board = text.parse().unwrap();
            assert!(BoardConsistent::holds(&board), "{text}");
        }
    }

    #[test]
    fn test_o_first_is_unreachable() {
        let board: Board = "O........".parse().unwrap();
        assert_eq!(
            BoardConsistent::check(&board),
            Err(UnreachableBoard {
                x_count: 0,
                o_count: 1
            })
        );
    }

    #[test]
    fn test_double_x_is_unreachable() {
        let board: Board = "XX.......".parse().unwrap();
        assert!(!BoardConsistent::holds(&board));
    }

    #[test]
    fn test_history_complete() {
        let board: Board = "X...O....".parse().unwrap();
        let history = [
            Move::new(Mark::X, Position::TopLeft),
            Move::new(Mark::O, Position::Center),
        ];
        assert!(HistoryComplete::holds(&board, &history));
        assert!(!HistoryComplete::holds(&board, &history[..1]));
    }
}
