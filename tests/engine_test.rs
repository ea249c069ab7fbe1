//! Tests for the rule-based move selection engine.

use hero_tictactoe::{
    Board, EngineError, Mark, MoveSelector, Position, RuleEngine, Square, Strategy, decide, rules,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::HashSet;

fn board(text: &str) -> Board {
    text.parse().expect("valid board")
}

/// Every non-terminal board reachable from the empty board, with the mark to move.
fn reachable_positions() -> Vec<(Board, Mark)> {
    fn walk(board: Board, to_move: Mark, seen: &mut HashSet<Board>, out: &mut Vec<(Board, Mark)>) {
        if !seen.insert(board.clone()) || rules::evaluate(&board).is_some() {
            return;
        }
        out.push((board.clone(), to_move));
        for pos in board.empty_positions() {
            let mut next = board.clone();
            next.set(pos, Square::Occupied(to_move));
            walk(next, to_move.opponent(), seen, out);
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    walk(Board::new(), Mark::X, &mut seen, &mut out);
    out
}

#[test]
fn test_empty_board_takes_center() {
    for seed in 0..20 {
        let mut engine = RuleEngine::seeded(seed);
        assert_eq!(
            engine.select_move(&Board::new(), Mark::O, Mark::X),
            Ok(Position::Center)
        );
    }
}

#[test]
fn test_win_now_completes_own_line() {
    // X holds 0 and 1; O has no two-in-a-row.
    let b = board("XX. O.. .O.");
    let mut rng = StdRng::seed_from_u64(3);
    let d = decide(&b, Mark::X, Mark::O, &mut rng).unwrap();
    assert_eq!(d.position, Position::TopRight);
    assert_eq!(d.strategy, Strategy::WinNow);
}

#[test]
fn test_block_opponent_two_in_a_row() {
    // Human has 0 and 1, engine holds the center.
    let b = board("XX. .O. ...");
    let mut rng = StdRng::seed_from_u64(3);
    let d = decide(&b, Mark::O, Mark::X, &mut rng).unwrap();
    assert_eq!(d.position, Position::TopRight);
    assert_eq!(d.strategy, Strategy::Block);
}

#[test]
fn test_win_beats_block() {
    // O can finish row 1 at 5 while X threatens row 0 at 2.
    let b = board("XX. OO. X..");
    let mut engine = RuleEngine::seeded(9);
    let d = engine.decide(&b, Mark::O, Mark::X).unwrap();
    assert_eq!(d.position, Position::MiddleRight);
    assert_eq!(d.strategy, Strategy::WinNow);
}

#[test]
fn test_win_now_on_crowded_board() {
    // X at 0 2 4 6, O at 1 3 5: X already owns the 2-4-6 diagonal, and the
    // first incomplete line it holds two of is the 0-4-8 diagonal.
    let b = board("XOXOXOX..");
    let mut engine = RuleEngine::seeded(9);
    let d = engine.decide(&b, Mark::X, Mark::O).unwrap();
    assert_eq!(d.position, Position::BottomRight);
    assert_eq!(d.strategy, Strategy::WinNow);
}

#[test]
fn test_block_takes_first_threat_in_line_order() {
    // X threatens column 0 (at 6) and row 0 (at 2); rows scan before columns.
    let b = board("XX. XO. .O.");
    let mut engine = RuleEngine::seeded(4);
    let d = engine.decide(&b, Mark::O, Mark::X).unwrap();
    assert_eq!(d.strategy, Strategy::Block);
    assert_eq!(d.position, Position::TopRight);
}

#[test]
fn test_corner_when_center_taken() {
    let b = board("....X....");
    let corners: HashSet<Position> = Position::CORNERS.into_iter().collect();
    let mut seen = HashSet::new();
    for seed in 0..64 {
        let mut engine = RuleEngine::seeded(seed);
        let d = engine.decide(&b, Mark::O, Mark::X).unwrap();
        assert_eq!(d.strategy, Strategy::Corner);
        assert!(corners.contains(&d.position));
        seen.insert(d.position);
    }
    // Tie-break is random, not fixed to the first corner.
    assert!(seen.len() > 1);
}

#[test]
fn test_corner_only_picks_free_corners() {
    // X to move; O holds the center, X already has the top-left corner.
    let b = board("X.. .O. ...");
    let free: HashSet<Position> = [Position::TopRight, Position::BottomLeft, Position::BottomRight]
        .into_iter()
        .collect();
    for seed in 0..32 {
        let d = RuleEngine::seeded(seed).decide(&b, Mark::X, Mark::O).unwrap();
        assert_eq!(d.strategy, Strategy::Corner);
        assert!(free.contains(&d.position));
    }
}

#[test]
fn test_falls_back_to_any_empty_square() {
    // Center and all corners taken, no two-in-a-row with a gap.
    let b = board("X.O OXX X.O");
    let expected: HashSet<Position> = [Position::TopCenter, Position::BottomCenter]
        .into_iter()
        .collect();
    for seed in 0..32 {
        let d = RuleEngine::seeded(seed).decide(&b, Mark::O, Mark::X).unwrap();
        assert_eq!(d.strategy, Strategy::Any);
        assert!(expected.contains(&d.position));
    }
}

#[test]
fn test_full_board_signals_no_move() {
    let mut engine = RuleEngine::seeded(0);
    assert_eq!(
        engine.select_move(&board("XOXXOOOXX"), Mark::O, Mark::X),
        Err(EngineError::NoMoveAvailable)
    );
}

#[test]
fn test_never_plays_occupied_square_on_reachable_boards() {
    let positions = reachable_positions();
    assert!(positions.len() > 4000);

    let mut engine = RuleEngine::seeded(2024);
    for (b, to_move) in positions {
        for _ in 0..3 {
            let pos = engine
                .select_move(&b, to_move, to_move.opponent())
                .expect("non-terminal board has a move");
            assert!(b.is_empty(pos), "engine played occupied {pos} on {b}");
        }
    }
}
