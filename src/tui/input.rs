//! Keyboard mapping for the board.

use crossterm::event::KeyCode;
use hero_tictactoe::Position;

/// Moves the cursor one square with the arrow keys, stopping at the edges.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let index = cursor.to_index();
    let (row, col) = (index / 3, index % 3);

    let (row, col) = match key {
        KeyCode::Up if row > 0 => (row - 1, col),
        KeyCode::Down if row < 2 => (row + 1, col),
        KeyCode::Left if col > 0 => (row, col - 1),
        KeyCode::Right if col < 2 => (row, col + 1),
        _ => (row, col),
    };

    Position::from_index(row * 3 + col).unwrap_or(cursor)
}

/// Digit keys 1-9 address squares in reading order.
pub fn digit_position(c: char) -> Option<Position> {
    match c.to_digit(10) {
        Some(digit @ 1..=9) => Position::from_index(digit as usize - 1),
        _ => None,
    }
}
