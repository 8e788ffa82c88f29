//! Win detection.

use crate::position::LINES;
use crate::{Board, Mark, Square};

/// Returns the mark owning the first complete line, if any.
pub fn check_winner(board: &Board) -> Option<Mark> {
    LINES.iter().find_map(|&[a, b, c]| {
        let sq = board.get(a);
        if sq != Square::Empty && sq == board.get(b) && sq == board.get(c) {
            sq.mark()
        } else {
            None
        }
    })
}
