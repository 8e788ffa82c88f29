//! Game rules for tic-tac-toe.
//!
//! Pure functions over board snapshots. Search calls these hundreds of
//! thousands of times per move, so none of them open a tracing span.

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::check_winner;

use super::{Board, Outcome};

/// Derives the outcome of a board.
///
/// Lines are checked rows, then columns, then diagonals, and the first
/// complete line decides the winner. Legality of the board itself is not
/// checked.
pub fn evaluate(board: &Board) -> Outcome {
    if let Some(winner) = check_winner(board) {
        Outcome::Win(winner)
    } else if is_full(board) {
        Outcome::Draw
    } else {
        Outcome::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mark;

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(evaluate(&Board::new()), Outcome::InProgress);
    }

    #[test]
    fn test_win_beats_full_board() {
        // Full board where X completed the left column on the last move.
        let board: Board = "XOX|XOO|XXO".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Win(Mark::X));
    }

    #[test]
    fn test_first_line_decides_on_illegal_board() {
        // Both marks have a row; rows are scanned top to bottom.
        let board: Board = "OOO|XXX|...".parse().unwrap();
        assert_eq!(evaluate(&board), Outcome::Win(Mark::O));
    }
}
