//! Squares never change once set.

use super::Invariant;
use crate::{Board, GameInProgress};

/// Replaying the history onto an empty board, with every move landing on
/// an empty square, reproduces the current board.
pub struct MonotonicBoardInvariant;

impl Invariant<GameInProgress> for MonotonicBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = Board::new();
        for mv in game.history() {
            if !reconstructed.is_empty(mv.position) {
                return false;
            }
            reconstructed = reconstructed.with(mv.position, mv.mark);
        }
        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
