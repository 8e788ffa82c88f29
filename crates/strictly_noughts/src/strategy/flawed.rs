//! Hard with a planted weakness.
//!
//! Against the opening where the opponent takes two opposite corners
//! (0 and 8) and we hold one square, the sound replies are the edges.
//! This variant answers with corner 2 instead, which hands the opponent
//! a forced win. Every other position is searched normally.

use super::minimax::choose_optimal;
use super::StrategyError;
use crate::{Board, Mark, Position, Square};
use tracing::debug;

/// Returns true when the planted reply fires for `me`.
///
/// Exactly three squares occupied, the opponent on both 0 and 8, and 2 free.
pub fn trap_applies(board: &Board, me: Mark) -> bool {
    let opponent = Square::Occupied(me.opponent());
    board.occupied_count() == 3
        && board.get(Position::TopLeft) == opponent
        && board.get(Position::BottomRight) == opponent
        && board.is_empty(Position::TopRight)
}

/// Beatable hard difficulty.
///
/// # Errors
///
/// [`StrategyError::NoLegalMove`] if the board is full.
pub fn choose_flawed_optimal(board: &Board, me: Mark) -> Result<Position, StrategyError> {
    if trap_applies(board, me) {
        debug!("Opposite-corner opening: playing the planted reply");
        return Ok(Position::TopRight);
    }
    choose_optimal(board, me)
}
