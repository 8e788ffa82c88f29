//! Medium: win, block, or guess.

use super::random::choose_random;
use super::StrategyError;
use crate::rules::check_winner;
use crate::{Board, Mark, Position};
use rand::Rng;
use tracing::trace;

/// First empty square (index order) where `mark` completes a line.
pub fn winning_move(board: &Board, mark: Mark) -> Option<Position> {
    board
        .empty_positions()
        .find(|pos| check_winner(&board.with(*pos, mark)) == Some(mark))
}

/// Medium difficulty.
///
/// Takes an immediate win if one exists, otherwise blocks the opponent's
/// immediate win, otherwise falls back to [`choose_random`]. The first two
/// tiers pick the lowest qualifying index, so they never touch `rng`.
///
/// # Errors
///
/// [`StrategyError::NoLegalMove`] if the board is full.
pub fn choose_heuristic<R: Rng>(
    board: &Board,
    me: Mark,
    rng: &mut R,
) -> Result<Position, StrategyError> {
    if let Some(pos) = winning_move(board, me) {
        trace!(position = %pos, "Taking the win");
        return Ok(pos);
    }
    if let Some(pos) = winning_move(board, me.opponent()) {
        trace!(position = %pos, "Blocking");
        return Ok(pos);
    }
    choose_random(board, rng)
}
