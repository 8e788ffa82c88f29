//! Easy: uniform random.

use super::StrategyError;
use crate::{Board, Position};
use rand::Rng;

/// Picks an empty square uniformly at random.
///
/// # Errors
///
/// [`StrategyError::NoLegalMove`] if the board is full.
pub fn choose_random<R: Rng>(board: &Board, rng: &mut R) -> Result<Position, StrategyError> {
    let empty: Vec<Position> = board.empty_positions().collect();
    if empty.is_empty() {
        return Err(StrategyError::NoLegalMove);
    }
    Ok(empty[rng.random_range(0..empty.len())])
}
