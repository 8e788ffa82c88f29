//! Computer opponents.
//!
//! Each strategy is a pure function from a board snapshot to a square.
//! The randomised ones take the random source as an argument so tests
//! can seed it. [`Strategy`] is the closed set the turn controller picks
//! from, keyed by [`Difficulty`].

mod flawed;
mod heuristic;
mod minimax;
mod random;

pub use flawed::{choose_flawed_optimal, trap_applies};
pub use heuristic::{choose_heuristic, winning_move};
pub use minimax::{WIN_SCORE, choose_optimal, move_scores};
pub use random::choose_random;

use super::error::ErrorKind;
use super::{Board, Difficulty, Mark, Position};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Why a strategy could not produce a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum StrategyError {
    /// Every square is occupied.
    #[display("No legal move: the board is full")]
    NoLegalMove,
}

impl StrategyError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StrategyError::NoLegalMove => ErrorKind::NoLegalMove,
        }
    }
}

impl std::error::Error for StrategyError {}

/// Move-selection algorithm used by the computer seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::EnumIter)]
pub enum Strategy {
    /// Uniform random over empty squares.
    Random,
    /// Win, else block, else random.
    Heuristic,
    /// Exhaustive minimax. Never loses.
    Optimal,
    /// Minimax with one planted losing reply to a two-corner opening.
    FlawedOptimal,
}

impl Strategy {
    /// Picks the strategy for a difficulty.
    ///
    /// `hard_trap` selects the beatable search for [`Difficulty::Hard`].
    #[instrument]
    pub fn for_difficulty(difficulty: Difficulty, hard_trap: bool) -> Self {
        match difficulty {
            Difficulty::Easy => Strategy::Random,
            Difficulty::Medium => Strategy::Heuristic,
            Difficulty::Hard if hard_trap => Strategy::FlawedOptimal,
            Difficulty::Hard => Strategy::Optimal,
        }
    }

    /// Chooses a square for `me` on `board`.
    ///
    /// # Errors
    ///
    /// [`StrategyError::NoLegalMove`] if the board is full.
    #[instrument(skip(board, rng), fields(occupied = board.occupied_count()))]
    pub fn choose<R: Rng>(
        &self,
        board: &Board,
        me: Mark,
        rng: &mut R,
    ) -> Result<Position, StrategyError> {
        let pos = match self {
            Strategy::Random => choose_random(board, rng),
            Strategy::Heuristic => choose_heuristic(board, me, rng),
            Strategy::Optimal => choose_optimal(board, me),
            Strategy::FlawedOptimal => choose_flawed_optimal(board, me),
        }?;
        debug!(strategy = ?self, position = %pos, "Strategy chose move");
        Ok(pos)
    }

    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Heuristic => "heuristic",
            Strategy::Optimal => "minimax",
            Strategy::FlawedOptimal => "minimax (trap)",
        }
    }
}
