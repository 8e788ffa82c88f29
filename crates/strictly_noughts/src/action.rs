//! Moves and move application.
//!
//! A [`Move`] is a domain event: who played where. [`apply_move`] is the
//! only path from one board to the next and refuses anything that would
//! break monotonicity.

use super::error::ErrorKind;
use super::rules::evaluate;
use super::{Board, Mark, Outcome, Position};
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

/// A mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Who played.
    pub mark: Mark,
    /// Where.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(mark: Mark, position: Position) -> Self {
        Self { mark, position }
    }

    /// Returns the mark making this move.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// Returns the position of this move.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a move was refused.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The square at the position is already occupied.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// Raw index outside 0-8.
    #[display("Square index {} is out of range (0-8)", _0)]
    OutOfBounds(usize),

    /// The game is already won or drawn.
    #[display("Game is already over")]
    GameOver,

    /// It is not this mark's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(Mark),

    /// Mode or difficulty has not been chosen yet.
    #[display("Game has not started; choose a mode first")]
    NotStarted,

    /// A postcondition failed after the move was applied.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl MoveError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            MoveError::SquareOccupied(_) | MoveError::OutOfBounds(_) | MoveError::GameOver => {
                ErrorKind::IllegalMove
            }
            MoveError::WrongPlayer(_) | MoveError::NotStarted => ErrorKind::IllegalTurn,
            MoveError::InvariantViolation(_) => ErrorKind::InvariantViolation,
        }
    }
}

impl std::error::Error for MoveError {}

/// Places `mark` at `pos`, returning the next board.
///
/// # Errors
///
/// - [`MoveError::GameOver`] if the board is already won or drawn.
/// - [`MoveError::SquareOccupied`] if `pos` is taken.
///
/// Turn order is not checked here; that belongs to the game that owns
/// the board.
#[instrument(level = "trace", skip(board))]
pub fn apply_move(board: &Board, pos: Position, mark: Mark) -> Result<Board, MoveError> {
    if evaluate(board) != Outcome::InProgress {
        return Err(MoveError::GameOver);
    }
    if !board.is_empty(pos) {
        return Err(MoveError::SquareOccupied(pos));
    }
    let next = board.with(pos, mark);
    trace!(position = %pos, %mark, "Mark placed");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_sets_exactly_one_square() {
        let board: Board = "X...O....".parse().unwrap();
        let next = apply_move(&board, Position::BottomRight, Mark::X).unwrap();
        for pos in Position::ALL {
            if pos == Position::BottomRight {
                assert_eq!(next.get(pos).mark(), Some(Mark::X));
            } else {
                assert_eq!(next.get(pos), board.get(pos));
            }
        }
    }

    #[test]
    fn test_apply_rejects_every_occupied_square() {
        let board: Board = "XOX|O.X|O..".parse().unwrap();
        for pos in Position::ALL.into_iter().filter(|p| !board.is_empty(*p)) {
            for mark in [Mark::X, Mark::O] {
                let err = apply_move(&board, pos, mark).unwrap_err();
                assert_eq!(err, MoveError::SquareOccupied(pos));
                assert_eq!(err.kind(), ErrorKind::IllegalMove);
            }
        }
    }

    #[test]
    fn test_apply_rejects_decided_board() {
        let board: Board = "XXX|OO.|...".parse().unwrap();
        let err = apply_move(&board, Position::MiddleRight, Mark::O).unwrap_err();
        assert_eq!(err, MoveError::GameOver);
        assert_eq!(err.kind(), ErrorKind::IllegalMove);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(MoveError::WrongPlayer(Mark::O).kind(), ErrorKind::IllegalTurn);
        assert_eq!(MoveError::NotStarted.kind(), ErrorKind::IllegalTurn);
        assert_eq!(MoveError::OutOfBounds(9).kind(), ErrorKind::IllegalMove);
    }

    #[test]
    fn test_move_display() {
        let mv = Move::new(Mark::O, Position::Center);
        assert_eq!(mv.to_string(), "O -> Center");
    }
}
