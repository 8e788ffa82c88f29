//! Pre- and postconditions for moves.
//!
//! Preconditions are always checked. Postconditions re-verify the game
//! invariants after a move and only run in debug builds.

use super::action::{Move, MoveError};
use super::invariants::{GameInvariants, InvariantSet};
use super::typestate::GameInProgress;
use tracing::{instrument, warn};

/// Hoare-style contract over a state transition.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the target square is empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Checks the precondition.
    pub fn check(mv: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if game.board().is_empty(mv.position) {
            Ok(())
        } else {
            Err(MoveError::SquareOccupied(mv.position))
        }
    }
}

/// Precondition: the move is made by the side to move.
pub struct PlayersTurn;

impl PlayersTurn {
    /// Checks the precondition.
    pub fn check(mv: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        if mv.mark == game.to_move() {
            Ok(())
        } else {
            Err(MoveError::WrongPlayer(mv.mark))
        }
    }
}

/// Composite precondition: right player, empty square.
pub struct LegalMove;

impl LegalMove {
    /// Checks turn order first, then the square.
    #[instrument(skip(game))]
    pub fn check(mv: &Move, game: &GameInProgress) -> Result<(), MoveError> {
        PlayersTurn::check(mv, game)?;
        SquareIsEmpty::check(mv, game)?;
        Ok(())
    }
}

/// Contract for placing a mark on an in-progress game.
pub struct MoveContract;

impl Contract<GameInProgress, Move> for MoveContract {
    fn pre(game: &GameInProgress, action: &Move) -> Result<(), MoveError> {
        LegalMove::check(action, game)
    }

    fn post(before: &GameInProgress, after: &GameInProgress) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            warn!(
                before = before.history().len(),
                after = after.history().len(),
                "History did not grow by one move"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must grow by exactly one move".to_string(),
            ));
        }
        GameInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Invariant check failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameResult, Mark, Position, Square};

    #[test]
    fn test_precondition_empty_square() {
        let game = GameInProgress::new();
        let action = Move::new(Mark::X, Position::Center);
        assert!(MoveContract::pre(&game, &action).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let game = GameInProgress::new();
        if let Ok(GameResult::InProgress(game)) =
            game.make_move(Move::new(Mark::X, Position::Center))
        {
            let again = Move::new(Mark::O, Position::Center);
            assert_eq!(
                MoveContract::pre(&game, &again),
                Err(MoveError::SquareOccupied(Position::Center))
            );
        }
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let game = GameInProgress::new();
        let action = Move::new(Mark::O, Position::Center);
        assert_eq!(
            MoveContract::pre(&game, &action),
            Err(MoveError::WrongPlayer(Mark::O))
        );
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let game = GameInProgress::new();
        let action = Move::new(Mark::X, Position::Center);
        if let Ok(GameResult::InProgress(mut after)) = game.clone().make_move(action) {
            assert!(MoveContract::post(&game, &after).is_ok());
            after.board.set(Position::TopLeft, Square::Occupied(Mark::O));
            assert!(matches!(
                MoveContract::post(&game, &after),
                Err(MoveError::InvariantViolation(_))
            ));
        }
    }
}
