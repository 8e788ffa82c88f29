//! Phase-specific game types.
//!
//! Only [`GameInProgress`] accepts moves. A move consumes it and yields
//! either another in-progress game or a [`GameFinished`], whose board is
//! always won or drawn.

use super::action::{Move, MoveError, apply_move};
use super::contracts::{Contract, MoveContract};
use super::rules::evaluate;
use super::{Board, Mark, Outcome, Position};
use tracing::{debug, instrument};

/// Game in progress: X moves first, marks alternate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Mark,
}

impl GameInProgress {
    /// Starts a game on an empty board with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            to_move: Mark::X,
        }
    }

    /// Applies a move, consuming the game.
    ///
    /// # Errors
    ///
    /// - [`MoveError::WrongPlayer`] if `action.mark` is not the side to move.
    /// - [`MoveError::SquareOccupied`] if the square is taken.
    /// - [`MoveError::InvariantViolation`] if a debug-build postcondition fails.
    #[instrument(skip(self), fields(mark = %action.mark, position = %action.position))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        game.board = apply_move(&game.board, action.position, action.mark)?;
        game.history.push(action);

        match evaluate(&game.board) {
            Outcome::InProgress => {}
            outcome => {
                debug!(%outcome, moves = game.history.len(), "Game finished");
                return Ok(GameResult::Finished(GameFinished {
                    board: game.board,
                    history: game.history,
                }));
            }
        }

        game.to_move = game.to_move.opponent();

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        Ok(GameResult::InProgress(game))
    }

    /// Returns the side to move.
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns empty squares in index order.
    pub fn valid_moves(&self) -> Vec<Position> {
        self.board.empty_positions().collect()
    }

    /// Replays moves from an empty board.
    ///
    /// Stops at the first move that finishes the game; any moves after it
    /// are ignored.
    #[instrument(skip(moves), fields(count = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<GameResult, MoveError> {
        let mut game = GameInProgress::new();
        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                finished @ GameResult::Finished(_) => return Ok(finished),
            }
        }
        Ok(GameResult::InProgress(game))
    }
}

impl Default for GameInProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Game over: the board is won or full.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameFinished {
    board: Board,
    history: Vec<Move>,
}

impl GameFinished {
    /// Outcome of the game, recomputed from the board.
    ///
    /// Never [`Outcome::InProgress`]; [`GameInProgress::make_move`] only
    /// builds this type for decided boards.
    pub fn outcome(&self) -> Outcome {
        evaluate(&self.board)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Starts over on an empty board.
    pub fn restart(self) -> GameInProgress {
        GameInProgress::new()
    }
}

/// Result of making a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
