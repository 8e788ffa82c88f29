//! Turn controller.
//!
//! [`Table`] is the whole session as one value: which menu step we are on,
//! the chosen mode, and the game. Every operation takes `&self` and returns
//! the next table, so a rejected request leaves the caller's table exactly
//! as it was.
//!
//! ```text
//! AwaitingMode ──two player──────────────────────────┐
//!      │                                             ▼
//!      └─single player─▶ AwaitingDifficulty ──▶ InProgress ◀─┐ move / reset
//!                                                    │       │
//!                                                    ▼       │
//!                                                 Finished ──┘ reset
//! InProgress / Finished ──return to menu──▶ AwaitingMode
//! ```

use super::action::{Move, MoveError};
use super::error::ErrorKind;
use super::mode::{Difficulty, GameMode, ModeChoice};
use super::strategy::{Strategy, StrategyError};
use super::typestate::{GameFinished, GameInProgress, GameResult};
use super::{Board, Mark, Outcome, Position};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

/// Menu step or game phase of a [`Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum Phase {
    /// Waiting for two player / single player.
    #[strum(to_string = "awaiting mode")]
    AwaitingMode,
    /// Single player chosen, waiting for a difficulty.
    #[strum(to_string = "awaiting difficulty")]
    AwaitingDifficulty,
    /// Moves are accepted.
    #[strum(to_string = "in progress")]
    InProgress,
    /// Won or drawn.
    #[strum(to_string = "finished")]
    Finished,
}

/// Rejected table operation that is not a plain move error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum TableError {
    /// The move itself was refused.
    #[display("{}", _0)]
    Move(MoveError),

    /// The computer's strategy had nothing to play.
    #[display("{}", _0)]
    Strategy(StrategyError),

    /// The computer was asked to move on a human turn.
    #[display("It is not the computer's turn")]
    #[from(ignore)]
    NotComputerTurn,

    /// A menu action arrived in the wrong phase.
    #[display("Cannot {} while {}", action, phase)]
    #[from(ignore)]
    WrongPhase {
        /// What was attempted.
        action: &'static str,
        /// Where the table was.
        phase: Phase,
    },
}

impl TableError {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            TableError::Move(err) => err.kind(),
            TableError::Strategy(err) => err.kind(),
            TableError::NotComputerTurn | TableError::WrongPhase { .. } => ErrorKind::IllegalTurn,
        }
    }
}

impl std::error::Error for TableError {}

/// Session state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Table {
    /// Top-level menu.
    #[default]
    AwaitingMode,
    /// Difficulty menu for single player.
    AwaitingDifficulty,
    /// A game is being played.
    InProgress {
        /// Chosen mode.
        mode: GameMode,
        /// The game.
        game: GameInProgress,
    },
    /// A game has ended.
    Finished {
        /// Chosen mode.
        mode: GameMode,
        /// The decided game.
        game: GameFinished,
    },
}

impl Table {
    /// A table at the top-level menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skips the menus and starts a game in `mode`.
    #[instrument]
    pub fn new_game(mode: GameMode) -> Self {
        info!(mode = %mode.name(), "New game");
        Table::InProgress {
            mode,
            game: GameInProgress::new(),
        }
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match self {
            Table::AwaitingMode => Phase::AwaitingMode,
            Table::AwaitingDifficulty => Phase::AwaitingDifficulty,
            Table::InProgress { .. } => Phase::InProgress,
            Table::Finished { .. } => Phase::Finished,
        }
    }

    /// Answers the top-level menu.
    ///
    /// # Errors
    ///
    /// [`TableError::WrongPhase`] unless the table is awaiting a mode.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn choose_mode(&self, choice: ModeChoice) -> Result<Table, TableError> {
        match self {
            Table::AwaitingMode => match choice {
                ModeChoice::TwoPlayer => Ok(Table::new_game(GameMode::TwoPlayer)),
                ModeChoice::SinglePlayer => Ok(Table::AwaitingDifficulty),
            },
            _ => Err(TableError::WrongPhase {
                action: "choose a mode",
                phase: self.phase(),
            }),
        }
    }

    /// Answers the difficulty menu and starts the game.
    ///
    /// # Errors
    ///
    /// [`TableError::WrongPhase`] unless the table is awaiting a difficulty.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn choose_difficulty(&self, difficulty: Difficulty) -> Result<Table, TableError> {
        match self {
            Table::AwaitingDifficulty => Ok(Table::new_game(GameMode::SinglePlayer(difficulty))),
            _ => Err(TableError::WrongPhase {
                action: "choose a difficulty",
                phase: self.phase(),
            }),
        }
    }

    /// Human move request for the square at `index` (0-8).
    ///
    /// # Errors
    ///
    /// - [`MoveError::NotStarted`] while a menu is open.
    /// - [`MoveError::GameOver`] once the game is finished.
    /// - [`MoveError::OutOfBounds`] for an index past 8.
    /// - [`MoveError::WrongPlayer`] while the computer is to move.
    /// - [`MoveError::SquareOccupied`] for a taken square.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn request_move(&self, index: usize) -> Result<Table, MoveError> {
        let (mode, game) = match self {
            Table::AwaitingMode | Table::AwaitingDifficulty => {
                return Err(MoveError::NotStarted);
            }
            Table::Finished { .. } => return Err(MoveError::GameOver),
            Table::InProgress { mode, game } => (*mode, game),
        };

        let position = Position::from_index(index).ok_or(MoveError::OutOfBounds(index))?;
        let mark = game.to_move();
        if mode.is_computer(mark) {
            warn!(%position, "Human move during the computer's turn");
            return Err(MoveError::WrongPlayer(mark.opponent()));
        }

        Self::advance(mode, game.clone(), Move::new(mark, position))
    }

    /// Mark the computer must play now, if it is the computer's turn.
    pub fn computer_to_move(&self) -> Option<Mark> {
        match self {
            Table::InProgress { mode, game } if mode.is_computer(game.to_move()) => {
                Some(game.to_move())
            }
            _ => None,
        }
    }

    /// Strategy for the computer seat, if there is one.
    pub fn computer_strategy(&self, hard_trap: bool) -> Option<Strategy> {
        self.mode()
            .and_then(|mode| mode.difficulty())
            .map(|difficulty| Strategy::for_difficulty(difficulty, hard_trap))
    }

    /// Lets the computer take its turn with `strategy`.
    ///
    /// Validates the turn, asks the strategy for a square, applies it and
    /// recomputes the outcome in one step.
    ///
    /// # Errors
    ///
    /// - [`TableError::NotComputerTurn`] on a human turn or in two player.
    /// - [`MoveError::NotStarted`] / [`MoveError::GameOver`] outside play.
    /// - [`StrategyError::NoLegalMove`] on a full board.
    #[instrument(skip(self, rng), fields(phase = %self.phase()))]
    pub fn play_computer_move<R: Rng>(
        &self,
        strategy: Strategy,
        rng: &mut R,
    ) -> Result<(Move, Table), TableError> {
        let (mode, game) = match self {
            Table::AwaitingMode | Table::AwaitingDifficulty => {
                return Err(MoveError::NotStarted.into());
            }
            Table::Finished { .. } => return Err(MoveError::GameOver.into()),
            Table::InProgress { mode, game } => (*mode, game),
        };
        let mark = game.to_move();
        if !mode.is_computer(mark) {
            return Err(TableError::NotComputerTurn);
        }

        let position = strategy.choose(game.board(), mark, rng)?;
        let action = Move::new(mark, position);
        let next = Self::advance(mode, game.clone(), action)?;
        debug!(%action, "Computer moved");
        Ok((action, next))
    }

    fn advance(mode: GameMode, game: GameInProgress, action: Move) -> Result<Table, MoveError> {
        Ok(match game.make_move(action)? {
            GameResult::InProgress(game) => Table::InProgress { mode, game },
            GameResult::Finished(game) => {
                info!(outcome = %game.outcome(), "Game over");
                Table::Finished { mode, game }
            }
        })
    }

    /// Outcome of the current board; menus count as in progress.
    pub fn current_outcome(&self) -> Outcome {
        match self {
            Table::Finished { game, .. } => game.outcome(),
            _ => Outcome::InProgress,
        }
    }

    /// Clears the board and keeps the mode. Menus are left as they are.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn reset_board(&self) -> Table {
        match self.mode() {
            Some(mode) => Table::InProgress {
                mode,
                game: GameInProgress::new(),
            },
            None => self.clone(),
        }
    }

    /// Drops the game and the mode and goes back to the top-level menu.
    #[instrument(skip(self), fields(phase = %self.phase()))]
    pub fn return_to_menu(&self) -> Table {
        Table::AwaitingMode
    }

    /// Chosen mode, once a game exists.
    pub fn mode(&self) -> Option<GameMode> {
        match self {
            Table::InProgress { mode, .. } | Table::Finished { mode, .. } => Some(*mode),
            Table::AwaitingMode | Table::AwaitingDifficulty => None,
        }
    }

    /// Current board; empty while a menu is open.
    pub fn board(&self) -> Board {
        match self {
            Table::InProgress { game, .. } => *game.board(),
            Table::Finished { game, .. } => *game.board(),
            Table::AwaitingMode | Table::AwaitingDifficulty => Board::new(),
        }
    }

    /// Side to move, while a game is in progress.
    pub fn to_move(&self) -> Option<Mark> {
        match self {
            Table::InProgress { game, .. } => Some(game.to_move()),
            _ => None,
        }
    }

    /// Moves played so far.
    pub fn history(&self) -> &[Move] {
        match self {
            Table::InProgress { game, .. } => game.history(),
            Table::Finished { game, .. } => game.history(),
            Table::AwaitingMode | Table::AwaitingDifficulty => &[],
        }
    }

    /// One-line status for display.
    pub fn status_string(&self) -> String {
        match self {
            Table::AwaitingMode => "Choose a mode: two players or vs computer".to_string(),
            Table::AwaitingDifficulty => "Choose a difficulty: easy, medium or hard".to_string(),
            Table::InProgress { mode, game } if mode.is_computer(game.to_move()) => {
                format!("Computer ({}) is thinking...", game.to_move())
            }
            Table::InProgress { game, .. } => format!("Next player: {}", game.to_move()),
            Table::Finished { game, .. } => game.outcome().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn play(table: Table, indices: &[usize]) -> Table {
        indices
            .iter()
            .fold(table, |t, i| t.request_move(*i).unwrap())
    }

    #[test]
    fn test_menu_flow_single_player() {
        let table = Table::new();
        assert_eq!(table.phase(), Phase::AwaitingMode);
        let table = table.choose_mode(ModeChoice::SinglePlayer).unwrap();
        assert_eq!(table.phase(), Phase::AwaitingDifficulty);
        let table = table.choose_difficulty(Difficulty::Medium).unwrap();
        assert_eq!(table.mode(), Some(GameMode::SinglePlayer(Difficulty::Medium)));
        assert_eq!(table.to_move(), Some(Mark::X));
    }

    #[test]
    fn test_menu_flow_two_player() {
        let table = Table::new().choose_mode(ModeChoice::TwoPlayer).unwrap();
        assert_eq!(table.phase(), Phase::InProgress);
        assert_eq!(table.mode(), Some(GameMode::TwoPlayer));
    }

    #[test]
    fn test_menu_actions_in_wrong_phase() {
        let table = Table::new_game(GameMode::TwoPlayer);
        let err = table.choose_difficulty(Difficulty::Easy).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalTurn);
        assert!(Table::new().choose_difficulty(Difficulty::Easy).is_err());
        assert!(
            Table::AwaitingDifficulty
                .choose_mode(ModeChoice::TwoPlayer)
                .is_err()
        );
    }

    #[test]
    fn test_move_before_start_is_illegal_turn() {
        for table in [Table::AwaitingMode, Table::AwaitingDifficulty] {
            let err = table.request_move(4).unwrap_err();
            assert_eq!(err, MoveError::NotStarted);
            assert_eq!(err.kind(), ErrorKind::IllegalTurn);
        }
    }

    #[test]
    fn test_two_player_alternates() {
        let table = play(Table::new_game(GameMode::TwoPlayer), &[4, 0]);
        assert_eq!(table.to_move(), Some(Mark::X));
        assert_eq!(table.board().get(Position::Center).mark(), Some(Mark::X));
        assert_eq!(table.board().get(Position::TopLeft).mark(), Some(Mark::O));
        assert_eq!(table.status_string(), "Next player: X");
    }

    #[test]
    fn test_out_of_range_index() {
        let table = Table::new_game(GameMode::TwoPlayer);
        assert_eq!(table.request_move(9), Err(MoveError::OutOfBounds(9)));
    }

    #[test]
    fn test_human_blocked_on_computer_turn() {
        let table = Table::new_game(GameMode::SinglePlayer(Difficulty::Easy))
            .request_move(0)
            .unwrap();
        assert_eq!(table.computer_to_move(), Some(Mark::O));
        let err = table.request_move(1).unwrap_err();
        assert_eq!(err, MoveError::WrongPlayer(Mark::X));
        assert_eq!(err.kind(), ErrorKind::IllegalTurn);
    }

    #[test]
    fn test_computer_blocked_on_human_turn() {
        let table = Table::new_game(GameMode::SinglePlayer(Difficulty::Hard));
        let mut rng = StdRng::seed_from_u64(0);
        let err = table
            .play_computer_move(Strategy::Optimal, &mut rng)
            .unwrap_err();
        assert_eq!(err, TableError::NotComputerTurn);

        let two = Table::new_game(GameMode::TwoPlayer).request_move(0).unwrap();
        assert_eq!(
            two.play_computer_move(Strategy::Random, &mut rng),
            Err(TableError::NotComputerTurn)
        );
    }

    #[test]
    fn test_computer_move_applies_and_hands_back_turn() {
        let table = Table::new_game(GameMode::SinglePlayer(Difficulty::Medium))
            .request_move(0)
            .unwrap();
        let strategy = table.computer_strategy(true).unwrap();
        assert_eq!(strategy, Strategy::Heuristic);

        let mut rng = StdRng::seed_from_u64(9);
        let (action, next) = table.play_computer_move(strategy, &mut rng).unwrap();
        assert_eq!(action.mark, Mark::O);
        assert_ne!(action.position, Position::TopLeft);
        assert_eq!(next.board().get(action.position).mark(), Some(Mark::O));
        assert_eq!(next.to_move(), Some(Mark::X));
        assert_eq!(next.computer_to_move(), None);
        assert_eq!(next.history().len(), 2);
    }

    #[test]
    fn test_finished_table_rejects_moves_unchanged() {
        // X: 0, 1, 2 wins the top row.
        let table = play(Table::new_game(GameMode::TwoPlayer), &[0, 3, 1, 4, 2]);
        assert_eq!(table.phase(), Phase::Finished);
        assert_eq!(table.current_outcome(), Outcome::Win(Mark::X));
        assert_eq!(table.status_string(), "Winner: X");

        let snapshot = table.clone();
        for index in 0..9 {
            let err = table.request_move(index).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::IllegalMove);
        }
        assert_eq!(table, snapshot);
    }

    #[test]
    fn test_reset_keeps_mode() {
        let mode = GameMode::SinglePlayer(Difficulty::Hard);
        let table = Table::new_game(mode).request_move(4).unwrap();
        let reset = table.reset_board();
        assert_eq!(reset.mode(), Some(mode));
        assert_eq!(reset.board(), Board::new());
        assert_eq!(reset.current_outcome(), Outcome::InProgress);
        assert!(reset.history().is_empty());
    }

    #[test]
    fn test_reset_on_menu_is_noop() {
        assert_eq!(Table::AwaitingDifficulty.reset_board(), Table::AwaitingDifficulty);
    }

    #[test]
    fn test_return_to_menu_clears_mode() {
        let table = Table::new_game(GameMode::SinglePlayer(Difficulty::Easy));
        let menu = table.return_to_menu();
        assert_eq!(menu.phase(), Phase::AwaitingMode);
        assert_eq!(menu.mode(), None);
    }

    #[test]
    fn test_draw_status() {
        // X O X / X O O / O X X
        let table = play(
            Table::new_game(GameMode::TwoPlayer),
            &[0, 1, 2, 4, 3, 5, 7, 6, 8],
        );
        assert_eq!(table.current_outcome(), Outcome::Draw);
        assert_eq!(table.status_string(), "Draw!");
    }
}
