//! Strictly Noughts - tic-tac-toe engine with computer opponents.
//!
//! # Architecture
//!
//! - **Board**: `Copy` snapshot of nine squares ([`Board`], [`Position`])
//! - **Rules**: [`evaluate`] derives the [`Outcome`] of any board
//! - **Moves**: [`apply_move`] is the only way from one board to the next
//! - **Strategies**: random, heuristic, minimax and a beatable minimax
//!   behind the closed [`Strategy`] enum
//! - **Table**: the turn controller state machine ([`Table`])
//!
//! # Example
//!
//! ```
//! use rand::SeedableRng;
//! use strictly_noughts::{Difficulty, GameMode, Outcome, Table};
//!
//! let table = Table::new_game(GameMode::SinglePlayer(Difficulty::Hard));
//! let table = table.request_move(4)?;
//!
//! let strategy = table.computer_strategy(false).expect("single player");
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let (reply, table) = table.play_computer_move(strategy, &mut rng)?;
//!
//! assert_eq!(reply.position.index(), 0);
//! assert_eq!(table.current_outcome(), Outcome::InProgress);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

mod action;
pub mod contracts;
mod error;
pub mod invariants;
mod mode;
mod phases;
mod position;
pub mod rules;
pub mod strategy;
mod table;
mod typestate;
mod types;

pub use action::{Move, MoveError, apply_move};
pub use error::ErrorKind;
pub use mode::{Difficulty, GameMode, ModeChoice};
pub use phases::Outcome;
pub use position::{LINES, Position};
pub use rules::evaluate;
pub use strategy::{Strategy, StrategyError};
pub use table::{Phase, Table, TableError};
pub use typestate::{GameFinished, GameInProgress, GameResult};
pub use types::{Board, BoardParseError, Mark, Square};
