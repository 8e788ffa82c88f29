//! Strictly Noughts Play - paced computer opponent and terminal driver.
//!
//! The [`Referee`] owns a [`strictly_noughts::Table`] inside a tokio task and
//! schedules the computer's replies after a configurable delay. The
//! [`terminal`] module turns lines of text into referee requests and prints
//! the events that come back.

pub mod cli;
pub mod config;
pub mod referee;
pub mod terminal;

pub use cli::Cli;
pub use config::{ComputerConfig, ConfigError, MAX_DELAY_MS, PlayConfig};
pub use referee::{Referee, RefereeHandle, Request, TableEvent};
