//! Paced turn controller.
//!
//! The [`Referee`] owns the [`Table`] and is the only thing that changes
//! it. Requests come in over a channel, every resulting state goes out as a
//! [`TableEvent`]. When the computer is to move, a timer task sleeps for the
//! configured delay and then posts the epoch it was scheduled in; the
//! referee plays the move only if the epoch still matches. Reset, menu and
//! new-game requests bump the epoch, so a timer from an abandoned board is
//! dropped instead of landing on the fresh one.

use crate::config::ComputerConfig;
use anyhow::Result;
use derive_more::{Display, Error};
use rand::rngs::StdRng;
use strictly_noughts::{Difficulty, GameMode, ModeChoice, Move, Table, TableError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Something the presentation layer asks of the referee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Play the square at this index (0-8) for the human to move.
    Move(usize),
    /// Answer the top-level menu.
    ChooseMode(ModeChoice),
    /// Answer the difficulty menu.
    ChooseDifficulty(Difficulty),
    /// Start a fresh game in this mode, skipping the menus.
    NewGame(GameMode),
    /// Clear the board, keep the mode.
    Reset,
    /// Back to the top-level menu.
    ReturnToMenu,
}

/// Messages sent from the referee to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableEvent {
    /// The table changed because of a request.
    Updated(Table),
    /// The computer is to move; its answer follows after the delay.
    ComputerThinking,
    /// The computer moved.
    ComputerMoved {
        /// The move played.
        action: Move,
        /// Table after the move.
        table: Table,
    },
    /// A request was refused; the table is unchanged.
    Rejected(TableError),
}

/// Sending half held by the presentation layer.
#[derive(Debug, Clone)]
pub struct RefereeHandle {
    requests: mpsc::UnboundedSender<Request>,
}

impl RefereeHandle {
    /// Sends a request.
    ///
    /// # Errors
    ///
    /// Fails once the referee task has stopped.
    pub fn send(&self, request: Request) -> Result<()> {
        self.requests
            .send(request)
            .map_err(|_| anyhow::anyhow!("Referee has stopped"))
    }
}

/// The presentation layer stopped listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Event receiver dropped")]
struct EventsClosed;

/// Owns the table and paces the computer.
pub struct Referee {
    table: Table,
    epoch: u64,
    computer: ComputerConfig,
    rng: StdRng,
    requests: mpsc::UnboundedReceiver<Request>,
    timer_tx: mpsc::UnboundedSender<u64>,
    timer_rx: mpsc::UnboundedReceiver<u64>,
    events: mpsc::UnboundedSender<TableEvent>,
}

impl Referee {
    /// Creates a referee around `table`.
    ///
    /// Returns the referee, the handle for sending requests and the
    /// receiver for events.
    #[instrument(skip(table, computer), fields(phase = %table.phase()))]
    pub fn new(
        table: Table,
        computer: ComputerConfig,
    ) -> (Self, RefereeHandle, mpsc::UnboundedReceiver<TableEvent>) {
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (timer_tx, timer_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let rng = computer.rng();
        let referee = Self {
            table,
            epoch: 0,
            computer,
            rng,
            requests: request_rx,
            timer_tx,
            timer_rx,
            events: event_tx,
        };
        let handle = RefereeHandle {
            requests: request_tx,
        };
        (referee, handle, event_rx)
    }

    /// Spawns the referee on the current runtime.
    pub fn spawn(
        table: Table,
        computer: ComputerConfig,
    ) -> (
        RefereeHandle,
        mpsc::UnboundedReceiver<TableEvent>,
        JoinHandle<Result<()>>,
    ) {
        let (referee, handle, events) = Self::new(table, computer);
        let task = tokio::spawn(referee.run());
        (handle, events, task)
    }

    /// Runs until every [`RefereeHandle`] is dropped or the event receiver
    /// goes away. Both are a normal shutdown.
    ///
    /// Publishes the starting table first.
    pub async fn run(mut self) -> Result<()> {
        info!("Referee started");
        let started = self
            .emit(TableEvent::Updated(self.table.clone()))
            .and_then(|()| self.schedule_computer());

        if started.is_ok() {
            loop {
                let step = tokio::select! {
                    request = self.requests.recv() => match request {
                        Some(request) => self.handle_request(request),
                        None => break,
                    },
                    Some(epoch) = self.timer_rx.recv() => self.handle_timer(epoch),
                };
                if step.is_err() {
                    debug!("Event receiver dropped");
                    break;
                }
            }
        } else {
            debug!("Event receiver dropped before start");
        }

        info!("Referee stopped");
        Ok(())
    }

    #[instrument(skip(self), fields(epoch = self.epoch))]
    fn handle_request(&mut self, request: Request) -> Result<(), EventsClosed> {
        let result = match request {
            Request::Move(index) => self.table.request_move(index).map_err(TableError::from),
            Request::ChooseMode(choice) => self.table.choose_mode(choice),
            Request::ChooseDifficulty(difficulty) => self.table.choose_difficulty(difficulty),
            Request::NewGame(mode) => Ok(Table::new_game(mode)),
            Request::Reset => Ok(self.table.reset_board()),
            Request::ReturnToMenu => Ok(self.table.return_to_menu()),
        };

        match result {
            Ok(table) => {
                if !matches!(request, Request::Move(_)) {
                    self.epoch += 1;
                    debug!(epoch = self.epoch, "Board replaced, pending computer moves cancelled");
                }
                self.table = table;
                self.emit(TableEvent::Updated(self.table.clone()))?;
                self.schedule_computer()
            }
            Err(error) => {
                debug!(%error, "Request rejected");
                self.emit(TableEvent::Rejected(error))
            }
        }
    }

    /// Starts the pacing timer if the computer is to move.
    fn schedule_computer(&mut self) -> Result<(), EventsClosed> {
        if self.table.computer_to_move().is_none() {
            return Ok(());
        }
        self.emit(TableEvent::ComputerThinking)?;

        let epoch = self.epoch;
        let delay = self.computer.delay();
        let timer_tx = self.timer_tx.clone();
        debug!(epoch, ?delay, "Scheduling computer move");
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // The referee may already be gone; nothing to do then.
            let _ = timer_tx.send(epoch);
        });
        Ok(())
    }

    #[instrument(skip(self), fields(current = self.epoch))]
    fn handle_timer(&mut self, epoch: u64) -> Result<(), EventsClosed> {
        if epoch != self.epoch {
            debug!("Discarding stale computer move");
            return Ok(());
        }
        let Some(strategy) = self.table.computer_strategy(*self.computer.hard_trap()) else {
            debug!("No computer seat, ignoring timer");
            return Ok(());
        };
        if self.table.computer_to_move().is_none() {
            debug!("Not the computer's turn, ignoring timer");
            return Ok(());
        }

        match self.table.play_computer_move(strategy, &mut self.rng) {
            Ok((action, table)) => {
                info!(%action, strategy = strategy.name(), "Computer moved");
                self.table = table;
                self.emit(TableEvent::ComputerMoved {
                    action,
                    table: self.table.clone(),
                })?;
                self.schedule_computer()
            }
            Err(error) => {
                warn!(%error, "Computer move failed");
                self.emit(TableEvent::Rejected(error))
            }
        }
    }

    fn emit(&self, event: TableEvent) -> Result<(), EventsClosed> {
        self.events.send(event).map_err(|_| EventsClosed)
    }
}
