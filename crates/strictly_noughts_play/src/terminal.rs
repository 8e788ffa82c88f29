//! Line-oriented terminal driver.
//!
//! Reads commands one line at a time, forwards them to the referee and
//! prints every [`TableEvent`]. Input and output are generic so the driver
//! runs against stdin/stdout in the binary and against in-memory pipes in
//! tests.

use crate::referee::{RefereeHandle, Request, TableEvent};
use anyhow::Result;
use derive_more::Display;
use strictly_noughts::{Difficulty, ModeChoice, Phase, Table};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

/// A parsed line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Forward to the referee.
    Request(Request),
    /// Leave the program.
    Quit,
    /// Empty line.
    Blank,
}

/// Input that makes no sense in the current phase.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
    /// Not a square number.
    #[display("'{}' is not a square; type 1-9", _0)]
    NotASquare(String),
    /// Not a menu entry.
    #[display("'{}' is not on the menu", _0)]
    NotOnMenu(String),
}

impl std::error::Error for InputError {}

/// Interprets one line of input for the given phase.
///
/// `q`, `r` and `m` work everywhere. Menus take their entry number or name;
/// during play `1`-`9` pick a square, counted left to right from the top.
pub fn parse_input(phase: Phase, line: &str) -> Result<Input, InputError> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "" => return Ok(Input::Blank),
        "q" | "quit" => return Ok(Input::Quit),
        "r" | "reset" => return Ok(Input::Request(Request::Reset)),
        "m" | "menu" => return Ok(Input::Request(Request::ReturnToMenu)),
        _ => {}
    }

    let request = match phase {
        Phase::AwaitingMode => match word.as_str() {
            "1" | "two" => Request::ChooseMode(ModeChoice::TwoPlayer),
            "2" | "single" | "computer" => Request::ChooseMode(ModeChoice::SinglePlayer),
            other => other
                .parse::<ModeChoice>()
                .map(Request::ChooseMode)
                .map_err(|_| InputError::NotOnMenu(line.trim().to_string()))?,
        },
        Phase::AwaitingDifficulty => match word.as_str() {
            "1" => Request::ChooseDifficulty(Difficulty::Easy),
            "2" => Request::ChooseDifficulty(Difficulty::Medium),
            "3" => Request::ChooseDifficulty(Difficulty::Hard),
            other => other
                .parse::<Difficulty>()
                .map(Request::ChooseDifficulty)
                .map_err(|_| InputError::NotOnMenu(line.trim().to_string()))?,
        },
        Phase::InProgress | Phase::Finished => match word.parse::<usize>() {
            Ok(square @ 1..=9) => Request::Move(square - 1),
            _ => return Err(InputError::NotASquare(line.trim().to_string())),
        },
    };
    Ok(Input::Request(request))
}

/// Key help for a phase.
pub fn prompt(phase: Phase) -> &'static str {
    match phase {
        Phase::AwaitingMode => "1) Two players  2) Vs computer  q) Quit",
        Phase::AwaitingDifficulty => "1) Easy  2) Medium  3) Hard  m) Menu  q) Quit",
        Phase::InProgress => "1-9) Play a square  r) Reset  m) Menu  q) Quit",
        Phase::Finished => "r) Play again  m) Menu  q) Quit",
    }
}

/// Board (when a game exists), status line and key help.
pub fn render_table(table: &Table) -> String {
    let mut out = String::new();
    if let Some(mode) = table.mode() {
        out.push_str(&format!("[{}]\n", mode.name()));
        out.push_str(&table.board().display());
        out.push('\n');
    }
    out.push_str(&table.status_string());
    out.push('\n');
    out.push_str(prompt(table.phase()));
    out.push('\n');
    out
}

/// Text for one referee event, or `None` if there is nothing new to show.
pub fn render_event(event: &TableEvent) -> Option<String> {
    match event {
        TableEvent::Updated(table) => Some(render_table(table)),
        // The status line of the preceding update already says so.
        TableEvent::ComputerThinking => None,
        TableEvent::ComputerMoved { action, table } => Some(format!(
            "Computer plays {} (square {})\n{}",
            action.position.label(),
            action.position.index() + 1,
            render_table(table)
        )),
        TableEvent::Rejected(error) => Some(format!("Rejected: {}\n", error)),
    }
}

/// Phase the next line of input is read against.
///
/// Menu answers can be typed before the referee has replied to the previous
/// one, so every forwarded request moves the phase to where it will lead.
/// The last table shown takes over again once the referee has answered all
/// forwarded requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PhaseTracker {
    shown: Phase,
    expected: Phase,
    in_flight: usize,
    seen_initial: bool,
}

impl PhaseTracker {
    fn new() -> Self {
        Self {
            shown: Phase::AwaitingMode,
            expected: Phase::AwaitingMode,
            in_flight: 0,
            seen_initial: false,
        }
    }

    fn current(&self) -> Phase {
        self.expected
    }

    fn forwarded(&mut self, request: Request) {
        self.in_flight += 1;
        self.expected = match (self.expected, request) {
            (Phase::AwaitingMode, Request::ChooseMode(ModeChoice::SinglePlayer)) => {
                Phase::AwaitingDifficulty
            }
            (Phase::AwaitingMode, Request::ChooseMode(ModeChoice::TwoPlayer))
            | (Phase::AwaitingDifficulty, Request::ChooseDifficulty(_))
            | (Phase::InProgress | Phase::Finished, Request::Reset)
            | (_, Request::NewGame(_)) => Phase::InProgress,
            (_, Request::ReturnToMenu) => Phase::AwaitingMode,
            (phase, _) => phase,
        };
    }

    fn observe(&mut self, event: &TableEvent) {
        match event {
            TableEvent::Updated(table) => {
                self.shown = table.phase();
                // The referee publishes its starting table unasked.
                if self.seen_initial {
                    self.answered();
                } else {
                    self.seen_initial = true;
                    self.settle();
                }
            }
            TableEvent::Rejected(_) => self.answered(),
            TableEvent::ComputerMoved { table, .. } => {
                self.shown = table.phase();
                self.settle();
            }
            TableEvent::ComputerThinking => {}
        }
    }

    fn answered(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.settle();
    }

    fn settle(&mut self) {
        if self.in_flight == 0 {
            self.expected = self.shown;
        }
    }
}

/// Runs the driver until `q`, end of input, or the referee stops.
///
/// Lines typed ahead of the referee's replies are read against the phase
/// the earlier requests lead to, so `2` then `3` picks Hard even if the
/// difficulty menu has not been printed yet.
#[instrument(skip_all)]
pub async fn run<R, W>(
    input: R,
    mut output: W,
    handle: RefereeHandle,
    mut events: mpsc::UnboundedReceiver<TableEvent>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut phase = PhaseTracker::new();

    loop {
        tokio::select! {
            biased;

            event = events.recv() => {
                let Some(event) = event else {
                    debug!("Referee closed its event channel");
                    break;
                };
                phase.observe(&event);
                if let Some(text) = render_event(&event) {
                    output.write_all(text.as_bytes()).await?;
                    output.flush().await?;
                }
            }

            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    break;
                };
                match parse_input(phase.current(), &line) {
                    Ok(Input::Quit) => break,
                    Ok(Input::Blank) => {}
                    Ok(Input::Request(request)) => {
                        debug!(?request, phase = %phase.current(), "Forwarding request");
                        handle.send(request)?;
                        phase.forwarded(request);
                    }
                    Err(error) => {
                        output.write_all(format!("{}\n", error).as_bytes()).await?;
                        output.flush().await?;
                    }
                }
            }
        }
    }

    info!("Terminal driver finished");
    Ok(())
}
