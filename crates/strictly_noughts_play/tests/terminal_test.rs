//! Drives the terminal loop over in-memory pipes.

use std::time::Duration;
use strictly_noughts::{Difficulty, GameMode, Table};
use strictly_noughts_play::{ComputerConfig, Referee, terminal};
use tokio::io::{AsyncReadExt, AsyncWriteExt, BufReader, DuplexStream};
use tokio::time::timeout;

/// Reads from `output` until the accumulated text contains `needle`, then
/// drops everything up to and including it.
async fn read_until(output: &mut DuplexStream, seen: &mut String, needle: &str) {
    let mut buf = [0u8; 1024];
    let found = timeout(Duration::from_secs(30), async {
        loop {
            if let Some(at) = seen.find(needle) {
                seen.drain(..at + needle.len());
                return;
            }
            let n = output.read(&mut buf).await.unwrap();
            assert!(n > 0, "output closed before {:?} appeared", needle);
            seen.push_str(&String::from_utf8_lossy(&buf[..n]));
        }
    })
    .await;
    assert!(found.is_ok(), "timed out waiting for {:?}", needle);
}

#[tokio::test(start_paused = true)]
async fn test_two_player_game_to_a_win() {
    let (handle, events, referee) =
        Referee::spawn(Table::new(), ComputerConfig::default().with_delay_ms(0));

    let (mut keyboard, input) = tokio::io::duplex(1024);
    let (screen, mut output) = tokio::io::duplex(16 * 1024);
    let driver = tokio::spawn(terminal::run(BufReader::new(input), screen, handle, events));

    let mut seen = String::new();
    read_until(&mut output, &mut seen, "1) Two players").await;

    keyboard.write_all(b"1\n").await.unwrap();
    read_until(&mut output, &mut seen, "Next player: X").await;

    // X takes the left column.
    for (square, status) in [
        ("1", "Next player: O"),
        ("2", "Next player: X"),
        ("4", "Next player: O"),
        ("5", "Next player: X"),
        ("7", "Winner: X"),
    ] {
        keyboard
            .write_all(format!("{}\n", square).as_bytes())
            .await
            .unwrap();
        read_until(&mut output, &mut seen, status).await;
    }

    keyboard.write_all(b"9\n").await.unwrap();
    read_until(&mut output, &mut seen, "Rejected: Game is already over").await;

    keyboard.write_all(b"q\n").await.unwrap();
    driver.await.unwrap().unwrap();
    referee.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_bad_input_is_reported_locally() {
    let (handle, events, _referee) = Referee::spawn(
        Table::new_game(GameMode::TwoPlayer),
        ComputerConfig::default(),
    );

    let (mut keyboard, input) = tokio::io::duplex(1024);
    let (screen, mut output) = tokio::io::duplex(16 * 1024);
    let driver = tokio::spawn(terminal::run(BufReader::new(input), screen, handle, events));

    let mut seen = String::new();
    read_until(&mut output, &mut seen, "Next player: X").await;

    keyboard.write_all(b"banana\n").await.unwrap();
    read_until(&mut output, &mut seen, "'banana' is not a square").await;

    drop(keyboard);
    driver.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_computer_reply_is_printed() {
    let (handle, events, _referee) = Referee::spawn(
        Table::new_game(GameMode::SinglePlayer(Difficulty::Hard)),
        ComputerConfig::default().with_seed(Some(1)),
    );

    let (mut keyboard, input) = tokio::io::duplex(1024);
    let (screen, mut output) = tokio::io::duplex(16 * 1024);
    let driver = tokio::spawn(terminal::run(BufReader::new(input), screen, handle, events));

    let mut seen = String::new();
    read_until(&mut output, &mut seen, "Next player: X").await;

    keyboard.write_all(b"1\n").await.unwrap();
    read_until(&mut output, &mut seen, "Computer (O) is thinking...").await;
    read_until(&mut output, &mut seen, "Computer plays Center (square 5)").await;

    keyboard.write_all(b"q\n").await.unwrap();
    driver.await.unwrap().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_quit_with_request_in_flight_is_clean() {
    for _ in 0..20 {
        let (handle, events, referee) = Referee::spawn(
            Table::new_game(GameMode::TwoPlayer),
            ComputerConfig::default(),
        );
        let input = BufReader::new(&b"5\nq\n"[..]);
        terminal::run(input, tokio::io::sink(), handle, events)
            .await
            .unwrap();
        referee.await.unwrap().unwrap();
    }
}

#[tokio::test(start_paused = true)]
async fn test_typed_ahead_menu_answers() {
    let (handle, events, referee) = Referee::spawn(Table::new(), ComputerConfig::default());

    let (mut keyboard, input) = tokio::io::duplex(1024);
    let (screen, mut output) = tokio::io::duplex(16 * 1024);
    // Both answers are buffered before the driver sees any referee reply.
    keyboard.write_all(b"2\n3\n").await.unwrap();
    let driver = tokio::spawn(terminal::run(BufReader::new(input), screen, handle, events));

    let mut seen = String::new();
    read_until(&mut output, &mut seen, "[Vs computer (Hard)]").await;

    keyboard.write_all(b"q\n").await.unwrap();
    driver.await.unwrap().unwrap();
    referee.await.unwrap().unwrap();
}
