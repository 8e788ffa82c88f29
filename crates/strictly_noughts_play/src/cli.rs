//! Command-line interface for the `noughts` binary.

use crate::config::PlayConfig;
use clap::Parser;
use strictly_noughts::{Difficulty, GameMode, ModeChoice, Table};
use tracing::{debug, warn};

/// Strictly Noughts - tic-tac-toe against a friend or the computer
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Terminal tic-tac-toe with a paced computer opponent", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (optional; defaults apply when missing)
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: std::path::PathBuf,

    /// Pause before the computer moves, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Seed for the computer's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Make hard difficulty play perfectly (no beatable opening)
    #[arg(long)]
    pub no_trap: bool,

    /// Skip the mode menu: two-player or single-player
    #[arg(long)]
    pub mode: Option<ModeChoice>,

    /// Skip the difficulty menu: easy, medium or hard
    #[arg(long)]
    pub difficulty: Option<Difficulty>,
}

impl Cli {
    /// Applies command-line overrides on top of `config`.
    pub fn apply_overrides(&self, config: PlayConfig) -> PlayConfig {
        let mut computer = config.computer().clone();
        if let Some(delay_ms) = self.delay_ms {
            computer = computer.with_delay_ms(delay_ms);
        }
        if let Some(seed) = self.seed {
            computer = computer.with_seed(Some(seed));
        }
        if self.no_trap {
            computer = computer.with_hard_trap(false);
        }
        debug!(?computer, "Effective computer settings");
        config.with_computer(computer)
    }

    /// Table to start from, skipping whichever menus the flags answer.
    ///
    /// `--difficulty` alone implies single player. A difficulty given with
    /// `--mode two-player` is ignored.
    pub fn initial_table(&self) -> Table {
        match (self.mode, self.difficulty) {
            (Some(ModeChoice::TwoPlayer), difficulty) => {
                if difficulty.is_some() {
                    warn!("--difficulty has no effect in two player mode");
                }
                Table::new_game(GameMode::TwoPlayer)
            }
            (Some(ModeChoice::SinglePlayer) | None, Some(difficulty)) => {
                Table::new_game(GameMode::SinglePlayer(difficulty))
            }
            (Some(ModeChoice::SinglePlayer), None) => Table::AwaitingDifficulty,
            (None, None) => Table::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strictly_noughts::Phase;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(std::iter::once("noughts").chain(args.iter().copied()))
    }

    #[test]
    fn test_no_flags_starts_at_menu() {
        let cli = parse(&[]);
        assert_eq!(cli.config, std::path::PathBuf::from("noughts.toml"));
        assert_eq!(cli.initial_table().phase(), Phase::AwaitingMode);
    }

    #[test]
    fn test_mode_and_difficulty_skip_menus() {
        let cli = parse(&["--mode", "single-player", "--difficulty", "hard"]);
        assert_eq!(
            cli.initial_table().mode(),
            Some(GameMode::SinglePlayer(Difficulty::Hard))
        );

        let cli = parse(&["--mode", "single-player"]);
        assert_eq!(cli.initial_table(), Table::AwaitingDifficulty);

        let cli = parse(&["--difficulty", "easy"]);
        assert_eq!(
            cli.initial_table().mode(),
            Some(GameMode::SinglePlayer(Difficulty::Easy))
        );

        let cli = parse(&["--mode", "two-player", "--difficulty", "easy"]);
        assert_eq!(cli.initial_table().mode(), Some(GameMode::TwoPlayer));
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let cli = parse(&["--delay-ms", "0", "--seed", "5", "--no-trap"]);
        let config = cli.apply_overrides(PlayConfig::default());
        assert_eq!(*config.computer().delay_ms(), 0);
        assert_eq!(*config.computer().seed(), Some(5));
        assert!(!*config.computer().hard_trap());
    }

    #[test]
    fn test_absent_flags_keep_file_values() {
        let cli = parse(&[]);
        let config = cli.apply_overrides(PlayConfig::default());
        assert_eq!(config, PlayConfig::default());
    }

    #[test]
    fn test_bad_difficulty_rejected() {
        let result = Cli::try_parse_from(["noughts", "--difficulty", "impossible"]);
        assert!(result.is_err());
    }
}
