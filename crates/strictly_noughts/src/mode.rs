//! Game mode and difficulty selection.

use super::Mark;
use serde::{Deserialize, Serialize};

/// Computer strength in single player.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random moves.
    Easy,
    /// Wins when it can, blocks when it must, otherwise random.
    Medium,
    /// Full game-tree search.
    Hard,
}

impl Difficulty {
    /// Returns display name.
    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Who sits across the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Two humans share the board.
    TwoPlayer,
    /// Human plays X, the computer plays O at the given difficulty.
    SinglePlayer(Difficulty),
}

impl GameMode {
    /// Mark played by the computer, if there is one.
    pub fn computer_mark(&self) -> Option<Mark> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::SinglePlayer(_) => Some(Mark::O),
        }
    }

    /// Difficulty of the computer opponent, if there is one.
    pub fn difficulty(&self) -> Option<Difficulty> {
        match self {
            GameMode::TwoPlayer => None,
            GameMode::SinglePlayer(difficulty) => Some(*difficulty),
        }
    }

    /// Returns true if `mark` is played by the computer in this mode.
    pub fn is_computer(&self, mark: Mark) -> bool {
        self.computer_mark() == Some(mark)
    }

    /// Returns display name.
    pub fn name(&self) -> String {
        match self {
            GameMode::TwoPlayer => "Two players".to_string(),
            GameMode::SinglePlayer(difficulty) => format!("Vs computer ({})", difficulty.name()),
        }
    }
}

/// Mode picked from the top-level menu, before any difficulty.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumString,
    strum::Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum ModeChoice {
    /// Two humans.
    TwoPlayer,
    /// Human against the computer; a difficulty is chosen next.
    SinglePlayer,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_computer_seat() {
        assert_eq!(GameMode::TwoPlayer.computer_mark(), None);
        let single = GameMode::SinglePlayer(Difficulty::Hard);
        assert_eq!(single.computer_mark(), Some(Mark::O));
        assert!(single.is_computer(Mark::O));
        assert!(!single.is_computer(Mark::X));
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!("Medium".parse::<Difficulty>().unwrap(), Difficulty::Medium);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_parse_mode_choice() {
        assert_eq!(
            "single-player".parse::<ModeChoice>().unwrap(),
            ModeChoice::SinglePlayer
        );
        assert_eq!(ModeChoice::TwoPlayer.to_string(), "two-player");
    }
}
