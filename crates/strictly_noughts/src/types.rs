//! Core domain types: marks, squares and the board.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum Mark {
    /// Moves first. The human seat in single player.
    #[display("X")]
    X,
    /// Moves second. The computer seat in single player.
    #[display("O")]
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Holds a mark. Never reverts to empty during play.
    Occupied(Mark),
}

impl Square {
    /// Returns the occupying mark, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 board snapshot.
///
/// Boards are small `Copy` values. Search code places marks on its own
/// copies, so a snapshot handed to a strategy is never disturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares in row-major order.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Returns the square at `pos`.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.index()]
    }

    /// Returns true if nobody has played at `pos`.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares in row-major order.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL
            .into_iter()
            .filter(move |pos| self.is_empty(*pos))
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Copy of this board with `mark` placed at `pos`, no legality checks.
    ///
    /// Callers outside this crate go through [`crate::apply_move`].
    pub(crate) fn with(mut self, pos: Position, mark: Mark) -> Self {
        self.squares[pos.index()] = Square::Occupied(mark);
        self
    }

    /// Overwrites a square. Test-only hook for corrupting state.
    #[cfg(test)]
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.index()] = square;
    }

    /// Formats the board as a text grid; empty squares show their 1-based number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                match self.squares[idx] {
                    Square::Empty => result.push_str(&(idx + 1).to_string()),
                    Square::Occupied(mark) => result.push_str(&mark.to_string()),
                }
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

/// Failure parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// Wrong number of squares.
    #[display("expected 9 squares, found {_0}")]
    Length(usize),
    /// A character other than `X`, `O`, `.`, `_` or `-`.
    #[display("unexpected square symbol {_0:?}")]
    Symbol(char),
}

impl std::error::Error for BoardParseError {}

impl std::str::FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine symbols in row-major order, ignoring whitespace and `|`.
    ///
    /// `X`/`O` are marks; `.`, `_` and `-` are empty squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '|')
            .collect();
        if symbols.len() != 9 {
            return Err(BoardParseError::Length(symbols.len()));
        }
        let mut squares = [Square::Empty; 9];
        for (square, symbol) in squares.iter_mut().zip(symbols) {
            *square = match symbol.to_ascii_uppercase() {
                'X' => Square::Occupied(Mark::X),
                'O' => Square::Occupied(Mark::O),
                '.' | '_' | '-' => Square::Empty,
                other => return Err(BoardParseError::Symbol(other)),
            };
        }
        Ok(Self { squares })
    }
}
