//! Named board positions.
//!
//! Squares are numbered 0-8 in row-major order. Presentation layers
//! usually hand us a raw index; [`Position::from_index`] is the only
//! way in, so everything past the boundary works with a checked value.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// One of the nine squares on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::EnumIter,
)]
pub enum Position {
    /// Index 0.
    TopLeft,
    /// Index 1.
    TopCenter,
    /// Index 2.
    TopRight,
    /// Index 3.
    MiddleLeft,
    /// Index 4.
    Center,
    /// Index 5.
    MiddleRight,
    /// Index 6.
    BottomLeft,
    /// Index 7.
    BottomCenter,
    /// Index 8.
    BottomRight,
}

/// The eight three-in-a-row lines, checked in this order.
pub const LINES: [[Position; 3]; 8] = {
    use Position::*;
    [
        // Rows
        [TopLeft, TopCenter, TopRight],
        [MiddleLeft, Center, MiddleRight],
        [BottomLeft, BottomCenter, BottomRight],
        // Columns
        [TopLeft, MiddleLeft, BottomLeft],
        [TopCenter, Center, BottomCenter],
        [TopRight, MiddleRight, BottomRight],
        // Diagonals
        [TopLeft, Center, BottomRight],
        [TopRight, Center, BottomLeft],
    ]
};

impl Position {
    /// All positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// The four corner squares.
    pub const CORNERS: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Row-major index of this square (0-8).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a raw index, rejecting anything outside 0-8.
    #[instrument]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Human-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Returns true for the four corner squares.
    pub fn is_corner(self) -> bool {
        Self::CORNERS.contains(&self)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.label(), self.index())
    }
}
