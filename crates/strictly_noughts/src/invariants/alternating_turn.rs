//! Marks alternate, X first.

use super::Invariant;
use crate::{GameInProgress, Mark};

/// History alternates X, O, X, ... and the side to move follows on.
pub struct AlternatingTurnInvariant;

impl Invariant<GameInProgress> for AlternatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut expected = Mark::X;
        for mv in game.history() {
            if mv.mark != expected {
                return false;
            }
            expected = expected.opponent();
        }
        game.to_move() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns starting with X"
    }
}
