//! Error taxonomy shared by every fallible operation in the crate.

use serde::{Deserialize, Serialize};

/// Coarse classification of a rejected request.
///
/// Every error type in this crate maps onto one of these through a
/// `kind()` method, so callers can branch on the category without
/// matching each variant.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum ErrorKind {
    /// Target square occupied or out of range, or the game is already decided.
    #[display("illegal move")]
    IllegalMove,
    /// Move attempted out of turn or before the game has started.
    #[display("illegal turn")]
    IllegalTurn,
    /// A strategy was asked to move on a full board.
    #[display("no legal move")]
    NoLegalMove,
    /// A postcondition check failed after applying a move.
    #[display("invariant violation")]
    InvariantViolation,
}
