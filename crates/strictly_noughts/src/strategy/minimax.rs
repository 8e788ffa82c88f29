//! Hard: exhaustive minimax with alpha-beta pruning.
//!
//! Scores are from the searching mark's point of view. A win scores
//! `WIN_SCORE - depth` and a loss `depth - WIN_SCORE`, where depth counts
//! plies after the root move. The search therefore prefers the fastest
//! win and the slowest loss.

use super::StrategyError;
use crate::rules::evaluate;
use crate::{Board, Mark, Outcome, Position};
use tracing::{debug, instrument};

/// Score of a win found immediately after the root move.
pub const WIN_SCORE: i32 = 10;

/// Exact minimax score for every empty square, in index order.
///
/// Each root move is searched with a full window, so the values are exact
/// rather than bounds.
pub fn move_scores(board: &Board, me: Mark) -> Vec<(Position, i32)> {
    board
        .empty_positions()
        .map(|pos| {
            let score = minimax(board.with(pos, me), 0, false, me, i32::MIN, i32::MAX);
            (pos, score)
        })
        .collect()
}

/// Hard difficulty: the best square for `me`.
///
/// Ties go to the lowest index. Root moves after the first are searched
/// with the best score so far as the lower bound; a move that cannot beat
/// it only needs to be shown no better, which preserves the tie rule.
///
/// # Errors
///
/// [`StrategyError::NoLegalMove`] if the board is full.
#[instrument(skip(board), fields(occupied = board.occupied_count()))]
pub fn choose_optimal(board: &Board, me: Mark) -> Result<Position, StrategyError> {
    let mut best: Option<(Position, i32)> = None;
    for pos in board.empty_positions() {
        let floor = best.map_or(i32::MIN, |(_, score)| score);
        let score = minimax(board.with(pos, me), 0, false, me, floor, i32::MAX);
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pos, score));
        }
    }
    let (pos, score) = best.ok_or(StrategyError::NoLegalMove)?;
    debug!(position = %pos, score, "Search complete");
    Ok(pos)
}

/// Scores `board` with `maximizing` telling whose ply it is.
fn minimax(
    board: Board,
    depth: i32,
    maximizing: bool,
    me: Mark,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    match evaluate(&board) {
        Outcome::Win(mark) if mark == me => return WIN_SCORE - depth,
        Outcome::Win(_) => return depth - WIN_SCORE,
        Outcome::Draw => return 0,
        Outcome::InProgress => {}
    }

    let mark = if maximizing { me } else { me.opponent() };
    let mut best = if maximizing { i32::MIN } else { i32::MAX };
    for pos in board.empty_positions() {
        let score = minimax(board.with(pos, mark), depth + 1, !maximizing, me, alpha, beta);
        if maximizing {
            best = best.max(score);
            alpha = alpha.max(best);
        } else {
            best = best.min(score);
            beta = beta.min(best);
        }
        if alpha >= beta {
            break;
        }
    }
    best
}
