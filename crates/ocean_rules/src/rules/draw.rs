//! Draw detection logic for tic-tac-toe.

use tracing::instrument;

use super::win::evaluate_winner;
use crate::Board;

/// Checks if the board is full (all squares occupied).
#[instrument(skip(board))]
pub fn is_full(board: &Board) -> bool {
    board.squares().iter().all(|s| !s.is_empty())
}

/// A full board with no complete line.
///
/// A full board that does contain a line is a win, never a draw, so this
/// checks for a winner itself rather than relying on call order.
#[instrument(skip(board), fields(board = %board))]
pub fn is_draw(board: &Board) -> bool {
    is_full(board) && evaluate_winner(board).is_none()
}
