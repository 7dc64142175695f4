//! Win detection logic for tic-tac-toe.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{Board, LINES, Line, Mark, Square};

/// A completed line and the mark that completed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Win {
    mark: Mark,
    line: Line,
}

impl Win {
    /// Creates a win record.
    pub fn new(mark: Mark, line: Line) -> Self {
        Self { mark, line }
    }

    /// The winning mark.
    pub fn mark(&self) -> Mark {
        self.mark
    }

    /// The completed line.
    pub fn line(&self) -> Line {
        self.line
    }
}

/// Finds the first complete line on the board.
///
/// Lines are scanned in [`LINES`] order, so when a constructed board has
/// several complete lines the earliest one is reported.
#[instrument(skip(board), fields(board = %board))]
pub fn evaluate_winner(board: &Board) -> Option<Win> {
    LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.positions();
        match board.square(a) {
            Square::Occupied(mark)
                if board.square(b) == Square::Occupied(mark)
                    && board.square(c) == Square::Occupied(mark) =>
            {
                Some(Win::new(mark, line))
            }
            _ => None,
        }
    })
}
