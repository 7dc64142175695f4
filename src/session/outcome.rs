//! Game outcome, move transitions and rejection reasons.

use derive_more::{Display, Error};
use ocean_rules::{Line, Mark, Position, Win};
use serde::{Deserialize, Serialize};

/// Status of the current game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Empty squares remain and no line is complete.
    #[default]
    InProgress,
    /// A line was completed.
    Win(Win),
    /// The board filled with no line.
    Draw,
}

impl Outcome {
    /// True once the game has ended.
    pub fn is_over(&self) -> bool {
        !matches!(self, Self::InProgress)
    }

    /// The completed line, if the game was won.
    pub fn winning_line(&self) -> Option<Line> {
        match self {
            Self::Win(win) => Some(win.line()),
            _ => None,
        }
    }
}

/// What an accepted move did to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The game goes on; `next` moves now.
    Continued {
        /// Mark to move next.
        next: Mark,
    },
    /// The move completed a line.
    Won(Win),
    /// The move filled the board without a line.
    Drawn,
}

/// Why a move was ignored. The session is unchanged whenever one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum MoveRejection {
    /// The game already ended.
    #[display("Game is already over")]
    GameOver,
    /// The index is not 0-8.
    #[display("Position {} is off the board", _0)]
    OutOfRange(#[error(not(source))] usize),
    /// Somebody already played there.
    #[display("{} is already occupied", _0)]
    Occupied(#[error(not(source))] Position),
    /// A human tried to move for the computer.
    #[display("It's the computer's turn")]
    ComputerTurn,
    /// The computer turn token belongs to an earlier state.
    #[display("Computer turn no longer applies")]
    StaleTurn,
    /// No empty square is left for the computer.
    #[display("No legal moves remain")]
    NoLegalMove,
}

/// Result of submitting a move.
pub type MoveResult = Result<Transition, MoveRejection>;
