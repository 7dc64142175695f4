//! Core domain types for tic-tac-toe.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::Position;

/// A player's symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Mark {
    /// X (always moves first).
    X,
    /// O.
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

/// A cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Nobody has played here.
    #[default]
    Empty,
    /// Holds a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }

    /// True when no mark has been placed.
    pub fn is_empty(self) -> bool {
        self == Square::Empty
    }

    fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Mark::X) => 'X',
            Square::Occupied(Mark::O) => 'O',
        }
    }
}

/// 3x3 board, squares in row-major order (0-8).
///
/// Marks can only be added through [`Board::place`], which refuses
/// occupied squares. Clearing a board means building a new one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates an empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from raw squares.
    ///
    /// Meant for constructing arbitrary positions (including ones that
    /// legal play can never reach).
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at `index`, or `None` when out of range.
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Gets the square at a position.
    pub fn square(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if the square at a position is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.square(pos).is_empty()
    }

    /// Places `mark` at `pos`.
    ///
    /// Returns `false` without touching the board if the square is taken.
    #[instrument(skip(self))]
    pub fn place(&mut self, pos: Position, mark: Mark) -> bool {
        let square = &mut self.squares[pos.to_index()];
        if !square.is_empty() {
            return false;
        }
        *square = Square::Occupied(mark);
        true
    }

    /// Returns all squares.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding a mark.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| !s.is_empty()).count()
    }
}

/// Renders the board as `XO./.X./..O`.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                f.write_str("/")?;
            }
            write!(f, "{}", square.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing the text form of a board.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, `.`, `-` or `_`.
    #[display("Unexpected character {:?} in board", _0)]
    UnexpectedChar(#[error(not(source))] char),
    /// The text described a different number of cells.
    #[display("Expected 9 cells, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
}

/// Parses `"XO./.X./..O"`. Whitespace, `/` and `|` are separators and ignored.
impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '/' && *c != '|')
            .map(|c| match c.to_ascii_uppercase() {
                'X' => Ok(Square::Occupied(Mark::X)),
                'O' => Ok(Square::Occupied(Mark::O)),
                '.' | '-' | '_' => Ok(Square::Empty),
                other => Err(BoardParseError::UnexpectedChar(other)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_refuses_occupied_square() {
        let mut board = Board::new();
        assert!(board.place(Position::Center, Mark::X));
        assert!(!board.place(Position::Center, Mark::O));
        assert_eq!(board.square(Position::Center), Square::Occupied(Mark::X));
    }

    #[test]
    fn test_get_out_of_range() {
        let board = Board::new();
        assert_eq!(board.get(8), Some(Square::Empty));
        assert_eq!(board.get(9), None);
    }

    #[test]
    fn test_text_form() {
        let board: Board = "XO. | .X. | ..O".parse().unwrap();
        assert_eq!(board.to_string(), "XO./.X./..O");
        assert_eq!(board.occupied_count(), 4);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XO?/.../...".parse::<Board>(),
            Err(BoardParseError::UnexpectedChar('?'))
        );
        assert_eq!(
            "XO/.../...".parse::<Board>(),
            Err(BoardParseError::WrongLength(8))
        );
    }
}
