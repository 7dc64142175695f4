//! Pure tic-tac-toe rules.
//!
//! Everything in this crate is a total function over a 9-cell board:
//! win detection in a fixed scan order, draw detection, move validation
//! and uniform random move selection for the computer player.
//!
//! # Example
//!
//! ```
//! use ocean_rules::{Board, Mark, evaluate_winner, is_draw};
//!
//! let board: Board = "XXX/OO./...".parse().unwrap();
//! let win = evaluate_winner(&board).unwrap();
//! assert_eq!(win.mark(), Mark::X);
//! assert_eq!(win.line().indices(), [0, 1, 2]);
//! assert!(!is_draw(&board));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod line;
mod position;
mod types;

pub mod rules;

pub use line::{LINES, Line};
pub use position::Position;
pub use rules::{
    Win, empty_indices, evaluate_winner, is_draw, is_full, is_valid_move, select_random_move,
    select_random_move_with,
};
pub use types::{Board, BoardParseError, Mark, Square};
