//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](crate::Board) snapshot. None of them
//! can fail: every function is total over a 9-square board and any index.

pub mod draw;
pub mod moves;
pub mod win;

pub use draw::{is_draw, is_full};
pub use moves::{empty_indices, is_valid_move, select_random_move, select_random_move_with};
pub use win::{Win, evaluate_winner};
