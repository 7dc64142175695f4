//! Ocean tic-tac-toe library.
//!
//! A tic-tac-toe session for two humans or a human against a computer
//! that answers with a random legal move after a short delay.
//!
//! # Architecture
//!
//! - **Rules**: pure win/draw/move functions, re-exported from `ocean_rules`
//! - **Session**: the game state machine and the history of finished games
//! - **Controller**: runs a session on one task and plays the delayed
//!   computer reply, cancelling it whenever the session changes
//! - **Config**: TOML settings for delay, starting mode and theme
//!
//! # Example
//!
//! ```
//! use ocean_tictactoe::{Mode, Outcome, Session, Theme};
//!
//! let mut session = Session::new(Mode::PlayerVsPlayer, Theme::Light);
//! for index in [0, 3, 1, 4, 2] {
//!     session.submit_move(index).unwrap();
//! }
//! assert!(matches!(session.outcome(), Outcome::Win(_)));
//! assert_eq!(session.history().len(), 1);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod controller;
mod session;
mod theme;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Controller runtime
pub use controller::{ControllerError, SessionController, SessionHandle};

// Crate-level exports - Session state machine
pub use session::{
    ComputerTurn, GameHistory, GameRecord, GameResult, HistoryTally, Mode, MoveRejection,
    MoveResult, Outcome, ParseGameResultError, ParseModeError, Session, Status, Transition,
};

// Crate-level exports - Theme
pub use theme::{ParseThemeError, Theme};

// Crate-level exports - Rules engine
pub use ocean_rules::{
    Board, Line, Mark, Position, Square, Win, evaluate_winner, is_draw, is_valid_move,
    select_random_move, select_random_move_with,
};
