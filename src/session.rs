//! Session state machine: one board, its mode and the game history.
//!
//! [`Session`] is a plain value. Every operation is synchronous and
//! deterministic given its inputs; the delayed computer reply is
//! expressed as a [`ComputerTurn`] token that the caller redeems later
//! (see [`crate::SessionController`]).

mod history;
mod mode;
mod outcome;

pub use history::{GameHistory, GameRecord, GameResult, HistoryTally, ParseGameResultError};
pub use mode::{Mode, ParseModeError};
pub use outcome::{MoveRejection, MoveResult, Outcome, Transition};

use chrono::Utc;
use derive_more::Display;
use ocean_rules::{Board, Line, Mark, Position, evaluate_winner, is_draw, select_random_move_with};
use rand::Rng;
use tracing::{debug, info, instrument, warn};

use crate::Theme;

/// Permission for the computer to move in one specific session state.
///
/// Issued by [`Session::pending_computer_turn`]. Any later change to the
/// session invalidates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ComputerTurn {
    generation: u64,
}

impl ComputerTurn {
    /// Session generation this turn was issued for.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// One-line status for the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Status {
    /// The game was drawn.
    #[display("Draw")]
    Draw,
    /// A mark won.
    #[display("Winner: {}", _0)]
    Winner(Mark),
    /// Waiting on the delayed computer reply.
    #[display("Computer is thinking...")]
    ComputerThinking,
    /// A human is to move.
    #[display("Current player: {}", _0)]
    CurrentPlayer(Mark),
}

/// Mutable state of one game plus its mode, theme and history.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    board: Board,
    active_mark: Mark,
    mode: Mode,
    outcome: Outcome,
    move_count: u32,
    history: GameHistory,
    game_active: bool,
    theme: Theme,
    generation: u64,
}

impl Session {
    /// Creates a session with an empty board and X to move.
    #[instrument]
    pub fn new(mode: Mode, theme: Theme) -> Self {
        info!("Creating new session");
        Self {
            board: Board::new(),
            active_mark: Mark::X,
            mode,
            outcome: Outcome::InProgress,
            move_count: 0,
            history: GameHistory::new(),
            game_active: false,
            theme,
            generation: 0,
        }
    }

    /// Current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark to move (or the mark that made the final move once the game is over).
    pub fn active_mark(&self) -> Mark {
        self.active_mark
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current outcome.
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// The completed line when the game was won.
    pub fn winning_line(&self) -> Option<Line> {
        self.outcome.winning_line()
    }

    /// Moves accepted in the current game.
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// Finished games, most recent first.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// True between the first accepted move and the end of the game.
    pub fn game_active(&self) -> bool {
        self.game_active
    }

    /// Current theme.
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Counter bumped by every change to game state.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Mode switching is only offered while no game is under way.
    pub fn can_change_mode(&self) -> bool {
        !self.game_active
    }

    /// Status line derived from outcome, mode and turn.
    pub fn status(&self) -> Status {
        match self.outcome {
            Outcome::Draw => Status::Draw,
            Outcome::Win(win) => Status::Winner(win.mark()),
            Outcome::InProgress if self.is_computer_to_move() => Status::ComputerThinking,
            Outcome::InProgress => Status::CurrentPlayer(self.active_mark),
        }
    }

    fn is_computer_to_move(&self) -> bool {
        self.mode.computer_mark() == Some(self.active_mark)
    }

    /// Places the active mark at `index` on behalf of a human.
    ///
    /// Rejected without any change when the game is over, the index is
    /// off the board, the square is taken, or the computer is to move.
    #[instrument(skip(self), fields(mark = %self.active_mark, mode = %self.mode))]
    pub fn submit_move(&mut self, index: usize) -> MoveResult {
        if self.outcome.is_over() {
            debug!("Rejected move: game over");
            return Err(MoveRejection::GameOver);
        }
        let Some(pos) = Position::from_index(index) else {
            debug!("Rejected move: off the board");
            return Err(MoveRejection::OutOfRange(index));
        };
        if !self.board.is_empty(pos) {
            debug!(position = %pos, "Rejected move: occupied");
            return Err(MoveRejection::Occupied(pos));
        }
        if self.is_computer_to_move() {
            debug!("Rejected move: computer's turn");
            return Err(MoveRejection::ComputerTurn);
        }
        Ok(self.place(pos))
    }

    /// True when the computer owes a reply: computer mode, O to move,
    /// game under way and started.
    pub fn awaiting_computer(&self) -> bool {
        self.is_computer_to_move() && !self.outcome.is_over() && self.game_active
    }

    /// Token for the computer's next move, if one is due.
    pub fn pending_computer_turn(&self) -> Option<ComputerTurn> {
        self.awaiting_computer().then_some(ComputerTurn {
            generation: self.generation,
        })
    }

    /// Plays a uniformly random legal move for the computer.
    ///
    /// The token must come from [`Session::pending_computer_turn`] on this
    /// exact state; if anything changed since, the move is rejected as stale.
    #[instrument(skip(self, turn, rng), fields(turn = turn.generation, current = self.generation))]
    pub fn play_computer_turn<R: Rng + ?Sized>(
        &mut self,
        turn: ComputerTurn,
        rng: &mut R,
    ) -> MoveResult {
        if turn.generation != self.generation || !self.awaiting_computer() {
            debug!("Dropping stale computer turn");
            return Err(MoveRejection::StaleTurn);
        }
        let pos = select_random_move_with(&self.board, rng)
            .and_then(Position::from_index)
            .ok_or(MoveRejection::NoLegalMove)?;
        info!(position = %pos, "Computer plays");
        Ok(self.place(pos))
    }

    /// Writes the active mark, then settles win, draw or turn change.
    fn place(&mut self, pos: Position) -> Transition {
        let mark = self.active_mark;
        self.board.place(pos, mark);
        self.move_count += 1;
        self.game_active = true;
        self.generation += 1;
        info!(%mark, position = %pos, move_count = self.move_count, "Move applied");

        if let Some(win) = evaluate_winner(&self.board) {
            self.outcome = Outcome::Win(win);
            self.finish(GameResult::Winner(win.mark()));
            return Transition::Won(win);
        }

        if is_draw(&self.board) {
            self.outcome = Outcome::Draw;
            self.finish(GameResult::Draw);
            return Transition::Drawn;
        }

        self.active_mark = mark.opponent();
        Transition::Continued {
            next: self.active_mark,
        }
    }

    fn finish(&mut self, result: GameResult) {
        info!(%result, moves = self.move_count, "Game over");
        self.history.record(GameRecord::new(
            result,
            self.move_count,
            Utc::now(),
            self.mode.label().to_string(),
        ));
        self.game_active = false;
    }

    /// Clears the board for a fresh game. History is kept.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!("Starting new game");
        self.board = Board::new();
        self.active_mark = Mark::X;
        self.outcome = Outcome::InProgress;
        self.move_count = 0;
        self.game_active = false;
        self.generation += 1;
    }

    /// Empties the history and starts a new game.
    #[instrument(skip(self))]
    pub fn reset_history(&mut self) {
        info!(cleared = self.history.len(), "Resetting history");
        self.history.clear();
        self.new_game();
    }

    /// Sets the mode and starts a new game, even mid-game.
    #[instrument(skip(self), fields(from = %self.mode))]
    pub fn change_mode(&mut self, mode: Mode) {
        if self.game_active {
            warn!("Mode changed while a game was active; abandoning it");
        }
        self.mode = mode;
        self.new_game();
    }

    /// Flips the theme. Game state is untouched.
    #[instrument(skip(self))]
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggle();
        self.theme
    }

    /// Sets the theme. Game state is untouched.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Mode::default(), Theme::default())
    }
}
