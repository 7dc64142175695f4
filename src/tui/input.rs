//! Keyboard mapping and cursor movement.

use crossterm::event::KeyCode;
use ocean_tictactoe::Position;

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Place at a specific square.
    Place(Position),
    /// Place at the cursor.
    PlaceAtCursor,
    /// Move the cursor.
    MoveCursor(KeyCode),
    /// Start a new game.
    NewGame,
    /// Clear history and start a new game.
    ResetHistory,
    /// Switch between two-player and computer modes.
    SwitchMode,
    /// Flip light/dark.
    ToggleTheme,
    /// Leave the UI.
    Quit,
    /// Unbound key.
    Ignore,
}

/// Maps a key to an action. Digits 1-9 address squares 0-8.
pub fn action_for(key: KeyCode) -> Action {
    match key {
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|digit| Position::from_index(digit as usize - 1))
            .map_or(Action::Ignore, Action::Place),
        KeyCode::Enter | KeyCode::Char(' ') => Action::PlaceAtCursor,
        KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => Action::MoveCursor(key),
        KeyCode::Char('n') | KeyCode::Char('N') => Action::NewGame,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::ResetHistory,
        KeyCode::Char('m') | KeyCode::Char('M') => Action::SwitchMode,
        KeyCode::Char('t') | KeyCode::Char('T') => Action::ToggleTheme,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        _ => Action::Ignore,
    }
}

/// Moves the cursor one square; stays put at the board edge.
pub fn move_cursor(cursor: Position, key: KeyCode) -> Position {
    let (row, column) = (cursor.row(), cursor.column());
    let target = match key {
        KeyCode::Up => row.checked_sub(1).map(|r| (r, column)),
        KeyCode::Down => Some((row + 1, column)),
        KeyCode::Left => column.checked_sub(1).map(|c| (row, c)),
        KeyCode::Right => Some((row, column + 1)),
        _ => None,
    };
    target
        .and_then(|(r, c)| Position::from_row_column(r, c))
        .unwrap_or(cursor)
}
