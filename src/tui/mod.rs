//! Terminal UI for Ocean tic-tac-toe.

mod input;
mod ui;

use std::io::{self, Stdout};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ocean_tictactoe::{Position, SessionHandle, Transition};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::time::{Duration, sleep};
use tracing::{debug, error, info, instrument};

use input::{Action, action_for, move_cursor};

/// View-only state: nothing here affects the game.
#[derive(Debug)]
pub struct ViewState {
    cursor: Position,
    notice: Option<String>,
}

impl ViewState {
    fn new() -> Self {
        Self {
            cursor: Position::Center,
            notice: None,
        }
    }
}

/// Runs the terminal UI until the player quits.
pub async fn run_tui(handle: SessionHandle) -> Result<()> {
    info!("Starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &handle).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "UI loop error");
    }
    res
}

#[instrument(skip_all)]
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    handle: &SessionHandle,
) -> Result<()> {
    let mut view = ViewState::new();

    loop {
        let session = handle.snapshot();
        terminal.draw(|f| ui::draw(f, &session, &view))?;

        // Short poll keeps the computer's reply showing up promptly.
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            if key.kind == KeyEventKind::Release {
                continue;
            }

            let action = action_for(key.code);
            debug!(?action, "Key pressed");
            match action {
                Action::Quit => {
                    info!("User quit");
                    return Ok(());
                }
                Action::Place(pos) => {
                    view.cursor = pos;
                    view.notice = place(handle, pos).await?;
                }
                Action::PlaceAtCursor => {
                    view.notice = place(handle, view.cursor).await?;
                }
                Action::MoveCursor(code) => {
                    view.cursor = move_cursor(view.cursor, code);
                }
                Action::NewGame => {
                    handle.new_game().await?;
                    view.notice = None;
                }
                Action::ResetHistory => {
                    handle.reset_history().await?;
                    view.notice = Some("History cleared".to_string());
                }
                Action::SwitchMode => {
                    // Mirrors a disabled mode selector while a game is under way.
                    if session.can_change_mode() {
                        let mode = session.mode().toggle();
                        handle.change_mode(mode).await?;
                        view.notice = Some(format!("Mode: {}", mode.label()));
                    } else {
                        view.notice =
                            Some("Finish or restart the game to change mode".to_string());
                    }
                }
                Action::ToggleTheme => {
                    let theme = handle.toggle_theme().await?;
                    view.notice = Some(format!("Theme: {}", theme));
                }
                Action::Ignore => {}
            }
        }

        sleep(Duration::from_millis(10)).await;
    }
}

/// Submits a move and turns the verdict into a notice for the status bar.
async fn place(handle: &SessionHandle, pos: Position) -> Result<Option<String>> {
    let notice = match handle.submit_move(pos.to_index()).await? {
        Ok(Transition::Continued { .. }) => None,
        Ok(Transition::Won(win)) => Some(format!(
            "{} wins on {:?}",
            win.mark(),
            win.line().indices()
        )),
        Ok(Transition::Drawn) => Some("Board full".to_string()),
        Err(rejection) => Some(rejection.to_string()),
    };
    Ok(notice)
}
