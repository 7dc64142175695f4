//! Stateless rendering of the session.

use chrono::Local;
use ocean_tictactoe::{GameResult, Line, Mark, Position, Session, Square, Theme};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line as TextLine, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use super::ViewState;

/// Colors for one theme.
struct Palette {
    base: Style,
    accent: Color,
    dim: Color,
    x: Color,
    o: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                base: Style::default().fg(Color::Black).bg(Color::White),
                accent: Color::Blue,
                dim: Color::Gray,
                x: Color::Blue,
                o: Color::Red,
                highlight: Color::LightGreen,
            },
            Theme::Dark => Self {
                base: Style::default().fg(Color::White).bg(Color::Black),
                accent: Color::Cyan,
                dim: Color::DarkGray,
                x: Color::LightBlue,
                o: Color::LightRed,
                highlight: Color::Green,
            },
        }
    }
}

/// Draws the whole screen.
pub fn draw(frame: &mut Frame, session: &Session, view: &ViewState) {
    let palette = Palette::for_theme(session.theme());
    let area = frame.area();
    frame.render_widget(Block::default().style(palette.base), area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Title
            Constraint::Length(3),  // Status
            Constraint::Length(11), // Board
            Constraint::Length(3),  // Controls
            Constraint::Min(4),     // History
            Constraint::Length(3),  // Help
        ])
        .split(area);

    draw_title(frame, chunks[0], &palette);
    draw_status(frame, chunks[1], session, view, &palette);
    draw_board(frame, chunks[2], session, view.cursor, &palette);
    draw_controls(frame, chunks[3], session, &palette);
    draw_history(frame, chunks[4], session, &palette);
    draw_help(frame, chunks[5], &palette);
}

fn draw_title(frame: &mut Frame, area: Rect, palette: &Palette) {
    let title = Paragraph::new(Text::from(vec![
        TextLine::from(Span::styled(
            "Tic-Tac-Toe",
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(Span::styled(
            "Ocean Professional Edition",
            Style::default().fg(palette.dim),
        )),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(title, area);
}

fn draw_status(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    view: &ViewState,
    palette: &Palette,
) {
    let mut style = Style::default().add_modifier(Modifier::BOLD);
    if session.outcome().is_over() {
        style = style.fg(palette.highlight);
    }
    let mut spans = vec![Span::styled(session.status().to_string(), style)];
    if let Some(notice) = &view.notice {
        spans.push(Span::styled(
            format!("  ({notice})"),
            Style::default().fg(palette.dim),
        ));
    }
    let status = Paragraph::new(TextLine::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn draw_board(
    frame: &mut Frame,
    area: Rect,
    session: &Session,
    cursor: Position,
    palette: &Palette,
) {
    let board_area = center_rect(area, 41, 11);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(board_area);

    let winning_line = session.winning_line();
    for row in 0..3 {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(13),
                Constraint::Length(1),
                Constraint::Length(13),
                Constraint::Length(1),
                Constraint::Length(13),
            ])
            .split(rows[row * 2]);

        for column in 0..3 {
            if let Some(pos) = Position::from_row_column(row, column) {
                let cell = Cell {
                    square: session.board().square(pos),
                    pos,
                    selected: pos == cursor,
                    winning: winning_line.is_some_and(|line: Line| line.contains(pos)),
                };
                draw_cell(frame, cols[column * 2], cell, palette);
            }
            if column < 2 {
                let sep = Paragraph::new("│\n│\n│").style(Style::default().fg(palette.dim));
                frame.render_widget(sep, cols[column * 2 + 1]);
            }
        }

        if row < 2 {
            let sep = Paragraph::new("─".repeat(board_area.width as usize))
                .style(Style::default().fg(palette.dim));
            frame.render_widget(sep, rows[row * 2 + 1]);
        }
    }
}

struct Cell {
    square: Square,
    pos: Position,
    selected: bool,
    winning: bool,
}

fn draw_cell(frame: &mut Frame, area: Rect, cell: Cell, palette: &Palette) {
    let (symbol, mut style) = match cell.square {
        Square::Empty => (
            (cell.pos.to_index() + 1).to_string(),
            Style::default().fg(palette.dim),
        ),
        Square::Occupied(Mark::X) => (
            "X".to_string(),
            Style::default().fg(palette.x).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Mark::O) => (
            "O".to_string(),
            Style::default().fg(palette.o).add_modifier(Modifier::BOLD),
        ),
    };
    if cell.winning {
        style = style.bg(palette.highlight);
    }
    if cell.selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let paragraph = Paragraph::new(Text::from(vec![
        TextLine::from(""),
        TextLine::from(Span::styled(format!("  {symbol}  "), style)),
    ]))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_controls(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let lock = if session.can_change_mode() {
        Span::styled("[M] switch", Style::default().fg(palette.accent))
    } else {
        Span::styled("locked during game", Style::default().fg(palette.dim))
    };
    let controls = Paragraph::new(TextLine::from(vec![
        Span::raw("Game Mode: "),
        Span::styled(
            session.mode().label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        lock,
        Span::raw(format!("   Theme: {}", session.theme())),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(controls, area);
}

fn draw_history(frame: &mut Frame, area: Rect, session: &Session, palette: &Palette) {
    let history = session.history();
    let tally = history.tally();
    let block = Block::default().borders(Borders::ALL).title(format!(
        "Game History  (X {} / O {} / draws {})",
        tally.x_wins, tally.o_wins, tally.draws
    ));

    if history.is_empty() {
        let empty = Paragraph::new("No games played yet. Start a new game!")
            .style(Style::default().fg(palette.dim))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let result = match record.result() {
                GameResult::Winner(Mark::X) => {
                    Span::styled("Winner: X", Style::default().fg(palette.x))
                }
                GameResult::Winner(Mark::O) => {
                    Span::styled("Winner: O", Style::default().fg(palette.o))
                }
                GameResult::Draw => Span::styled("Draw", Style::default().fg(palette.dim)),
            };
            let played_at = record
                .played_at()
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S");
            ListItem::new(TextLine::from(vec![
                Span::styled(
                    format!(
                        "Game #{:<3} ",
                        history.game_number(index).unwrap_or_default()
                    ),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(format!("{played_at}  ")),
                result,
                Span::raw(format!("  Moves: {}  {}", record.moves(), record.mode())),
            ]))
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let help = Paragraph::new(
        "1-9 / arrows+Enter: move | N: new game | R: reset history | M: mode | T: theme | Q: quit",
    )
    .style(Style::default().fg(palette.dim))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
