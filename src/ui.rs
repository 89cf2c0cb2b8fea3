use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::widgets::candidate_line;

/// Color palette for the TUI.
pub mod colors {
    use ratatui::style::Color;

    pub const PROMPT: Color = Color::Cyan;
    pub const QUERY: Color = Color::White;
    pub const CURSOR: Color = Color::Cyan;
    pub const CANDIDATE: Color = Color::Reset;
    pub const SELECTED: Color = Color::White;
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 60);
    pub const MATCH: Color = Color::Yellow;
    pub const COUNT: Color = Color::DarkGray;
    pub const ERROR: Color = Color::Red;
}

/// Prompt in front of the query.
pub const PROMPT: &str = "> ";

/// Rows that never show candidates: the query line.
pub const RESERVED_ROWS: u16 = 1;

/// Number of candidate rows a terminal of `height` rows can show.
pub fn list_rows(height: u16) -> usize {
    height.saturating_sub(RESERVED_ROWS) as usize
}

/// Main render function called from the event loop.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    //   [query line ........ status]
    //   [candidates]
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let status = status(app);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(status.width().min(u16::MAX as usize) as u16),
        ])
        .split(outer[0]);

    render_query(frame, app, top[0]);
    frame.render_widget(Paragraph::new(status), top[1]);
    render_candidates(frame, app, outer[1]);
}

/// Render the prompt and query, and park the terminal cursor after it.
fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            PROMPT,
            Style::default()
                .fg(colors::PROMPT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.query(), Style::default().fg(colors::QUERY)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    if area.width == 0 || area.height == 0 {
        return;
    }
    let offset = PROMPT.width() + app.query().width();
    let x = area
        .x
        .saturating_add(offset.min(u16::MAX as usize) as u16)
        .min(area.right() - 1);
    frame.set_cursor_position(Position::new(x, area.y));
}

/// Render the filtered candidates, marking the selected one.
fn render_candidates(frame: &mut Frame, app: &App, area: Rect) {
    let query = app.query();
    let lines: Vec<Line> = app
        .visible()
        .take(area.height as usize)
        .enumerate()
        .map(|(i, name)| candidate_line(name, query, i == app.selection()))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Right-hand end of the query line: match count, or the last error.
fn status(app: &App) -> Line<'static> {
    match &app.status {
        Some(message) => Line::from(Span::styled(
            format!(" {message}"),
            Style::default()
                .fg(colors::ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        None => Line::from(Span::styled(
            format!(" {}/{}", app.filtered_len(), app.total()),
            Style::default().fg(colors::COUNT),
        )),
    }
}
