use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app_state::{AppState, Focus};
use crate::dialogue::{format_exchange, DialogueLine};

pub fn draw_ui(f: &mut Frame, app: &mut AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Driver name input
            Constraint::Length(3), // Situation input
            Constraint::Length(3), // Status line
            Constraint::Min(8),    // Exchange panel
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, app, Focus::DriverName, chunks[1]);
    render_input(f, app, Focus::Situation, chunks[2]);
    render_status(f, app, chunks[3]);
    render_exchange(f, app, chunks[4]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "F1 Radio Generator",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" - "),
        Span::styled(
            "driver-engineer radio exchanges",
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_input(f: &mut Frame, app: &AppState, field: Focus, area: Rect) {
    let (textarea, title) = match field {
        Focus::DriverName => (&app.driver_name, "Driver Name"),
        Focus::Situation => (&app.situation, "Situation"),
    };

    let border_style = if app.loading {
        Style::default().fg(Color::DarkGray)
    } else if app.focus == field {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Gray)
    };

    let mut textarea = textarea.clone();
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(border_style),
    );
    if app.focus != field || app.loading {
        // Only the focused, enabled field shows a cursor.
        textarea.set_cursor_style(Style::default());
    }

    f.render_widget(&textarea, area);
}

fn render_status(f: &mut Frame, app: &AppState, area: Rect) {
    let (text, style) = if let Some(ref error) = app.error {
        (
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.loading {
        (
            "Generating radio exchange...",
            Style::default().fg(Color::Yellow),
        )
    } else {
        (
            "Enter to generate, Tab to switch fields, PgUp/PgDn to scroll, Esc to quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let status = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    f.render_widget(status, area);
}

fn render_exchange(f: &mut Frame, app: &AppState, area: Rect) {
    let title = match app.received_at {
        Some(ref at) => format!("Radio Exchange [{}]", at),
        None => "Radio Exchange".to_string(),
    };

    let lines = match app.exchange {
        Some(ref exchange) => dialogue_lines(exchange),
        None => vec![Line::from(Span::styled(
            "No exchange yet",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))],
    };

    let exchange = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((app.scroll_offset, 0));

    f.render_widget(exchange, area);
}

/// Styled terminal lines for a raw exchange: red bold label for the driver,
/// blue bold for the engineer, unlabelled text passes through dimmed.
fn dialogue_lines(exchange: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for record in format_exchange(exchange) {
        let line = match record {
            DialogueLine::Driver(text) => Line::from(vec![
                Span::styled(
                    "Driver:",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(text),
            ]),
            DialogueLine::Engineer(text) => Line::from(vec![
                Span::styled(
                    "Engineer:",
                    Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
                Span::raw(text),
            ]),
            DialogueLine::Plain(text) => {
                Line::from(Span::styled(text, Style::default().fg(Color::Gray)))
            }
        };
        lines.push(line);
        lines.push(Line::from("")); // Empty line between records for readability
    }

    lines
}
