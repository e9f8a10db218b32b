//! Terminal screen: title, search box, market table, status line and key help.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::controller::{Controller, InputMode};
use crate::render::table::{render_rows, TableRow, Trend, HEADERS};

/// Colors for the UI.
pub struct UiColors {
    pub up: Color,
    pub down: Color,
    pub muted: Color,
    pub header_bg: Color,
    pub accent: Color,
}

impl Default for UiColors {
    fn default() -> Self {
        Self {
            up: Color::Green,
            down: Color::Red,
            muted: Color::DarkGray,
            header_bg: Color::DarkGray,
            accent: Color::Cyan,
        }
    }
}

pub fn draw(frame: &mut Frame, app: &Controller) {
    let colors = UiColors::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Table
            Constraint::Length(1), // Status
            Constraint::Length(1), // Key help
        ])
        .split(frame.area());

    draw_title(frame, app, chunks[0], &colors);
    draw_search(frame, app, chunks[1], &colors);
    draw_table(frame, app, chunks[2], &colors);
    draw_status(frame, app, chunks[3]);
    draw_help(frame, chunks[4], &colors);
}

fn draw_title(frame: &mut Frame, app: &Controller, area: Rect, colors: &UiColors) {
    let title = Line::from(vec![
        Span::styled("COINVIEW ", Style::default().fg(colors.accent).add_modifier(Modifier::BOLD)),
        Span::raw(format!(
            "- {} of {} coins",
            app.view().displayed().len(),
            app.view().full_set().len()
        )),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_search(frame: &mut Frame, app: &Controller, area: Rect, colors: &UiColors) {
    let editing = app.input_mode() == InputMode::Editing;
    let border = if editing { colors.accent } else { colors.muted };

    let mut spans = vec![Span::raw(app.search_input().to_string())];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(colors.accent)));
    } else if app.search_input().is_empty() {
        spans.push(Span::styled("press / to search by name or symbol", Style::default().fg(colors.muted)));
    }

    let search = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .title(" Search ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    );
    frame.render_widget(search, area);
}

fn draw_table(frame: &mut Frame, app: &Controller, area: Rect, colors: &UiColors) {
    let header = Row::new(HEADERS.iter().map(|h| Cell::from(*h)))
        .style(Style::default().bg(colors.header_bg).add_modifier(Modifier::BOLD))
        .height(1);

    let body = render_rows(app.view().displayed());
    let rows = body.rows.iter().map(|row| match row {
        TableRow::Placeholder { message, .. } => {
            Row::new(vec![Cell::from(*message).style(Style::default().fg(colors.muted))])
        }
        TableRow::Entry(entry) => {
            let trend_color = match entry.trend {
                Trend::Up => colors.up,
                Trend::Down => colors.down,
            };
            let [name, symbol, id, price, change, volume, cap] = entry.cells();
            Row::new(vec![
                Cell::from(name.to_string()),
                Cell::from(symbol.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(id.to_string()).style(Style::default().fg(colors.muted)),
                Cell::from(Line::from(price.to_string()).right_aligned()),
                Cell::from(Line::from(change.to_string()).right_aligned())
                    .style(Style::default().fg(trend_color)),
                Cell::from(Line::from(volume.to_string()).right_aligned()),
                Cell::from(Line::from(cap.to_string()).right_aligned()),
            ])
        }
    });

    let widths = [
        Constraint::Min(14),
        Constraint::Length(8),
        Constraint::Min(12),
        Constraint::Length(14),
        Constraint::Length(9),
        Constraint::Length(20),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(" Markets "));
    frame.render_widget(table, area);
}

fn draw_status(frame: &mut Frame, app: &Controller, area: Rect) {
    frame.render_widget(Paragraph::new(app.status().to_string()), area);
}

fn draw_help(frame: &mut Frame, area: Rect, colors: &UiColors) {
    let key = Style::default().fg(Color::Yellow);
    let help = Line::from(vec![
        Span::styled(" /", key),
        Span::raw(":search "),
        Span::styled("c", key),
        Span::raw(":clear "),
        Span::styled("m", key),
        Span::raw(":sort mkt cap "),
        Span::styled("p", key),
        Span::raw(":sort 24h % "),
        Span::styled("r", key),
        Span::raw(":reload "),
        Span::styled("q", key),
        Span::raw(":quit"),
    ]);
    frame.render_widget(Paragraph::new(help).style(Style::default().bg(colors.header_bg)), area);
}
