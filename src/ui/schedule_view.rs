use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use rondo::schedule::{self, ScheduleRow};
use rondo::util::format_duration;

use crate::ui::phase_color;
use crate::App;

/// Pure presenter for a single plan row
pub fn present_row(row: &ScheduleRow, is_current: bool) -> Row<'static> {
    let kind_style = Style::default().fg(phase_color(row.kind));

    let cells = Row::new(vec![
        Cell::from(row.starts_at.format("%H:%M:%S").to_string()),
        Cell::from(row.block.clone()).style(kind_style),
        Cell::from(row.activity.clone()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format_duration(row.duration_secs)),
    ]);

    if is_current {
        cells.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        cells
    }
}

/// Render the session plan screen
pub fn render_schedule(app: &mut App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Plan table
            Constraint::Length(4), // Instructions
        ])
        .split(area);

    let rows = schedule::project(app.runner.sequence(), app.origin);
    let finish = schedule::finish_time(app.runner.sequence(), app.origin);
    let current = if app.runner.is_finished() {
        None
    } else {
        Some(app.runner.phase_index())
    };

    let title_text = format!(
        "Session Plan ({} - {})",
        app.origin.format("%H:%M"),
        finish.format("%H:%M")
    );

    let title = Paragraph::new(title_text)
        .block(Block::default().borders(Borders::ALL).title("Plan"))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    // Calculate scrolling bounds
    let table_height = chunks[1].height.saturating_sub(3) as usize; // borders + header
    let total_rows = rows.len();
    let max_scroll = total_rows.saturating_sub(table_height);

    // Clamp scroll offset
    if app.schedule_scroll > max_scroll {
        app.schedule_scroll = max_scroll;
    }

    let header = Row::new(vec![
        Cell::from("TIME"),
        Cell::from("BLOCK"),
        Cell::from("ACTIVITY"),
        Cell::from("DURATION"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    // Visible rows
    let visible_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .skip(app.schedule_scroll)
        .take(table_height)
        .map(|(index, row)| present_row(row, current == Some(index)))
        .collect();

    let widths = [
        Constraint::Length(8),  // Time
        Constraint::Length(10), // Block
        Constraint::Min(14),    // Activity
        Constraint::Length(14), // Duration
    ];

    let table = Table::new(visible_rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Blocks"))
        .column_spacing(2);

    f.render_widget(table, chunks[1]);

    // Instructions
    let instructions =
        Paragraph::new("(↑/↓) scroll  (PgUp/PgDn) page  (Home) top  (b/backspace) back  (esc) quit")
            .alignment(Alignment::Center)
            .wrap(ratatui::widgets::Wrap { trim: true });
    f.render_widget(instructions, chunks[2]);
}
