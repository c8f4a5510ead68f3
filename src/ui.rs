pub mod schedule_view;
pub mod screen;

use std::collections::HashMap;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Gauge, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use rondo::celebration::Celebration;
use rondo::runner::SessionStatus;
use rondo::schedule;
use rondo::sequence::PhaseKind;
use rondo::util::{format_clock, format_duration};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.runner.is_finished() {
            render_summary(self, area, buf);
        } else {
            render_session(self, area, buf);
        }
    }
}

pub fn phase_color(kind: PhaseKind) -> Color {
    match kind {
        PhaseKind::WarmUp => Color::Yellow,
        PhaseKind::Work => Color::Green,
        PhaseKind::Rest => Color::Cyan,
        PhaseKind::CoolDown => Color::Magenta,
    }
}

fn render_session(app: &App, area: Rect, buf: &mut Buffer) {
    let runner = &app.runner;
    let phase = match runner.current_phase() {
        Ok(phase) => phase,
        Err(_) => return,
    };

    // styles
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let accent = phase_color(phase.kind);

    let block_line = match (phase.kind, phase.round) {
        (PhaseKind::Work | PhaseKind::Rest, Some(round)) => {
            format!("Circuit {} of {}", round, app.settings.rounds)
        }
        _ => phase.kind.as_str().to_string(),
    };

    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let label_lines: u16 = if phase.label.width() <= max_chars_per_line as usize {
        1
    } else {
        2
    };

    let occupied = 12 + label_lines;
    let pad = area.height.saturating_sub(occupied) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(pad),
                Constraint::Length(1), // block header
                Constraint::Length(1),
                Constraint::Length(label_lines),
                Constraint::Length(1), // rep or hold target
                Constraint::Length(1),
                Constraint::Length(1), // countdown
                Constraint::Length(1),
                Constraint::Length(1), // phase gauge
                Constraint::Length(1),
                Constraint::Length(1), // session gauge
                Constraint::Length(1),
                Constraint::Length(1), // status
                Constraint::Min(0),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let header = Paragraph::new(Span::styled(
        block_line,
        Style::default().patch(bold_style).fg(accent),
    ))
    .alignment(Alignment::Center);
    header.render(chunks[1], buf);

    let label = Paragraph::new(Span::styled(phase.label.clone(), bold_style))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    label.render(chunks[3], buf);

    let detail = match phase.kind {
        PhaseKind::Work => app.catalog.detail_for(&phase.label),
        PhaseKind::Rest => Some("recharge"),
        _ => None,
    };
    if let Some(detail) = detail {
        let target = Paragraph::new(Span::styled(detail.to_string(), dim_bold_style))
            .alignment(Alignment::Center);
        target.render(chunks[4], buf);
    }

    let countdown = Paragraph::new(Span::styled(
        format_clock(runner.remaining_in_phase()),
        Style::default().patch(bold_style).fg(accent),
    ))
    .alignment(Alignment::Center);
    countdown.render(chunks[6], buf);

    let phase_gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent))
        .use_unicode(true)
        .ratio(runner.progress_in_phase());
    phase_gauge.render(chunks[8], buf);

    let session_gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::DarkGray))
        .use_unicode(true)
        .label(Span::styled(
            format!(
                "{} / {}",
                format_clock(runner.elapsed_secs()),
                format_clock(runner.total_secs())
            ),
            dim_bold_style,
        ))
        .ratio(runner.session_progress());
    session_gauge.render(chunks[10], buf);

    let status = if runner.status() == SessionStatus::NotStarted {
        Span::styled("press (space) to begin".to_string(), italic_style)
    } else {
        match runner.next_phase() {
            Some(next) => Span::styled(
                format!("next: {} ({})", next.label, format_clock(next.duration_secs)),
                dim_bold_style,
            ),
            None => Span::styled("last phase".to_string(), dim_bold_style),
        }
    };
    Paragraph::new(status)
        .alignment(Alignment::Center)
        .render(chunks[12], buf);

    let legend = Paragraph::new(Span::styled(
        String::from(if runner.has_started() {
            "(s)chedule / (esc)ape"
        } else {
            "(space) start / (s)chedule / (esc)ape"
        }),
        italic_style,
    ));
    legend.render(chunks[14], buf);
}

fn render_summary(app: &App, area: Rect, buf: &mut Buffer) {
    let runner = &app.runner;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let italic_style = Style::default().add_modifier(Modifier::ITALIC);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(1), // headline
                Constraint::Length(1),
                Constraint::Length(1), // session shape
                Constraint::Length(1), // per-kind totals
                Constraint::Length(1), // total and finish time
                Constraint::Length(1),
                Constraint::Length(1), // recovery note
                Constraint::Min(1),
                Constraint::Length(1), // legend
            ]
            .as_ref(),
        )
        .split(area);

    let headline = if app.celebration.headline.is_empty() {
        "SESSION COMPLETE!"
    } else {
        app.celebration.headline
    };
    Paragraph::new(Span::styled(
        headline,
        Style::default().patch(bold_style).fg(Color::Yellow),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    let work_phases = runner
        .sequence()
        .iter()
        .filter(|p| p.kind == PhaseKind::Work)
        .count();
    let exercises = runner
        .sequence()
        .iter()
        .filter(|p| p.kind == PhaseKind::Work)
        .map(|p| p.label.as_str())
        .unique()
        .count();
    let shape = format!(
        "{} exercises x {} rounds ({} work phases)",
        exercises, app.settings.rounds, work_phases
    );
    Paragraph::new(Span::styled(shape, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    let secs_by_kind: HashMap<PhaseKind, u32> = runner
        .sequence()
        .iter()
        .map(|p| (p.kind, p.duration_secs))
        .into_grouping_map()
        .sum();
    let totals = [
        PhaseKind::WarmUp,
        PhaseKind::Work,
        PhaseKind::Rest,
        PhaseKind::CoolDown,
    ]
    .iter()
    .filter_map(|kind| {
        secs_by_kind
            .get(kind)
            .map(|secs| format!("{} {}", kind.as_str().to_lowercase(), format_clock(*secs)))
    })
    .join("   ");
    Paragraph::new(Span::styled(totals, dim_bold_style))
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    let finish = schedule::finish_time(runner.sequence(), app.origin);
    let wrap_up = format!(
        "total {}   ends {}",
        format_duration(runner.total_secs()),
        finish.format("%H:%M")
    );
    Paragraph::new(Span::styled(wrap_up, bold_style))
        .alignment(Alignment::Center)
        .render(chunks[5], buf);

    let note = Paragraph::new(Span::styled(
        "post-workout fuel: 25-30 g protein",
        Style::default().patch(italic_style).fg(Color::Cyan),
    ))
    .alignment(Alignment::Center);
    note.render(chunks[7], buf);

    let legend = Paragraph::new(Span::styled(
        "(r) go again / (s)chedule / (esc)ape",
        italic_style,
    ));
    legend.render(chunks[9], buf);

    if app.celebration.is_active() {
        render_sparks(&app.celebration, area, buf);
    }
}

/// Draw the finish burst on top of the summary screen
fn render_sparks(celebration: &Celebration, area: Rect, buf: &mut Buffer) {
    let colors = [
        Color::Yellow,
        Color::Magenta,
        Color::Cyan,
        Color::Green,
        Color::Red,
        Color::Blue,
    ];

    for spark in &celebration.sparks {
        let x = spark.x as u16;
        let y = spark.y as u16;

        if x < area.width && y < area.height {
            let color = colors[spark.color_index % colors.len()];

            let fade = spark.fade();
            let style = if fade > 0.7 {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else if fade > 0.3 {
                Style::default().fg(color)
            } else {
                Style::default().fg(color).add_modifier(Modifier::DIM)
            };

            if let Some(cell) = buf.cell_mut((area.x + x, area.y + y)) {
                cell.set_symbol(&spark.symbol.to_string());
                cell.set_style(style);
            }
        }
    }
}
