//! Rendering: one function per pane, all driven off the player's view
//! models.

pub mod activity;
pub mod glossary;
pub mod sequence;
pub mod transcript;
pub mod welcome;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use playbill_player::Mode;

use crate::app::{App, Screen};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen() {
        Screen::Welcome => welcome::draw(frame, app),
        Screen::Playing => draw_playing(frame, app),
    }
    if app.glossary_open() {
        glossary::draw(frame, app);
    }
}

fn draw_playing(frame: &mut Frame, app: &App) {
    let [header, body, footer] =
        Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    draw_breadcrumb(frame, app, header);
    match app.player().mode() {
        Mode::Executive => {
            let [left, right] =
                Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)])
                    .areas(body);
            transcript::draw(frame, app, left);
            activity::draw(frame, app, right);
        }
        Mode::Sequence => sequence::draw(frame, app, body),
    }
    draw_footer(frame, app, footer);
}

/// Title line plus the phase trail.
fn draw_breadcrumb(frame: &mut Frame, app: &App, area: Rect) {
    let title = app.active_title().unwrap_or("Walkthrough");
    let mut spans: Vec<Span> = vec![Span::styled(title.to_string(), Style::new().bold()), Span::raw("   ")];

    for (i, crumb) in app.player().breadcrumb().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" › ").dim());
        }
        let label = format!("{} {}", i + 1, crumb.name);
        if crumb.current {
            spans.push(Span::styled(label, Style::new().fg(Color::Yellow).bold()));
        } else if crumb.linkable {
            spans.push(Span::styled(label, Style::new().fg(Color::Cyan)));
        } else {
            spans.push(Span::raw(label));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.player().mode() {
        Mode::Executive => "←/→ step · s sequence view · g glossary · 1-9 jump to phase · esc scenarios · q quit",
        Mode::Sequence => "s step view · 1-9 highlight phase · esc scenarios · q quit",
    };
    frame.render_widget(Paragraph::new(hints).dim(), area);
}

/// Parse an authored `#rrggbb` color; anything else falls back to the
/// terminal default.
pub(crate) fn actor_color(hex: &str) -> Color {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return Color::Reset;
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => Color::Reset,
    }
}

/// A centered overlay rectangle.
pub(crate) fn centered_rect(area: Rect, width_pct: u16, height_pct: u16) -> Rect {
    let [_, v, _] = Layout::vertical([
        Constraint::Percentage((100 - height_pct) / 2),
        Constraint::Percentage(height_pct),
        Constraint::Percentage((100 - height_pct) / 2),
    ])
    .areas(area);
    let [_, h, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_pct) / 2),
        Constraint::Percentage(width_pct),
        Constraint::Percentage((100 - width_pct) / 2),
    ])
    .areas(v);
    h
}
