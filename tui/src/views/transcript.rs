//! Executive-mode chat transcript pane.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use playbill_player::Fragment;

use crate::app::App;
use crate::views::actor_color;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let lines = build_lines(app);
    // Keep the tail in view; the transcript grows downward like a chat.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title(" Conversation "))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn build_lines(app: &App) -> Vec<Line<'static>> {
    let transcript = app.player().transcript();
    if transcript.is_empty() {
        return vec![Line::raw(""), Line::raw("  No conversation yet.").dim()];
    }

    let mut lines = Vec::new();
    for entry in transcript {
        let color = actor_color(&entry.color);
        let marker = if entry.fresh { "▌ " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker.to_string(), Style::new().fg(color)),
            Span::styled(format!("{} ", entry.initials), Style::new().fg(color).bold()),
            Span::styled(entry.actor_name.clone(), Style::new().fg(color).bold()),
            Span::styled(format!("  · Step {}", entry.step_number), Style::new().dim()),
        ]));

        let mut current: Vec<Span> = vec![Span::raw("    ")];
        for fragment in entry.fragments {
            match fragment {
                Fragment::Text(text) => current.push(Span::raw(text)),
                Fragment::Bold(text) => current.push(Span::styled(text, Style::new().bold())),
                Fragment::Italic(text) => current.push(Span::styled(text, Style::new().italic())),
                Fragment::Term { text, .. } => current.push(Span::styled(
                    text,
                    Style::new().fg(Color::Cyan).underlined(),
                )),
                Fragment::LineBreak => {
                    lines.push(Line::from(std::mem::replace(
                        &mut current,
                        vec![Span::raw("    ")],
                    )));
                }
            }
        }
        lines.push(Line::from(current));
        lines.push(Line::raw(""));
    }
    lines
}
