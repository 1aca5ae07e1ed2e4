//! Scenario picker shown before anything is loaded.

use ratatui::Frame;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;

pub fn draw(frame: &mut Frame, app: &App) {
    let mut lines = vec![
        Line::raw(""),
        Line::styled("  Select a scenario", Style::new().bold()),
        Line::raw(""),
    ];

    if app.scenarios().is_empty() {
        lines.push(Line::raw("  No scenarios available.").dim());
    }
    for (i, entry) in app.scenarios().iter().enumerate().take(9) {
        let mut spans = vec![
            Span::styled(format!("  {}  ", i + 1), Style::new().bold().cyan()),
            Span::raw(entry.summary.title.clone()),
        ];
        if let Some(description) = &entry.summary.description {
            spans.push(Span::styled(format!("  — {description}"), Style::new().dim()));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::raw(""));
    lines.push(Line::raw("  Press the scenario number to start · q to quit").dim());

    let paragraph = Paragraph::new(lines).block(Block::bordered().title(" Walkthrough "));
    frame.render_widget(paragraph, frame.area());
}
