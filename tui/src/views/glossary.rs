//! Glossary overlay: term list with the selected definition.

use ratatui::Frame;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};

use crate::app::App;
use crate::views::centered_rect;

pub fn draw(frame: &mut Frame, app: &App) {
    let Some(scenario) = app.player().scenario() else {
        return;
    };
    let area = centered_rect(frame.area(), 60, 60);
    frame.render_widget(Clear, area);

    let cursor = app.glossary_cursor();
    let mut lines: Vec<Line> = vec![Line::raw("")];
    let mut selected_definition = None;
    for (i, (term, definition)) in scenario.glossary.iter().enumerate() {
        let marker = if i == cursor { "▸ " } else { "  " };
        let style = if i == cursor {
            Style::new().fg(Color::Cyan).bold()
        } else {
            Style::new()
        };
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(format!("{marker}{term}"), style),
        ]));
        if i == cursor {
            selected_definition = Some(definition);
        }
    }

    lines.push(Line::raw(""));
    if let Some(definition) = selected_definition {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(definition.to_string(), Style::new().italic()),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw("  ↑/↓ select · esc close").dim());

    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title(" Glossary "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
