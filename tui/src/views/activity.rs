//! Executive-mode activity pane: who is doing what in the current step.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Wrap};

use playbill_player::{BadgeKind, STANDING_BY};

use crate::app::App;
use crate::views::actor_color;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    match app.player().activity() {
        None => {
            lines.push(Line::raw(""));
            lines.push(Line::raw("  No activity in this step.").dim());
        }
        Some(view) => {
            if !view.badges.is_empty() {
                let mut spans: Vec<Span> = vec![Span::raw("  ")];
                for badge in &view.badges {
                    let color = match badge.kind {
                        BadgeKind::Policy => Color::Magenta,
                        BadgeKind::Token => Color::Green,
                        BadgeKind::Handle => Color::Blue,
                    };
                    spans.push(Span::styled(
                        format!("[{} {}]", badge.kind.label(), badge.text),
                        Style::new().fg(color),
                    ));
                    spans.push(Span::raw(" "));
                }
                lines.push(Line::from(spans));
                lines.push(Line::raw(""));
            }

            let mut first = true;
            for card in view.cards.iter().filter(|c| c.visible) {
                if !first {
                    lines.push(Line::styled("      ↓", Style::new().dim()));
                }
                first = false;

                let color = actor_color(&card.color);
                lines.push(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(format!("● {} ", card.initials), Style::new().fg(color).bold()),
                    Span::styled(card.actor_name.clone(), Style::new().fg(color).bold()),
                    Span::styled(format!("  ({})", card.actor_id), Style::new().dim()),
                ]));
                let action = card.action.as_deref().unwrap_or(STANDING_BY);
                lines.push(Line::from(vec![
                    Span::raw("    "),
                    Span::raw(action.to_string()),
                ]));
            }

            if view.revealing {
                lines.push(Line::raw(""));
                lines.push(Line::styled("      …", Style::new().dim()));
            }
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(Block::bordered().title(" Activity "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
