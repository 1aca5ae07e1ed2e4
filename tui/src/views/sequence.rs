//! Sequence-mode table: every step across every actor at once.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::Text;
use ratatui::widgets::{Block, Cell, Row, Table};

use crate::app::App;
use crate::views::actor_color;

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let Some(table) = app.player().sequence_table() else {
        return;
    };

    let mut header_cells = vec![Cell::from("Step")];
    for column in &table.columns {
        header_cells.push(
            Cell::from(column.name.clone())
                .style(Style::new().fg(actor_color(&column.color)).bold()),
        );
    }
    header_cells.push(Cell::from("Hand-off"));
    let header = Row::new(header_cells).style(Style::new().bold()).height(1);

    let rows = table.rows.iter().map(|row| {
        let mut cells = vec![Cell::from(row.step_number.to_string())];
        for cell in &row.cells {
            let content = if cell.active {
                cell.text.clone().unwrap_or_else(|| "•".to_string())
            } else {
                String::new()
            };
            let style = if cell.active {
                Style::new().fg(Color::White)
            } else {
                Style::new().dim()
            };
            cells.push(Cell::from(Text::from(content)).style(style));
        }

        // Spell the hand-offs out with actor names; the column indices
        // come from the render model.
        let handoff = row
            .handoffs
            .iter()
            .enumerate()
            .map(|(i, (from, to))| {
                let from_name = table.columns[*from].name.as_str();
                let to_name = table.columns[*to].name.as_str();
                if i == 0 {
                    format!("{from_name} → {to_name}")
                } else {
                    format!(" → {to_name}")
                }
            })
            .collect::<String>();
        cells.push(Cell::from(handoff).style(Style::new().dim()));

        let mut style = Style::new();
        if row.highlighted {
            style = style.fg(Color::Yellow);
        }
        if row.current {
            style = style.add_modifier(Modifier::REVERSED);
        }
        Row::new(cells).style(style).height(1)
    });

    let mut widths = vec![Constraint::Length(4)];
    widths.extend(table.columns.iter().map(|_| Constraint::Fill(1)));
    widths.push(Constraint::Length(24));

    let widget = Table::new(rows, widths)
        .header(header)
        .column_spacing(1)
        .block(Block::bordered().title(" Sequence "));
    frame.render_widget(widget, area);
}
