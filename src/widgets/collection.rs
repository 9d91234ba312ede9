use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use crate::theme;

pub struct CollectionTable {
    pub header: Row<'static>,
    pub rows: Option<Vec<Row<'static>>>,
    pub widths: Vec<Constraint>,
    pub loading_label: &'static str,
    pub empty_label: &'static str,
    pub is_loading: bool,
}

/// Renders a table scrolled by `offset` rows, or a placeholder while there
/// are no rows to show.
pub fn render_collection(frame: &mut Frame, area: Rect, offset: u16, table: CollectionTable) {
    let rows = match table.rows {
        Some(rows) if !rows.is_empty() => rows,
        _ => {
            let label = if table.is_loading {
                table.loading_label
            } else {
                table.empty_label
            };
            placeholder(frame, area, label);
            return;
        }
    };

    let offset = (offset as usize).min(rows.len().saturating_sub(1));
    let mut state = TableState::default().with_offset(offset);
    let table = Table::new(rows, table.widths)
        .header(table.header)
        .block(Block::default().borders(Borders::NONE));

    frame.render_stateful_widget(table, area, &mut state);
}

pub fn placeholder(frame: &mut Frame, area: Rect, label: &str) {
    let widget = Paragraph::new(format!(" {}", label)).style(Style::default().fg(theme::TEXT_MUTED));
    frame.render_widget(widget, area);
}

pub fn header_row(labels: &[&'static str]) -> Row<'static> {
    Row::new(
        labels
            .iter()
            .map(|label| Cell::from(*label))
            .collect::<Vec<_>>(),
    )
    .style(
        Style::default()
            .fg(theme::TEXT_DIM)
            .add_modifier(Modifier::BOLD),
    )
    .height(1)
}

/// Scroll offset clamped so that some content always stays visible.
pub fn clamp_scroll(scroll: u16, content_lines: usize) -> u16 {
    let max = content_lines.saturating_sub(1).min(u16::MAX as usize) as u16;
    scroll.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_scroll_keeps_last_line() {
        assert_eq!(clamp_scroll(u16::MAX, 10), 9);
        assert_eq!(clamp_scroll(3, 10), 3);
        assert_eq!(clamp_scroll(5, 0), 0);
    }
}
