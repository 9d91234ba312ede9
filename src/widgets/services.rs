use ratatui::layout::{Constraint, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Cell, Row};
use ratatui::Frame;

use crate::app::App;
use crate::theme;
use crate::widgets::collection::{header_row, render_collection, CollectionTable};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let rows = app
        .services
        .items()
        .iter()
        .map(|service| {
            Row::new(vec![
                Cell::from(service.category.glyph()),
                Cell::from(service.title.clone()).style(Style::default().fg(theme::TEXT)),
                Cell::from(service.category.label().to_string())
                    .style(Style::default().fg(theme::ACCENT)),
                Cell::from(service.price_range.clone().unwrap_or_else(|| "-".to_string()))
                    .style(Style::default().fg(theme::GREEN)),
                Cell::from(service.description.clone()).style(Style::default().fg(theme::TEXT_DIM)),
            ])
        })
        .collect();

    let table = CollectionTable {
        header: header_row(&["", "SERVICE", "CATEGORY", "PRICE", "DESCRIPTION"]),
        rows: Some(rows),
        widths: vec![
            Constraint::Length(3),
            Constraint::Percentage(25),
            Constraint::Length(10),
            Constraint::Length(20),
            Constraint::Fill(1),
        ],
        loading_label: "Loading services...",
        empty_label: "No services listed yet",
        is_loading: app.services.is_loading(),
    };
    render_collection(frame, area, app.scroll, table);
}
