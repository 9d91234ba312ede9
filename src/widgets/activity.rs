use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, Paragraph, Row};
use ratatui::Frame;

use crate::activity::FetchState;
use crate::app::App;
use crate::theme;
use crate::widgets::collection::{header_row, placeholder, render_collection, CollectionTable};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let [title_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);

    let handle = app.activity.source_id().unwrap_or(app.github_user.as_str());
    let title = Line::from(vec![
        Span::styled(
            " Recent GitHub activity",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  @{}", handle), Style::default().fg(theme::ACCENT)),
        Span::styled(
            format!("  (last {})", app.activity_limit),
            Style::default().fg(theme::TEXT_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    if app.github_user.trim().is_empty() {
        placeholder(frame, body_area, "No GitHub handle configured (try :user <handle>)");
        return;
    }

    match app.activity.state() {
        FetchState::Failed => {
            let msg = app.activity.error().unwrap_or_default();
            let widget = Paragraph::new(format!(" {}", msg)).style(Style::default().fg(theme::RED));
            frame.render_widget(widget, body_area);
        }
        FetchState::Pending | FetchState::Ready => {
            let rows = app
                .activity
                .items()
                .iter()
                .map(|item| {
                    Row::new(vec![
                        Cell::from(item.date.clone()).style(Style::default().fg(theme::TEXT_DIM)),
                        Cell::from(item.time.clone()).style(Style::default().fg(theme::TEXT_MUTED)),
                        Cell::from(item.action.clone()).style(Style::default().fg(theme::GREEN)),
                        Cell::from(item.repo.clone()).style(Style::default().fg(theme::TEXT)),
                        Cell::from(item.details.clone()).style(Style::default().fg(theme::TEXT_DIM)),
                    ])
                })
                .collect();
            let table = CollectionTable {
                header: header_row(&["DATE", "TIME", "ACTION", "REPOSITORY", "DETAILS"]),
                rows: Some(rows),
                widths: vec![
                    Constraint::Length(11),
                    Constraint::Length(12),
                    Constraint::Length(28),
                    Constraint::Percentage(35),
                    Constraint::Fill(1),
                ],
                loading_label: "Loading activity...",
                empty_label: "No recent public activity",
                is_loading: app.activity.is_loading(),
            };
            render_collection(frame, body_area, app.scroll, table);
        }
    }
}
