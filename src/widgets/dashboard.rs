use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Cell, Paragraph, Row};
use ratatui::Frame;

use crate::app::App;
use crate::dashboard::DashboardTab;
use crate::domain::ProjectStatus;
use crate::theme;
use crate::widgets::collection::{header_row, placeholder, render_collection, CollectionTable};
use crate::widgets::tab_bar::inner_tabs;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if !app.session.is_signed_in() {
        placeholder(
            frame,
            area,
            "Sign in to see your projects, meetings and messages.",
        );
        return;
    }

    let [tabs_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Fill(1)]).areas(area);
    frame.render_widget(Paragraph::new(inner_tabs(&app.dashboard_tab)), tabs_area);

    let table = match app.dashboard_tab.active() {
        DashboardTab::Projects => projects_table(app),
        DashboardTab::Meetings => meetings_table(app),
        DashboardTab::Messages => messages_table(app),
    };
    render_collection(frame, body_area, app.scroll, table);
}

pub fn row_count(app: &App) -> usize {
    match app.dashboard_tab.active() {
        DashboardTab::Projects => app.dashboard.projects.items().len(),
        DashboardTab::Meetings => app.dashboard.meetings.items().len(),
        DashboardTab::Messages => app.dashboard.messages.items().len(),
    }
}

fn status_style(status: &ProjectStatus) -> Style {
    match status {
        ProjectStatus::Pending => Style::default().fg(theme::YELLOW),
        ProjectStatus::InProgress => Style::default().fg(theme::BLUE),
        ProjectStatus::Completed => Style::default().fg(theme::GREEN),
        ProjectStatus::Other(_) => Style::default().fg(theme::TEXT_DIM),
    }
}

fn projects_table(app: &App) -> CollectionTable {
    let rows = app
        .dashboard
        .projects
        .items()
        .iter()
        .map(|project| {
            let status = project.status();
            Row::new(vec![
                Cell::from(project.title.clone()).style(Style::default().fg(theme::TEXT)),
                Cell::from(project.project_type.clone()).style(Style::default().fg(theme::ACCENT)),
                Cell::from(status.label()).style(status_style(&status)),
                Cell::from(
                    project
                        .deadline
                        .map(|d| d.format("%-m/%-d/%Y").to_string())
                        .unwrap_or_default(),
                )
                .style(Style::default().fg(theme::TEXT_DIM)),
                Cell::from(project.budget_range.clone().unwrap_or_default())
                    .style(Style::default().fg(theme::TEXT_MUTED)),
            ])
        })
        .collect();

    CollectionTable {
        header: header_row(&["TITLE", "TYPE", "STATUS", "DEADLINE", "BUDGET"]),
        rows: Some(rows),
        widths: vec![
            Constraint::Percentage(35),
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(11),
            Constraint::Fill(1),
        ],
        loading_label: "Loading projects...",
        empty_label: "No projects yet. Book one with `folio book`.",
        is_loading: app.dashboard.projects.is_loading(),
    }
}

fn meetings_table(app: &App) -> CollectionTable {
    let rows = app
        .dashboard
        .meetings
        .items()
        .iter()
        .map(|meeting| {
            Row::new(vec![
                Cell::from(meeting.title.clone()).style(Style::default().fg(theme::TEXT)),
                Cell::from(meeting.meeting_time.format("%-m/%-d/%Y %-I:%M %p").to_string())
                    .style(Style::default().fg(theme::CYAN)),
                Cell::from(
                    meeting
                        .duration
                        .map(|m| format!("{} min", m))
                        .unwrap_or_default(),
                )
                .style(Style::default().fg(theme::TEXT_DIM)),
                Cell::from(meeting.meeting_link.clone().unwrap_or_default())
                    .style(Style::default().fg(theme::BLUE)),
            ])
        })
        .collect();

    CollectionTable {
        header: header_row(&["TITLE", "WHEN (UTC)", "LENGTH", "LINK"]),
        rows: Some(rows),
        widths: vec![
            Constraint::Percentage(35),
            Constraint::Length(20),
            Constraint::Length(8),
            Constraint::Fill(1),
        ],
        loading_label: "Loading meetings...",
        empty_label: "No upcoming meetings",
        is_loading: app.dashboard.meetings.is_loading(),
    }
}

fn messages_table(app: &App) -> CollectionTable {
    let rows = app
        .dashboard
        .messages
        .items()
        .iter()
        .map(|message| {
            let style = if message.is_unread() {
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(theme::TEXT_DIM)
            };
            Row::new(vec![
                Cell::from(if message.is_unread() { "●" } else { " " })
                    .style(Style::default().fg(theme::MAGENTA)),
                Cell::from(
                    message
                        .created_at
                        .map(|t| t.format("%-m/%-d/%Y").to_string())
                        .unwrap_or_default(),
                )
                .style(Style::default().fg(theme::TEXT_MUTED)),
                Cell::from(message.content.clone()).style(style),
            ])
        })
        .collect();

    CollectionTable {
        header: header_row(&["", "DATE", "MESSAGE"]),
        rows: Some(rows),
        widths: vec![
            Constraint::Length(2),
            Constraint::Length(11),
            Constraint::Fill(1),
        ],
        loading_label: "Loading messages...",
        empty_label: "No messages",
        is_loading: app.dashboard.messages.is_loading(),
    }
}
