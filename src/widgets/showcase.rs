use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Showcase;
use crate::theme;
use crate::widgets::collection::clamp_scroll;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if let Some(project) = app.selected_project() {
        render_detail(app, project, frame, area);
        return;
    }

    let [filter_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    frame.render_widget(Paragraph::new(filter_line(app)), filter_area);

    let projects = app.filtered_showcase();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_span = (0, 0);
    if projects.is_empty() {
        lines.push(Line::from(Span::styled(
            " No projects match this tag",
            Style::default().fg(theme::TEXT_MUTED),
        )));
    }
    for (idx, project) in projects.iter().enumerate() {
        let selected = idx == app.showcase_cursor;
        let block = project_lines(project, selected);
        if selected {
            cursor_span = (lines.len(), lines.len() + block.len());
        }
        lines.extend(block);
    }

    // Keep the selected project in view.
    let visible = body_area.height.saturating_sub(1) as usize;
    let scroll = cursor_span.1.saturating_sub(visible).min(cursor_span.0);
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme::TEXT_MUTED)))
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));
    frame.render_widget(body, body_area);
}

pub fn line_count(app: &App) -> usize {
    match app.selected_project() {
        Some(project) => detail_lines(project).len(),
        None => app
            .filtered_showcase()
            .iter()
            .map(|project| project_lines(project, false).len())
            .sum(),
    }
}

fn render_detail(app: &App, project: &Showcase, frame: &mut Frame, area: Rect) {
    let [header_area, body_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);

    let header = Line::from(vec![
        Span::styled(" Projects", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(" / ", Style::default().fg(theme::TEXT_MUTED)),
        Span::styled(project.id.clone(), Style::default().fg(theme::ACCENT)),
        Span::styled("   Esc back", Style::default().fg(theme::TEXT_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    let lines = detail_lines(project);
    let scroll = clamp_scroll(app.scroll, lines.len());
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme::TEXT_MUTED)))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(body, body_area);
}

fn detail_lines(project: &Showcase) -> Vec<Line<'static>> {
    let mut lines = vec![title_line(project, false), Line::from("")];
    lines.extend(project.detail_text().lines().map(|text| {
        Line::from(Span::styled(
            format!(" {}", text),
            Style::default().fg(theme::TEXT_DIM),
        ))
    }));

    if !project.tags.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            " Technologies",
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )));
        lines.push(tag_line(project, " "));
    }

    let links = link_lines(project, " ");
    if !links.is_empty() {
        lines.push(Line::from(""));
        lines.extend(links);
    }
    lines
}

fn filter_line(app: &App) -> Line<'_> {
    let active = app.active_showcase_tag();
    let mut spans = vec![Span::styled(" tag: ", Style::default().fg(theme::TEXT_MUTED))];
    let options = std::iter::once(None).chain(app.showcase_tags.iter().map(|t| Some(t.as_str())));
    for option in options {
        let label = option.unwrap_or("all");
        let style = if option == active {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(label.to_string(), style));
        spans.push(Span::raw("  "));
    }
    Line::from(spans)
}

fn title_line(project: &Showcase, selected: bool) -> Line<'static> {
    let (marker, color) = if selected {
        ("▸", theme::ACCENT)
    } else {
        (" ", theme::TEXT)
    };
    let mut title = vec![Span::styled(
        format!("{}{}", marker, project.title),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if project.featured {
        title.push(Span::styled("  ★ featured", Style::default().fg(theme::YELLOW)));
    }
    Line::from(title)
}

fn tag_line(project: &Showcase, indent: &'static str) -> Line<'static> {
    let tags: Vec<Span> = std::iter::once(Span::raw(indent))
        .chain(project.tags.iter().map(|tag| {
            Span::styled(format!("#{} ", tag), Style::default().fg(theme::CYAN))
        }))
        .collect();
    Line::from(tags)
}

fn link_lines(project: &Showcase, indent: &str) -> Vec<Line<'static>> {
    [("demo", &project.demo_url), ("code", &project.source_url)]
        .into_iter()
        .filter_map(|(label, url)| {
            let url = url.as_ref()?;
            Some(Line::from(vec![
                Span::styled(format!("{}{}: ", indent, label), Style::default().fg(theme::TEXT_MUTED)),
                Span::styled(url.clone(), Style::default().fg(theme::BLUE)),
            ]))
        })
        .collect()
}

fn project_lines(project: &Showcase, selected: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        title_line(project, selected),
        Line::from(Span::styled(
            format!("   {}", project.description),
            Style::default().fg(theme::TEXT_DIM),
        )),
    ];

    if !project.tags.is_empty() {
        lines.push(tag_line(project, "   "));
    }
    lines.extend(link_lines(project, "   "));
    lines.push(Line::from(""));
    lines
}
