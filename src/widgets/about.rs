use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::AboutTab;
use crate::app::App;
use crate::domain::Portfolio;
use crate::theme;
use crate::widgets::collection::clamp_scroll;
use crate::widgets::tab_bar::inner_tabs;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let [profile_area, tabs_area, body_area] = Layout::vertical([
        Constraint::Length(profile_height(&app.content)),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    render_profile(&app.content, frame, profile_area);
    frame.render_widget(Paragraph::new(inner_tabs(&app.about_tab)), tabs_area);

    let lines = body_lines(app);
    let scroll = clamp_scroll(app.scroll, lines.len());
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(theme::TEXT_MUTED)))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(body, body_area);
}

pub fn line_count(app: &App) -> usize {
    body_lines(app).len()
}

fn body_lines(app: &App) -> Vec<Line<'static>> {
    match app.about_tab.active() {
        AboutTab::Skills => skill_lines(&app.content),
        AboutTab::Experience => experience_lines(&app.content),
        AboutTab::Education => education_lines(&app.content),
    }
}

fn profile_height(content: &Portfolio) -> u16 {
    if content.profile.bio.is_empty() {
        4
    } else {
        6
    }
}

fn render_profile(content: &Portfolio, frame: &mut Frame, area: Rect) {
    let profile = &content.profile;
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {}", profile.name),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}", profile.title), Style::default().fg(theme::ACCENT)),
        ]),
    ];

    let mut contact: Vec<Span> = vec![Span::raw(" ")];
    for value in [&profile.location, &profile.email, &profile.phone] {
        if value.is_empty() {
            continue;
        }
        if contact.len() > 1 {
            contact.push(Span::styled("  ·  ", Style::default().fg(theme::TEXT_MUTED)));
        }
        contact.push(Span::styled(value.as_str(), Style::default().fg(theme::TEXT_DIM)));
    }
    lines.push(Line::from(contact));

    let mut links: Vec<Span> = vec![Span::raw(" ")];
    for link in &content.social {
        links.push(Span::styled(
            format!("[{}] ", link.platform.glyph()),
            Style::default().fg(theme::CYAN),
        ));
        links.push(Span::styled(
            format!("{}   ", link.url),
            Style::default().fg(theme::TEXT_DIM),
        ));
    }
    lines.push(Line::from(links));

    if !profile.bio.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" {}", profile.bio),
            Style::default().fg(theme::TEXT),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn skill_lines(content: &Portfolio) -> Vec<Line<'static>> {
    if content.skills.is_empty() {
        return vec![muted("No skills listed")];
    }

    let mut lines = vec![];
    let mut category: Option<&str> = None;
    for skill in &content.skills {
        if category != Some(skill.category.as_str()) {
            if category.is_some() {
                lines.push(Line::from(""));
            }
            category = Some(skill.category.as_str());
            lines.push(heading(&skill.category));
        }
        lines.push(Line::from(vec![
            Span::styled(format!("   {:<22}", skill.name), Style::default().fg(theme::TEXT)),
            Span::styled(meter(skill.level), Style::default().fg(theme::GREEN)),
            Span::styled(format!(" {}%", skill.level.min(100)), Style::default().fg(theme::TEXT_MUTED)),
        ]));
    }
    lines
}

/// Twenty-cell bar for a 0-100 level.
fn meter(level: u8) -> String {
    let filled = (level.min(100) as usize) / 5;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}

fn experience_lines(content: &Portfolio) -> Vec<Line<'static>> {
    if content.experience.is_empty() {
        return vec![muted("No experience listed")];
    }

    let mut lines = vec![];
    for job in &content.experience {
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", job.title),
                Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!(" @ {}", job.company), Style::default().fg(theme::ACCENT)),
        ]));
        lines.push(muted(&format!("{} - {}  {}", job.start, job.end, job.location)));
        for highlight in &job.highlights {
            lines.push(Line::from(Span::styled(
                format!("   • {}", highlight),
                Style::default().fg(theme::TEXT_DIM),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn education_lines(content: &Portfolio) -> Vec<Line<'static>> {
    if content.education.is_empty() {
        return vec![muted("No education listed")];
    }

    let mut lines = vec![];
    for entry in &content.education {
        lines.push(Line::from(Span::styled(
            format!(" {}", entry.degree),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            format!(" {}", entry.institution),
            Style::default().fg(theme::ACCENT),
        )));
        lines.push(muted(&format!("{} - {}  {}", entry.start, entry.end, entry.location)));
        if let Some(description) = &entry.description {
            lines.push(Line::from(Span::styled(
                format!("   {}", description),
                Style::default().fg(theme::TEXT_DIM),
            )));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(theme::YELLOW).add_modifier(Modifier::BOLD),
    ))
}

fn muted(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!(" {}", text),
        Style::default().fg(theme::TEXT_MUTED),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meter_is_fixed_width() {
        assert_eq!(meter(0).chars().count(), 20);
        assert_eq!(meter(85).chars().filter(|c| *c == '█').count(), 17);
        assert_eq!(meter(250).chars().filter(|c| *c == '░').count(), 0);
    }

    #[test]
    fn skills_group_under_category_headings() {
        let content = Portfolio::builtin();
        let categories: std::collections::BTreeSet<&str> =
            content.skills.iter().map(|s| s.category.as_str()).collect();
        let lines = skill_lines(&content);
        assert!(lines.len() >= content.skills.len() + categories.len());
    }
}
