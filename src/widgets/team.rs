use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::domain::TeamMember;
use crate::theme;
use crate::widgets::collection::{clamp_scroll, placeholder};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.team.is_loading() {
        placeholder(frame, area, "Loading team...");
        return;
    }
    let members = app.team.items();
    if members.is_empty() {
        placeholder(frame, area, "No team members to show");
        return;
    }

    let lines: Vec<Line> = members.iter().flat_map(member_lines).collect();
    let scroll = clamp_scroll(app.scroll, lines.len());
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

pub fn line_count(app: &App) -> usize {
    app.team.items().iter().map(|m| member_lines(m).len()).sum()
}

fn member_lines(member: &TeamMember) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format!(" {}", member.name),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", member.role), Style::default().fg(theme::ACCENT)),
    ])];

    if let Some(bio) = member.bio.as_deref().filter(|b| !b.trim().is_empty()) {
        lines.push(Line::from(Span::styled(
            format!("   {}", bio),
            Style::default().fg(theme::TEXT_DIM),
        )));
    }

    let links = member.links();
    if !links.is_empty() {
        let mut spans = vec![Span::raw("   ")];
        for link in links {
            spans.push(Span::styled(
                format!("[{}] ", link.platform.glyph()),
                Style::default().fg(theme::CYAN),
            ));
            spans.push(Span::styled(
                format!("{}  ", link.url),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
        lines.push(Line::from(spans));
    }
    lines.push(Line::from(""));
    lines
}
