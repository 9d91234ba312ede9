use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::action::Section;
use crate::theme;

pub fn render(section: Section, frame: &mut Frame, area: Rect) {
    let mut lines = vec![];

    lines.push(Line::from(""));
    lines.push(heading("Navigation"));
    lines.push(binding("Tab / Shift+Tab", "Next / previous section"));
    lines.push(binding("1 - 7", "Jump to section"));
    lines.push(binding("j / k / Up / Down", "Scroll"));
    lines.push(binding("gg / G", "Go to top / bottom"));
    lines.push(binding("Ctrl+D / Ctrl+U", "Page down / up"));
    match section {
        Section::About | Section::Dashboard => {
            lines.push(binding("h / l", "Switch tabs"));
        }
        Section::Projects => {
            lines.push(binding("h / l", "Filter by tag"));
            lines.push(binding("Enter / Esc", "Open / close project"));
        }
        _ => {}
    }

    lines.push(Line::from(""));
    lines.push(heading("Commands"));
    lines.push(binding(": (colon)", "Command mode"));
    lines.push(binding(":act / :rev / :svc", "Switch section"));
    lines.push(binding(":project <id>", "Open a project"));
    lines.push(binding(":user <handle>", "Show another GitHub user"));
    lines.push(binding(":limit <n>", "Activity items to show"));
    lines.push(binding(":signout", "Forget the current session"));
    lines.push(binding(":q", "Quit"));

    lines.push(Line::from(""));
    lines.push(heading("General"));
    lines.push(binding("r / Ctrl+R", "Refresh section"));
    lines.push(binding("?", "Toggle this help"));

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(4));
    let modal_area = centered_rect(60, height, area);
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(" Help (? to close) ");

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, modal_area);
}

fn heading(title: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  {}", title),
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
    ))
}

fn binding<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("    {:<22}", key), Style::default().fg(theme::YELLOW)),
        Span::styled(desc, Style::default().fg(theme::TEXT)),
    ])
}

fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)])
        .flex(Flex::Center)
        .split(vertical[0]);
    horizontal[0]
}
