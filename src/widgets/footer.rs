use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Section;
use crate::app::{App, InputMode};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let hints = match app.input_mode {
        InputMode::Command => vec![
            hint("Esc", "cancel"),
            hint("Tab", "complete"),
            hint("Enter", "execute"),
        ],
        InputMode::PendingG => vec![hint("g", "top")],
        InputMode::Normal => build_hints(app.section.active()),
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            key.as_str(),
            Style::default().fg(theme::ACCENT),
        ));
        spans.push(Span::styled(
            format!(":{}", desc),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    if !app.session.is_signed_in() && app.input_mode == InputMode::Normal {
        spans.push(Span::styled(
            "   sign in with FOLIO_USER_ID and FOLIO_ACCESS_TOKEN",
            Style::default().fg(theme::YELLOW),
        ));
    }

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_SURFACE));
    frame.render_widget(widget, area);
}

fn hint(key: &str, desc: &str) -> (String, String) {
    (key.to_string(), desc.to_string())
}

fn build_hints(section: Section) -> Vec<(String, String)> {
    let mut hints = vec![hint("Tab/1-7", "section"), hint("j/k", "scroll")];
    match section {
        Section::About | Section::Dashboard => hints.push(hint("h/l", "tabs")),
        Section::Projects => {
            hints.push(hint("h/l", "filter"));
            hints.push(hint("Enter", "open"));
        }
        _ => {}
    }
    if section != Section::About && section != Section::Projects {
        hints.push(hint("r", "refresh"));
    }
    hints.push(hint(":", "cmd"));
    hints.push(hint("?", "help"));
    hints.push(hint("q", "quit"));
    hints
}
