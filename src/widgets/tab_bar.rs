use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::action::Section;
use crate::app::App;
use crate::session::Session;
use crate::tabs::{Category, TabSelector};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    let name = if app.content.profile.name.is_empty() {
        "folio"
    } else {
        app.content.profile.name.as_str()
    };
    let mut left_spans: Vec<Span> = vec![
        Span::styled(
            format!(" {} ", name),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("| ", Style::default().fg(theme::TEXT_MUTED)),
    ];

    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == app.section.active() {
            Style::default()
                .fg(theme::TEXT)
                .bg(theme::BG_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        left_spans.push(Span::styled(
            format!(" {} {} ", i + 1, section.label()),
            style,
        ));
    }

    let mut right_spans: Vec<Span> = Vec::new();
    match &app.session {
        Session::SignedIn { user_id, .. } => right_spans.push(Span::styled(
            format!("● {}", user_id),
            Style::default().fg(theme::GREEN),
        )),
        Session::Anonymous => right_spans.push(Span::styled(
            "○ guest",
            Style::default().fg(theme::TEXT_MUTED),
        )),
    }
    right_spans.push(Span::raw(" "));

    // Calculate widths and fill gap with spaces
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let right_width: usize = right_spans.iter().map(|s| s.width()).sum();
    let total_width = area.width as usize;
    let gap = total_width.saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    spans.push(Span::raw(" ".repeat(gap)));
    spans.extend(right_spans);

    let line = Line::from(spans);
    let widget = Paragraph::new(line).style(Style::default().bg(theme::BG_BAR));
    frame.render_widget(widget, area);
}

/// Inline row of inner tabs, highlighting the active one.
pub fn inner_tabs<C: Category>(selector: &TabSelector<C>) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, tab) in C::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(theme::TEXT_MUTED)));
        }
        let style = if *tab == selector.active() {
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(tab.label(), style));
    }
    Line::from(spans)
}
