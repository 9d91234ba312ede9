use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::app::{App, InputMode};
use crate::input::commands::{matching_commands, COMMANDS};
use crate::theme;

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }

    let mut spans = vec![
        Span::styled(":", Style::default().fg(theme::YELLOW)),
        Span::styled(&app.input_buffer, Style::default().fg(theme::TEXT)),
    ];

    // Ghost completion while the command word is still being typed
    if !app.input_buffer.is_empty() && !app.input_buffer.contains(' ') {
        let input_cmd = app.input_buffer.as_str();
        if let Some(cmd) = matching_commands(input_cmd).first() {
            if let Some(ghost) = cmd.name.strip_prefix(input_cmd) {
                if !ghost.is_empty() {
                    spans.push(Span::styled(ghost, Style::default().fg(theme::TEXT_MUTED)));
                }
            }
        }
    }

    spans.push(Span::styled("_", Style::default().fg(theme::TEXT_MUTED)));

    let widget = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme::BG_HIGHLIGHT));
    frame.render_widget(widget, area);
}

pub fn render_suggestions(app: &App, frame: &mut Frame, area: Rect) {
    if app.input_mode != InputMode::Command {
        return;
    }
    let bg = Style::default().bg(theme::BG_SURFACE);

    if app.input_buffer.contains(' ') {
        frame.render_widget(Paragraph::new("").style(bg), area);
        return;
    }

    let input_cmd = app.input_buffer.trim();
    let matches: Vec<_> = if input_cmd.is_empty() {
        COMMANDS.iter().collect()
    } else {
        matching_commands(input_cmd)
    };

    if matches.is_empty() {
        let widget = Paragraph::new(Line::from(Span::styled(
            " No matching commands",
            Style::default().fg(theme::TEXT_MUTED),
        )))
        .style(bg);
        frame.render_widget(widget, area);
        return;
    }

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, cmd) in matches.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", Style::default().fg(theme::TEXT_MUTED)));
        }
        let cmd_style = if i == 0 && !input_cmd.is_empty() {
            Style::default().fg(theme::CYAN)
        } else {
            Style::default().fg(theme::TEXT_DIM)
        };
        spans.push(Span::styled(format!(":{}", cmd.name), cmd_style));
        for alias in cmd.aliases {
            spans.push(Span::styled(
                format!("|{}", alias),
                Style::default().fg(theme::TEXT_MUTED),
            ));
        }
        spans.push(Span::styled(
            format!(" {}", cmd.description),
            Style::default().fg(theme::TEXT_MUTED),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg), area);
}
