use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::domain::Review;
use crate::theme;
use crate::widgets::collection::{clamp_scroll, placeholder};

pub fn render(app: &App, frame: &mut Frame, area: Rect) {
    if app.reviews.is_loading() {
        placeholder(frame, area, "Loading reviews...");
        return;
    }

    let reviews = app.reviews.items_or(&app.content.sample_reviews);
    if reviews.is_empty() {
        placeholder(frame, area, "No reviews yet");
        return;
    }

    let lines = body_lines(reviews);
    let scroll = clamp_scroll(app.scroll, lines.len());
    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(widget, area);
}

pub fn line_count(app: &App) -> usize {
    body_lines(app.reviews.items_or(&app.content.sample_reviews)).len()
}

fn body_lines(reviews: &[Review]) -> Vec<Line<'static>> {
    reviews.iter().flat_map(review_lines).collect()
}

fn review_lines(review: &Review) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(format!(" {} ", review.stars()), Style::default().fg(theme::YELLOW)),
        Span::styled(
            review.reviewer_name.clone(),
            Style::default().fg(theme::TEXT).add_modifier(Modifier::BOLD),
        ),
    ];
    if let Some(project) = &review.project_name {
        header.push(Span::styled(
            format!("  on {}", project),
            Style::default().fg(theme::ACCENT),
        ));
    }

    vec![
        Line::from(header),
        Line::from(Span::styled(
            format!("   \"{}\"", review.content),
            Style::default().fg(theme::TEXT_DIM).add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
    ]
}
