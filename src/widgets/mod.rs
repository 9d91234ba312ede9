pub mod about;
pub mod activity;
pub mod collection;
pub mod command_input;
pub mod dashboard;
pub mod error_toast;
pub mod footer;
pub mod help_overlay;
pub mod reviews;
pub mod services;
pub mod showcase;
pub mod tab_bar;
pub mod team;

use crate::action::Section;
use crate::app::App;

/// Number of scrollable rows the active section would render.
pub fn content_rows(app: &App) -> usize {
    match app.section.active() {
        Section::About => about::line_count(app),
        Section::Projects => showcase::line_count(app),
        Section::Activity => app.activity.items().len(),
        Section::Reviews => reviews::line_count(app),
        Section::Services => app.services.items().len(),
        Section::Team => team::line_count(app),
        Section::Dashboard => dashboard::row_count(app),
    }
}
