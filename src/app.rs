use std::time::{Duration, Instant};

use crate::action::{AboutTab, Action, Section};
use crate::activity::{ActivityFeed, ActivityTicket, TimeDisplay};
use crate::collection::{Collection, CollectionState};
use crate::dashboard::{Dashboard, DashboardTab};
use crate::domain::*;
use crate::session::Session;
use crate::tabs::TabSelector;

pub const MAX_ACTIVITY_LIMIT: u32 = 100;

const ERROR_TOAST_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
    PendingG,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchActivity(ActivityTicket),
    LoadCollection(Collection),
    LoadDashboard { generation: u64, user_id: String },
    SignOut,
    Quit,
}

pub struct App {
    // View state
    pub section: TabSelector<Section>,
    pub about_tab: TabSelector<AboutTab>,
    pub dashboard_tab: TabSelector<DashboardTab>,
    /// 0 is "all", otherwise an index into `showcase_tags` plus one.
    pub showcase_filter: usize,
    /// Index into `filtered_showcase()`.
    pub showcase_cursor: usize,
    /// Id of the project shown in detail, if any.
    pub open_project: Option<String>,
    pub input_mode: InputMode,
    pub overlay: Overlay,
    pub scroll: u16,

    // Who is looking
    pub session: Session,

    // Static content
    pub content: Portfolio,
    pub showcase_tags: Vec<String>,

    // Activity feed
    pub github_user: String,
    pub activity_limit: u32,
    pub activity: ActivityFeed,

    // Gateway collections
    pub reviews: CollectionState<Review>,
    pub services: CollectionState<Service>,
    pub team: CollectionState<TeamMember>,
    pub dashboard: Dashboard,

    // Input
    pub input_buffer: String,

    // App
    pub should_quit: bool,
    pub last_error: Option<(String, Instant)>,
}

impl App {
    pub fn new(
        content: Portfolio,
        session: Session,
        github_user: String,
        activity_limit: u32,
        display: TimeDisplay,
    ) -> Self {
        let showcase_tags = content.showcase_tags();
        Self {
            section: TabSelector::new(),
            about_tab: TabSelector::new(),
            dashboard_tab: TabSelector::new(),
            showcase_filter: 0,
            showcase_cursor: 0,
            open_project: None,
            input_mode: InputMode::Normal,
            overlay: Overlay::None,
            scroll: 0,

            session,

            content,
            showcase_tags,

            github_user,
            activity_limit: activity_limit.clamp(1, MAX_ACTIVITY_LIMIT),
            activity: ActivityFeed::new(display),

            reviews: CollectionState::NotLoaded,
            services: CollectionState::NotLoaded,
            team: CollectionState::NotLoaded,
            dashboard: Dashboard::default(),

            input_buffer: String::new(),

            should_quit: false,
            last_error: None,
        }
    }

    /// Effects needed to show the initial section.
    pub fn start(&mut self) -> Vec<Effect> {
        self.enter_section(self.section.active())
    }

    pub fn update(&mut self, action: Action) -> Vec<Effect> {
        // Clear stale error toasts
        if let Some((_, at)) = &self.last_error {
            if at.elapsed() > ERROR_TOAST_TTL {
                self.last_error = None;
            }
        }

        match action {
            // Navigation
            Action::ScrollUp => {
                if self.browsing_showcase() {
                    self.showcase_cursor = self.showcase_cursor.saturating_sub(1);
                } else {
                    self.scroll = self.scroll.saturating_sub(1);
                }
                vec![]
            }
            Action::ScrollDown => {
                if self.browsing_showcase() {
                    self.move_showcase_cursor(1);
                } else {
                    self.scroll = self.scroll.saturating_add(1).min(self.max_scroll());
                }
                vec![]
            }
            Action::ScrollTop => {
                if self.browsing_showcase() {
                    self.showcase_cursor = 0;
                } else {
                    self.scroll = 0;
                }
                self.input_mode = InputMode::Normal;
                vec![]
            }
            Action::ScrollBottom => {
                if self.browsing_showcase() {
                    self.move_showcase_cursor(usize::MAX);
                } else {
                    self.scroll = self.max_scroll();
                }
                vec![]
            }
            Action::PageUp => {
                if self.browsing_showcase() {
                    self.showcase_cursor = self
                        .showcase_cursor
                        .saturating_sub(self.page_height() as usize);
                } else {
                    self.scroll = self.scroll.saturating_sub(self.page_height());
                }
                vec![]
            }
            Action::PageDown => {
                if self.browsing_showcase() {
                    self.move_showcase_cursor(self.page_height() as usize);
                } else {
                    self.scroll = self
                        .scroll
                        .saturating_add(self.page_height())
                        .min(self.max_scroll());
                }
                vec![]
            }
            Action::Select => {
                if self.browsing_showcase() {
                    let selected = self
                        .filtered_showcase()
                        .get(self.showcase_cursor)
                        .map(|project| project.id.clone());
                    if let Some(id) = selected {
                        self.show_project(id);
                    }
                }
                vec![]
            }
            Action::Back => {
                if self.open_project.take().is_some() {
                    self.scroll = 0;
                }
                vec![]
            }

            // Vim chord
            Action::EnterPendingG => {
                self.input_mode = InputMode::PendingG;
                vec![]
            }

            // Sections
            Action::NextSection => {
                let mut next = self.section.clone();
                next.next();
                self.switch_section(next.active())
            }
            Action::PrevSection => {
                let mut prev = self.section.clone();
                prev.prev();
                self.switch_section(prev.active())
            }
            Action::SwitchSection(section) => self.switch_section(section),

            // Tabs within a section
            Action::NextTab => {
                self.cycle_tab(true);
                vec![]
            }
            Action::PrevTab => {
                self.cycle_tab(false);
                vec![]
            }

            // UI
            Action::OpenCommandInput => {
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
                vec![]
            }
            Action::CloseOverlay => {
                if self.overlay != Overlay::None {
                    self.overlay = Overlay::None;
                } else if self.input_mode != InputMode::Normal {
                    self.input_mode = InputMode::Normal;
                    self.input_buffer.clear();
                }
                vec![]
            }
            Action::SubmitCommandInput(cmd) => {
                self.input_mode = InputMode::Normal;
                let effects = self.execute_command(&cmd);
                self.input_buffer.clear();
                effects
            }
            Action::UpdateInputBuffer(buf) => {
                self.input_buffer = buf;
                vec![]
            }
            Action::ToggleHelp => {
                self.overlay = if self.overlay == Overlay::Help {
                    Overlay::None
                } else {
                    Overlay::Help
                };
                vec![]
            }

            // Data responses
            Action::ActivityLoaded { ticket, result } => {
                self.activity.resolve(&ticket, result);
                vec![]
            }
            Action::ReviewsLoaded(result) => {
                if self.reviews.is_loading() {
                    self.reviews = CollectionState::from_result(Collection::Reviews.label(), result);
                }
                vec![]
            }
            Action::ServicesLoaded(result) => {
                if self.services.is_loading() {
                    self.services = CollectionState::from_result(Collection::Services.label(), result);
                }
                vec![]
            }
            Action::TeamLoaded(result) => {
                if self.team.is_loading() {
                    self.team = CollectionState::from_result(Collection::Team.label(), result);
                }
                vec![]
            }
            Action::ProjectsLoaded { generation, result } => {
                if self.dashboard.is_current(generation) {
                    self.dashboard.projects = CollectionState::from_result("projects", result);
                }
                vec![]
            }
            Action::MeetingsLoaded { generation, result } => {
                if self.dashboard.is_current(generation) {
                    self.dashboard.meetings = CollectionState::from_result("meetings", result);
                }
                vec![]
            }
            Action::MessagesLoaded { generation, result } => {
                if self.dashboard.is_current(generation) {
                    self.dashboard.messages = CollectionState::from_result("messages", result);
                }
                vec![]
            }

            // App control
            Action::Refresh => self.refresh_current_section(),
            Action::Quit => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            Action::Tick => vec![],
        }
    }

    fn switch_section(&mut self, section: Section) -> Vec<Effect> {
        let previous = self.section.active();
        if !self.section.select(section) {
            return vec![];
        }
        self.leave_section(previous);
        self.scroll = 0;
        self.enter_section(section)
    }

    fn leave_section(&mut self, section: Section) {
        match section {
            Section::Activity => self.activity.detach(),
            Section::Projects => self.open_project = None,
            _ => {}
        }
    }

    fn enter_section(&mut self, section: Section) -> Vec<Effect> {
        match section {
            Section::About | Section::Projects => vec![],
            Section::Activity => self.request_activity(),
            Section::Reviews => {
                if self.reviews.needs_load() {
                    self.reviews = CollectionState::Loading;
                    return vec![Effect::LoadCollection(Collection::Reviews)];
                }
                vec![]
            }
            Section::Services => {
                if self.services.needs_load() {
                    self.services = CollectionState::Loading;
                    return vec![Effect::LoadCollection(Collection::Services)];
                }
                vec![]
            }
            Section::Team => {
                if self.team.needs_load() {
                    self.team = CollectionState::Loading;
                    return vec![Effect::LoadCollection(Collection::Team)];
                }
                vec![]
            }
            Section::Dashboard => {
                if self.dashboard.needs_load() {
                    return self.load_dashboard();
                }
                vec![]
            }
        }
    }

    fn request_activity(&mut self) -> Vec<Effect> {
        match self.activity.request(&self.github_user, self.activity_limit) {
            Some(ticket) => vec![Effect::FetchActivity(ticket)],
            None => vec![],
        }
    }

    fn load_dashboard(&mut self) -> Vec<Effect> {
        let Some(user_id) = self.session.user_id().map(str::to_string) else {
            return vec![];
        };
        let generation = self.dashboard.begin();
        vec![Effect::LoadDashboard {
            generation,
            user_id,
        }]
    }

    fn refresh_current_section(&mut self) -> Vec<Effect> {
        match self.section.active() {
            Section::About | Section::Projects => vec![],
            Section::Activity => self.request_activity(),
            Section::Reviews => {
                self.reviews = CollectionState::NotLoaded;
                self.enter_section(Section::Reviews)
            }
            Section::Services => {
                self.services = CollectionState::NotLoaded;
                self.enter_section(Section::Services)
            }
            Section::Team => {
                self.team = CollectionState::NotLoaded;
                self.enter_section(Section::Team)
            }
            Section::Dashboard => self.load_dashboard(),
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let changed = match self.section.active() {
            Section::About => {
                if forward {
                    self.about_tab.next()
                } else {
                    self.about_tab.prev()
                }
            }
            Section::Dashboard => {
                if forward {
                    self.dashboard_tab.next()
                } else {
                    self.dashboard_tab.prev()
                }
            }
            Section::Projects => {
                let options = self.showcase_tags.len() + 1;
                self.showcase_filter = if forward {
                    (self.showcase_filter + 1) % options
                } else {
                    (self.showcase_filter + options - 1) % options
                };
                self.showcase_cursor = 0;
                self.open_project = None;
                true
            }
            _ => false,
        };
        if changed {
            self.scroll = 0;
        }
    }

    fn execute_command(&mut self, cmd: &str) -> Vec<Effect> {
        let parts: Vec<&str> = cmd.trim().splitn(2, ' ').collect();
        let command = parts[0].to_lowercase();
        let args = parts.get(1).map(|s| s.trim()).filter(|s| !s.is_empty());

        if let Some(section) = section_for_command(&command) {
            return self.switch_section(section);
        }

        match command.as_str() {
            "user" | "gh" => match args {
                Some(handle) => {
                    self.github_user = handle.to_string();
                    if self.section.active() == Section::Activity {
                        return self.request_activity();
                    }
                    vec![]
                }
                None => {
                    self.show_error("usage: :user <github-handle>".to_string());
                    vec![]
                }
            },
            "project" => match args {
                Some(id) => {
                    if self.content.project(id).is_none() {
                        self.show_error(format!("project not found: {}", id));
                        return vec![];
                    }
                    let effects = self.switch_section(Section::Projects);
                    self.show_project(id.to_string());
                    effects
                }
                None => {
                    self.show_error("usage: :project <id>".to_string());
                    vec![]
                }
            },
            "limit" => match args.and_then(|n| n.parse::<u32>().ok()) {
                Some(n) if (1..=MAX_ACTIVITY_LIMIT).contains(&n) => {
                    self.activity_limit = n;
                    if self.section.active() == Section::Activity {
                        return self.request_activity();
                    }
                    vec![]
                }
                _ => {
                    self.show_error(format!("usage: :limit <1-{}>", MAX_ACTIVITY_LIMIT));
                    vec![]
                }
            },
            "signout" | "logout" => {
                if !self.session.is_signed_in() {
                    self.show_error("not signed in".to_string());
                    return vec![];
                }
                self.session.sign_out();
                self.dashboard.reset();
                tracing::info!("Signed out");
                vec![Effect::SignOut]
            }
            "quit" | "q" => {
                self.should_quit = true;
                vec![Effect::Quit]
            }
            "help" | "h" => {
                self.overlay = Overlay::Help;
                vec![]
            }
            _ => {
                self.show_error(format!("unknown command: {}", command));
                vec![]
            }
        }
    }

    fn show_error(&mut self, msg: String) {
        self.last_error = Some((msg, Instant::now()));
    }

    fn page_height(&self) -> u16 {
        20
    }

    /// Last scroll offset that still shows content in the active section.
    fn max_scroll(&self) -> u16 {
        let rows = crate::widgets::content_rows(self);
        rows.saturating_sub(1).min(u16::MAX as usize) as u16
    }

    fn browsing_showcase(&self) -> bool {
        self.section.active() == Section::Projects && self.open_project.is_none()
    }

    fn move_showcase_cursor(&mut self, by: usize) {
        let last = self.filtered_showcase().len().saturating_sub(1);
        self.showcase_cursor = self.showcase_cursor.saturating_add(by).min(last);
    }

    fn show_project(&mut self, id: String) {
        self.open_project = Some(id);
        self.scroll = 0;
    }

    /// The project shown in detail, if its id is still in the content.
    pub fn selected_project(&self) -> Option<&Showcase> {
        self.open_project
            .as_deref()
            .and_then(|id| self.content.project(id))
    }

    /// Showcase entries matching the active tag filter.
    pub fn filtered_showcase(&self) -> Vec<&Showcase> {
        match self.active_showcase_tag() {
            None => self.content.showcase.iter().collect(),
            Some(tag) => self
                .content
                .showcase
                .iter()
                .filter(|project| project.tags.iter().any(|t| t == tag))
                .collect(),
        }
    }

    pub fn active_showcase_tag(&self) -> Option<&str> {
        self.showcase_filter
            .checked_sub(1)
            .and_then(|idx| self.showcase_tags.get(idx))
            .map(String::as_str)
    }
}

fn section_for_command(command: &str) -> Option<Section> {
    match command {
        "about" => Some(Section::About),
        "projects" | "proj" => Some(Section::Projects),
        "activity" | "act" => Some(Section::Activity),
        "reviews" | "rev" => Some(Section::Reviews),
        "services" | "svc" => Some(Section::Services),
        "team" => Some(Section::Team),
        "dashboard" | "dash" => Some(Section::Dashboard),
        _ => None,
    }
}
