use crate::activity::ActivityTicket;
use crate::domain::*;
use crate::tabs::Category;

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    ScrollUp,
    ScrollDown,
    ScrollTop,
    ScrollBottom,
    PageUp,
    PageDown,
    Select,
    Back,

    // Vim chord
    EnterPendingG,

    // Section switching
    NextSection,
    PrevSection,
    SwitchSection(Section),

    // Tabs within a section
    NextTab,
    PrevTab,

    // UI
    OpenCommandInput,
    CloseOverlay,
    SubmitCommandInput(String),
    UpdateInputBuffer(String),
    ToggleHelp,

    // Data responses
    ActivityLoaded {
        ticket: ActivityTicket,
        result: Result<Vec<ActivityEvent>, String>,
    },
    ReviewsLoaded(Result<Vec<Review>, String>),
    ServicesLoaded(Result<Vec<Service>, String>),
    TeamLoaded(Result<Vec<TeamMember>, String>),
    ProjectsLoaded {
        generation: u64,
        result: Result<Vec<ClientProject>, String>,
    },
    MeetingsLoaded {
        generation: u64,
        result: Result<Vec<Meeting>, String>,
    },
    MessagesLoaded {
        generation: u64,
        result: Result<Vec<Message>, String>,
    },

    // App control
    Refresh,
    Quit,
    Tick,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    About,
    Projects,
    Activity,
    Reviews,
    Services,
    Team,
    Dashboard,
}

impl Category for Section {
    const ALL: &'static [Self] = &[
        Self::About,
        Self::Projects,
        Self::Activity,
        Self::Reviews,
        Self::Services,
        Self::Team,
        Self::Dashboard,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::About => "About",
            Self::Projects => "Projects",
            Self::Activity => "Activity",
            Self::Reviews => "Reviews",
            Self::Services => "Services",
            Self::Team => "Team",
            Self::Dashboard => "Dashboard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AboutTab {
    Skills,
    Experience,
    Education,
}

impl Category for AboutTab {
    const ALL: &'static [Self] = &[Self::Skills, Self::Experience, Self::Education];

    fn label(&self) -> &'static str {
        match self {
            Self::Skills => "Skills",
            Self::Experience => "Experience",
            Self::Education => "Education",
        }
    }
}
