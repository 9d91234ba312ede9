use chrono::{DateTime, SecondsFormat, Utc};
use serde::Deserialize;

use crate::client::{select_rows, ClientResult, Direction, Gateway, Query};
use crate::collection::CollectionState;
use crate::domain::{ClientProject, Meeting, Message};
use crate::tabs::Category;

pub const RECENT_MESSAGE_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardTab {
    Projects,
    Meetings,
    Messages,
}

impl Category for DashboardTab {
    const ALL: &'static [Self] = &[Self::Projects, Self::Meetings, Self::Messages];

    fn label(&self) -> &'static str {
        match self {
            Self::Projects => "Projects",
            Self::Meetings => "Meetings",
            Self::Messages => "Messages",
        }
    }
}

/// The signed-in owner's projects, upcoming meetings and recent messages.
/// `generation` changes whenever the session does, so loads started for a
/// previous session are discarded.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub generation: u64,
    pub projects: CollectionState<ClientProject>,
    pub meetings: CollectionState<Meeting>,
    pub messages: CollectionState<Message>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            generation: 0,
            projects: CollectionState::NotLoaded,
            meetings: CollectionState::NotLoaded,
            messages: CollectionState::NotLoaded,
        }
    }
}

impl Dashboard {
    pub fn needs_load(&self) -> bool {
        self.projects.needs_load()
    }

    /// Marks every list loading and returns the generation to tag loads with.
    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.projects = CollectionState::Loading;
        self.meetings = CollectionState::Loading;
        self.messages = CollectionState::Loading;
        self.generation
    }

    pub fn reset(&mut self) {
        let generation = self.generation + 1;
        *self = Self {
            generation,
            ..Self::default()
        };
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

pub fn projects_query(user_id: &str) -> Query {
    Query::table("projects")
        .eq("client_id", user_id)
        .order("created_at", Direction::Desc)
}

pub fn meetings_query(user_id: &str, now: DateTime<Utc>) -> Query {
    Query::table("meetings")
        .eq("client_id", user_id)
        .gte(
            "meeting_time",
            now.to_rfc3339_opts(SecondsFormat::Secs, true),
        )
        .order("meeting_time", Direction::Asc)
}

pub async fn load_projects(gateway: &dyn Gateway, user_id: &str) -> ClientResult<Vec<ClientProject>> {
    select_rows(gateway, &projects_query(user_id)).await
}

pub async fn load_upcoming_meetings(
    gateway: &dyn Gateway,
    user_id: &str,
    now: DateTime<Utc>,
) -> ClientResult<Vec<Meeting>> {
    select_rows(gateway, &meetings_query(user_id, now)).await
}

#[derive(Deserialize)]
struct ProjectId {
    id: String,
}

/// Newest messages across all of the user's projects.
pub async fn load_recent_messages(
    gateway: &dyn Gateway,
    user_id: &str,
) -> ClientResult<Vec<Message>> {
    let ids: Vec<ProjectId> = select_rows(
        gateway,
        &Query::table("projects").select("id").eq("client_id", user_id),
    )
    .await?;
    if ids.is_empty() {
        return Ok(vec![]);
    }

    let ids: Vec<String> = ids.into_iter().map(|p| p.id).collect();
    let query = Query::table("messages")
        .in_list("project_id", &ids)
        .order("created_at", Direction::Desc)
        .limit(RECENT_MESSAGE_LIMIT);
    select_rows(gateway, &query).await
}
