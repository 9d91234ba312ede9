use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One entry of the public events feed, as the provider sends it.
#[derive(Debug, Clone, Deserialize)]
pub struct ActivityEvent {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    /// RFC 3339 timestamp. Kept raw so a malformed value degrades the
    /// rendered date instead of failing the whole feed.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub repo: RepoRef,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoRef {
    #[serde(default)]
    pub name: String,
}

impl ActivityEvent {
    pub fn kind(&self) -> EventKind {
        EventKind::from_tag(&self.event_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Push,
    PullRequest,
    IssueComment,
    Create,
    Other(String),
}

impl EventKind {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "PushEvent" => Self::Push,
            "PullRequestEvent" => Self::PullRequest,
            "IssueCommentEvent" => Self::IssueComment,
            "CreateEvent" => Self::Create,
            other => Self::Other(other.to_string()),
        }
    }
}

/// Display-ready form of an [`ActivityEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedActivity {
    pub action: String,
    pub repo: String,
    pub details: String,
    pub date: String,
    pub time: String,
}
