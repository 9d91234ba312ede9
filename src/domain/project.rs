use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A freelance project booked by a client.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientProject {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub project_type: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub budget_range: Option<String>,
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub file_urls: Option<Value>,
}

impl ClientProject {
    pub fn status(&self) -> ProjectStatus {
        ProjectStatus::from_tag(self.status.as_deref().unwrap_or("pending"))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Pending,
    InProgress,
    Completed,
    Other(String),
}

impl ProjectStatus {
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Other(tag.to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Pending => "Pending".to_string(),
            Self::InProgress => "In Progress".to_string(),
            Self::Completed => "Completed".to_string(),
            Self::Other(tag) => tag.replace('_', " "),
        }
    }
}

/// Row sent when a client books a project.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub client_id: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    #[serde(rename = "type")]
    pub project_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    pub deadline: DateTime<Utc>,
    pub status: String,
    pub file_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_tags_map_to_variants() {
        assert_eq!(ProjectStatus::from_tag("pending"), ProjectStatus::Pending);
        assert_eq!(ProjectStatus::from_tag("IN_PROGRESS"), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::from_tag("completed"), ProjectStatus::Completed);
        assert_eq!(
            ProjectStatus::from_tag("on_hold").label(),
            "on hold".to_string()
        );
    }

    #[test]
    fn missing_status_reads_as_pending() {
        let project: ClientProject = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "title": "Site",
            "type": "software",
            "deadline": "2024-03-01T00:00:00+00:00"
        }))
        .expect("project row");
        assert_eq!(project.status(), ProjectStatus::Pending);
        assert!(project.deadline.is_some());
    }
}
