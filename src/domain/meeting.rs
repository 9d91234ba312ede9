use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub id: String,
    pub title: String,
    pub meeting_time: DateTime<Utc>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<i32>,
    #[serde(default)]
    pub meeting_link: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
