use chrono::{DateTime, Local, TimeZone, Utc};
use serde_json::Value;

use crate::domain::{ActivityEvent, EventKind, NormalizedActivity};

/// Zone used when rendering event timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDisplay {
    #[default]
    Utc,
    Local,
}

const UNKNOWN_REPO: &str = "(unknown repository)";

pub fn normalize(event: &ActivityEvent, display: TimeDisplay) -> NormalizedActivity {
    let payload = event.payload.as_ref();
    let (action, details) = describe(&event.kind(), payload);
    let (date, time) = format_timestamp(&event.created_at, display);

    let repo = if event.repo.name.trim().is_empty() {
        UNKNOWN_REPO.to_string()
    } else {
        event.repo.name.clone()
    };

    NormalizedActivity {
        action,
        repo,
        details,
        date,
        time,
    }
}

fn describe(kind: &EventKind, payload: Option<&Value>) -> (String, String) {
    match kind {
        EventKind::Push => {
            let details = match commit_count(payload) {
                0 => String::new(),
                n => format!("{} commit(s)", n),
            };
            ("pushed to".to_string(), details)
        }
        EventKind::PullRequest => {
            let verb = text_at(payload, &["action"]).unwrap_or("updated");
            (
                format!("{} pull request in", verb),
                text_at(payload, &["pull_request", "title"])
                    .unwrap_or_default()
                    .to_string(),
            )
        }
        EventKind::IssueComment => (
            "commented on issue in".to_string(),
            text_at(payload, &["issue", "title"])
                .unwrap_or_default()
                .to_string(),
        ),
        EventKind::Create => (
            format!(
                "created {}",
                text_at(payload, &["ref_type"]).unwrap_or("repository")
            ),
            text_at(payload, &["ref"]).unwrap_or_default().to_string(),
        ),
        EventKind::Other(_) => ("acted on".to_string(), String::new()),
    }
}

fn commit_count(payload: Option<&Value>) -> u64 {
    let Some(payload) = payload else {
        return 0;
    };
    payload
        .get("commits")
        .and_then(Value::as_array)
        .map(|commits| commits.len() as u64)
        .filter(|n| *n > 0)
        .or_else(|| payload.get("size").and_then(Value::as_u64))
        .unwrap_or(0)
}

fn text_at<'a>(payload: Option<&'a Value>, path: &[&str]) -> Option<&'a str> {
    let mut node = payload?;
    for key in path {
        node = node.get(key)?;
    }
    node.as_str().filter(|s| !s.is_empty())
}

/// `M/D/YYYY` and `h:mm:ss AM|PM`. Unparseable input renders as blanks.
pub fn format_timestamp(raw: &str, display: TimeDisplay) -> (String, String) {
    let Ok(parsed) = DateTime::parse_from_rfc3339(raw) else {
        if !raw.is_empty() {
            tracing::debug!("unparseable event timestamp: {}", raw);
        }
        return (String::new(), String::new());
    };
    match display {
        TimeDisplay::Utc => render(parsed.with_timezone(&Utc)),
        TimeDisplay::Local => render(parsed.with_timezone(&Local)),
    }
}

fn render<Tz: TimeZone>(at: DateTime<Tz>) -> (String, String)
where
    Tz::Offset: std::fmt::Display,
{
    (
        at.format("%-m/%-d/%Y").to_string(),
        at.format("%-I:%M:%S %p").to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(value: Value) -> ActivityEvent {
        serde_json::from_value(value).expect("event")
    }

    #[test]
    fn push_event_end_to_end() {
        let normalized = normalize(
            &event(json!({
                "type": "PushEvent",
                "repo": { "name": "alice/repo" },
                "payload": { "commits": [1, 2, 3] },
                "created_at": "2024-01-01T10:00:00Z"
            })),
            TimeDisplay::Utc,
        );

        assert_eq!(
            normalized,
            NormalizedActivity {
                action: "pushed to".to_string(),
                repo: "alice/repo".to_string(),
                details: "3 commit(s)".to_string(),
                date: "1/1/2024".to_string(),
                time: "10:00:00 AM".to_string(),
            }
        );
    }

    #[test]
    fn push_without_commits_has_no_details() {
        let normalized = normalize(
            &event(json!({
                "type": "PushEvent",
                "repo": { "name": "alice/repo" },
                "payload": { "commits": [] },
                "created_at": "2024-06-30T23:05:09Z"
            })),
            TimeDisplay::Utc,
        );
        assert_eq!(normalized.details, "");
        assert_eq!(normalized.date, "6/30/2024");
        assert_eq!(normalized.time, "11:05:09 PM");
    }

    #[test]
    fn pull_request_uses_action_and_title() {
        let normalized = normalize(
            &event(json!({
                "type": "PullRequestEvent",
                "repo": { "name": "alice/repo" },
                "payload": { "action": "opened", "pull_request": { "title": "Add docs" } },
                "created_at": "2024-01-01T00:00:00Z"
            })),
            TimeDisplay::Utc,
        );
        assert_eq!(normalized.action, "opened pull request in");
        assert_eq!(normalized.details, "Add docs");
        assert_eq!(normalized.time, "12:00:00 AM");
    }

    #[test]
    fn issue_comment_uses_issue_title() {
        let normalized = normalize(
            &event(json!({
                "type": "IssueCommentEvent",
                "repo": { "name": "bob/lib" },
                "payload": { "issue": { "title": "Crash on start" } },
                "created_at": "2024-01-01T00:00:00Z"
            })),
            TimeDisplay::Utc,
        );
        assert_eq!(normalized.action, "commented on issue in");
        assert_eq!(normalized.details, "Crash on start");
    }

    #[test]
    fn create_defaults_to_repository() {
        let branch = normalize(
            &event(json!({
                "type": "CreateEvent",
                "repo": { "name": "bob/lib" },
                "payload": { "ref_type": "branch", "ref": "feature-x" },
                "created_at": "2024-01-01T00:00:00Z"
            })),
            TimeDisplay::Utc,
        );
        assert_eq!(branch.action, "created branch");
        assert_eq!(branch.details, "feature-x");

        let repo = normalize(
            &event(json!({
                "type": "CreateEvent",
                "repo": { "name": "bob/lib" },
                "payload": { "ref": null },
                "created_at": "2024-01-01T00:00:00Z"
            })),
            TimeDisplay::Utc,
        );
        assert_eq!(repo.action, "created repository");
        assert_eq!(repo.details, "");
    }

    #[test]
    fn unknown_and_empty_types_fall_back_to_other() {
        for tag in ["WatchEvent", ""] {
            let normalized = normalize(
                &event(json!({
                    "type": tag,
                    "repo": { "name": "carol/site" },
                    "created_at": "2024-01-01T00:00:00Z"
                })),
                TimeDisplay::Utc,
            );
            assert_eq!(normalized.action, "acted on");
            assert_eq!(normalized.details, "");
            assert_eq!(normalized.repo, "carol/site");
        }
    }

    #[test]
    fn malformed_timestamp_and_missing_repo_do_not_fail() {
        let normalized = normalize(
            &event(json!({ "type": "PushEvent", "created_at": "yesterday" })),
            TimeDisplay::Utc,
        );
        assert_eq!(normalized.date, "");
        assert_eq!(normalized.time, "");
        assert!(!normalized.repo.is_empty());
        assert!(!normalized.action.is_empty());
    }
}
