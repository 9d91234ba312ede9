//! Recent public activity for one handle, normalized for display.
//!
//! [`ActivityFeed`] holds the state of one fetch cycle. Each call to
//! [`ActivityFeed::request`] starts a new cycle and returns a ticket. The
//! caller performs the network call however it likes and hands the
//! outcome back to [`ActivityFeed::resolve`] together with that ticket.
//! Only the most recent ticket can change the feed, so a slow response
//! for an old handle never overwrites a newer one.

pub mod format;

use std::fmt::Display;

pub use format::{format_timestamp, normalize, TimeDisplay};

use crate::domain::{ActivityEvent, NormalizedActivity};

/// Message shown to the user when a fetch fails. Technical detail goes to
/// the log only.
pub const ACTIVITY_ERROR_MESSAGE: &str = "Failed to load GitHub activity. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityTicket {
    pub generation: u64,
    pub source_id: String,
    pub limit: u32,
}

#[derive(Debug, Clone)]
enum Phase {
    Pending,
    Ready(Vec<NormalizedActivity>),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct ActivityFeed {
    generation: u64,
    source: Option<(String, u32)>,
    phase: Phase,
    display: TimeDisplay,
}

impl ActivityFeed {
    pub fn new(display: TimeDisplay) -> Self {
        Self {
            generation: 0,
            source: None,
            phase: Phase::Pending,
            display,
        }
    }

    /// Starts a fetch cycle. Returns `None` without touching the feed when
    /// there is nothing to fetch.
    pub fn request(&mut self, source_id: &str, limit: u32) -> Option<ActivityTicket> {
        let source_id = source_id.trim();
        if source_id.is_empty() || limit == 0 {
            return None;
        }
        self.generation += 1;
        self.source = Some((source_id.to_string(), limit));
        self.phase = Phase::Pending;
        Some(ActivityTicket {
            generation: self.generation,
            source_id: source_id.to_string(),
            limit,
        })
    }

    /// Applies the outcome of `ticket`'s request. Returns `false` when the
    /// ticket is no longer current and the outcome was dropped.
    pub fn resolve<E: Display>(
        &mut self,
        ticket: &ActivityTicket,
        result: Result<Vec<ActivityEvent>, E>,
    ) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "dropping stale activity for {} (generation {} < {})",
                ticket.source_id,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.phase = match result {
            Ok(events) => Phase::Ready(
                events
                    .iter()
                    .take(ticket.limit as usize)
                    .map(|event| normalize(event, self.display))
                    .collect(),
            ),
            Err(e) => {
                tracing::warn!("Error fetching activity for {}: {}", ticket.source_id, e);
                Phase::Failed(ACTIVITY_ERROR_MESSAGE.to_string())
            }
        };
        true
    }

    /// Invalidates any in-flight request, as when the owning view goes away.
    pub fn detach(&mut self) {
        self.generation += 1;
        self.phase = Phase::Pending;
    }

    pub fn state(&self) -> FetchState {
        match self.phase {
            Phase::Pending => FetchState::Pending,
            Phase::Ready(_) => FetchState::Ready,
            Phase::Failed(_) => FetchState::Failed,
        }
    }

    pub fn items(&self) -> &[NormalizedActivity] {
        match &self.phase {
            Phase::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source.as_ref().map(|(id, _)| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn push_events(repo: &str, n: usize) -> Vec<ActivityEvent> {
        (0..n)
            .map(|i| {
                serde_json::from_value(json!({
                    "id": i.to_string(),
                    "type": "PushEvent",
                    "repo": { "name": repo },
                    "payload": { "commits": [1] },
                    "created_at": "2024-01-01T10:00:00Z"
                }))
                .expect("event")
            })
            .collect()
    }

    #[test]
    fn starts_pending() {
        let feed = ActivityFeed::new(TimeDisplay::Utc);
        assert_eq!(feed.state(), FetchState::Pending);
        assert!(feed.is_loading());
        assert!(feed.items().is_empty());
        assert!(feed.error().is_none());
    }

    #[test]
    fn empty_source_does_not_start_a_cycle() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        assert!(feed.request("", 5).is_none());
        assert!(feed.request("   ", 5).is_none());
        assert!(feed.source_id().is_none());
    }

    #[test]
    fn success_is_truncated_to_limit() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let ticket = feed.request("alice", 2).expect("ticket");

        assert!(feed.resolve::<String>(&ticket, Ok(push_events("alice/repo", 5))));

        assert_eq!(feed.state(), FetchState::Ready);
        assert!(!feed.is_loading());
        assert!(feed.error().is_none());
        assert_eq!(feed.items().len(), 2);
        for item in feed.items() {
            assert!(!item.action.is_empty());
            assert!(!item.repo.is_empty());
        }
    }

    #[test]
    fn failure_hides_technical_message() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let ticket = feed.request("alice", 4).expect("ticket");
        let raw = "request failed with status 403: rate limit exceeded";

        assert!(feed.resolve(&ticket, Err::<Vec<ActivityEvent>, _>(raw)));

        assert_eq!(feed.state(), FetchState::Failed);
        assert!(!feed.is_loading());
        assert!(feed.items().is_empty());
        let error = feed.error().expect("error");
        assert!(!error.is_empty());
        assert_ne!(error, raw);
        assert!(!error.contains("403"));
    }

    #[test]
    fn late_response_for_old_source_is_dropped() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let a = feed.request("a", 4).expect("ticket a");
        let b = feed.request("b", 4).expect("ticket b");

        assert!(feed.resolve::<String>(&b, Ok(push_events("b/repo", 1))));
        assert!(!feed.resolve::<String>(&a, Ok(push_events("a/repo", 3))));

        assert_eq!(feed.source_id(), Some("b"));
        assert_eq!(feed.items().len(), 1);
        assert_eq!(feed.items()[0].repo, "b/repo");
    }

    #[test]
    fn late_failure_for_old_source_is_dropped() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let a = feed.request("a", 4).expect("ticket a");
        let b = feed.request("b", 4).expect("ticket b");

        assert!(feed.resolve::<String>(&b, Ok(push_events("b/repo", 2))));
        assert!(!feed.resolve(&a, Err::<Vec<ActivityEvent>, _>("boom")));

        assert_eq!(feed.state(), FetchState::Ready);
        assert!(feed.error().is_none());
    }

    #[test]
    fn detach_ignores_in_flight_result() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let ticket = feed.request("alice", 4).expect("ticket");
        feed.detach();

        assert!(!feed.resolve::<String>(&ticket, Ok(push_events("alice/repo", 1))));
        assert!(feed.items().is_empty());
        assert_eq!(feed.state(), FetchState::Pending);
    }

    #[test]
    fn new_request_reenters_pending() {
        let mut feed = ActivityFeed::new(TimeDisplay::Utc);
        let first = feed.request("alice", 4).expect("ticket");
        feed.resolve(&first, Err::<Vec<ActivityEvent>, _>("down"));
        assert_eq!(feed.state(), FetchState::Failed);

        feed.request("alice", 4).expect("ticket");
        assert_eq!(feed.state(), FetchState::Pending);
        assert!(feed.error().is_none());
    }
}
