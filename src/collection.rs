use std::fmt::Display;

use serde::de::DeserializeOwned;

use crate::client::{select_rows, Direction, Gateway, Query};

/// Lifecycle of a read-only gateway collection.
///
/// A failed load never reaches the user; it renders like [`Self::Empty`]
/// and the caller's fallback content is shown instead.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectionState<T> {
    NotLoaded,
    Loading,
    Loaded(Vec<T>),
    Empty,
    Failed,
}

impl<T> CollectionState<T> {
    pub fn from_result<E: Display>(what: &str, result: Result<Vec<T>, E>) -> Self {
        match result {
            Ok(rows) if rows.is_empty() => Self::Empty,
            Ok(rows) => Self::Loaded(rows),
            Err(e) => {
                tracing::warn!("Error fetching {}: {}", what, e);
                Self::Failed
            }
        }
    }

    pub fn needs_load(&self) -> bool {
        matches!(self, Self::NotLoaded)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn items(&self) -> &[T] {
        match self {
            Self::Loaded(rows) => rows,
            _ => &[],
        }
    }

    /// Loaded rows, or `fallback` once loading finished with nothing to show.
    pub fn items_or<'a>(&'a self, fallback: &'a [T]) -> &'a [T] {
        match self {
            Self::Loaded(rows) => rows,
            Self::Empty | Self::Failed => fallback,
            Self::NotLoaded | Self::Loading => &[],
        }
    }
}

/// Public collections shown on the landing sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Reviews,
    Services,
    Team,
}

impl Collection {
    pub fn label(self) -> &'static str {
        match self {
            Self::Reviews => "reviews",
            Self::Services => "services",
            Self::Team => "team members",
        }
    }

    pub fn query(self) -> Query {
        match self {
            Self::Reviews => Query::table("reviews")
                .eq("is_approved", true)
                .order("created_at", Direction::Desc),
            Self::Services => Query::table("services").order("created_at", Direction::Asc),
            Self::Team => Query::table("team_members").order("created_at", Direction::Asc),
        }
    }
}

/// One query, no retry.
pub async fn load<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    collection: Collection,
) -> Result<Vec<T>, String> {
    select_rows(gateway, &collection.query())
        .await
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_and_empty_fall_back_to_caller_content() {
        let fallback = vec!["sample"];

        let failed: CollectionState<&str> =
            CollectionState::from_result("reviews", Err::<Vec<&str>, _>("boom"));
        assert_eq!(failed, CollectionState::Failed);
        assert_eq!(failed.items_or(&fallback), &["sample"]);
        assert!(failed.items().is_empty());

        let empty: CollectionState<&str> = CollectionState::from_result("reviews", Ok::<_, String>(vec![]));
        assert_eq!(empty, CollectionState::Empty);
        assert_eq!(empty.items_or(&fallback), &["sample"]);
    }

    #[test]
    fn loaded_rows_win_over_fallback() {
        let loaded = CollectionState::from_result("reviews", Ok::<_, String>(vec!["real"]));
        assert_eq!(loaded.items_or(&["sample"]), &["real"]);
    }

    #[test]
    fn loading_shows_nothing() {
        let loading: CollectionState<&str> = CollectionState::Loading;
        assert!(loading.items_or(&["sample"]).is_empty());
        assert!(loading.is_loading());
        assert!(CollectionState::<&str>::NotLoaded.needs_load());
    }

    #[test]
    fn collection_queries_filter_and_order() {
        let reviews = Collection::Reviews.query().params();
        assert!(reviews.contains(&("is_approved".to_string(), "eq.true".to_string())));
        assert!(reviews.contains(&("order".to_string(), "created_at.desc".to_string())));

        let team = Collection::Team.query();
        assert_eq!(team.table_name(), "team_members");
        assert!(team
            .params()
            .contains(&("order".to_string(), "created_at.asc".to_string())));
    }
}
