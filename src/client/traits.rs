use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use super::query::Query;
use crate::domain::ActivityEvent;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("connection error: {0}")]
    ConnectionError(String),
    #[error("request failed with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
    #[error("config error: {0}")]
    ConfigError(String),
    #[error("timeout")]
    Timeout,
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::ConnectionError(err.to_string())
        } else if err.is_decode() {
            Self::ParseError(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Public activity feed of a third-party code host.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    async fn public_events(&self, user: &str, limit: u32) -> ClientResult<Vec<ActivityEvent>>;
}

/// Hosted relational store plus object storage. Rows travel as JSON so
/// the trait stays object-safe; use [`select_rows`] for typed reads.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn select(&self, query: &Query) -> ClientResult<Vec<Value>>;

    /// Inserts one row and returns the stored representation.
    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>>;

    /// Applies `patch` to every row matched by the query's filters.
    async fn update(&self, query: &Query, patch: Value) -> ClientResult<()>;

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<()>;

    fn public_url(&self, bucket: &str, path: &str) -> String;

    /// Replaces the bearer token sent with subsequent requests.
    fn set_access_token(&self, token: Option<String>);
}

pub async fn select_rows<T: DeserializeOwned>(
    gateway: &dyn Gateway,
    query: &Query,
) -> ClientResult<Vec<T>> {
    gateway
        .select(query)
        .await?
        .into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| {
                ClientError::ParseError(format!("{} row: {}", query.table_name(), e))
            })
        })
        .collect()
}
