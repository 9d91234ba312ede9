//! In-memory client fakes for unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::{ActivitySource, ClientError, ClientResult, Gateway, Query};
use crate::domain::ActivityEvent;

/// Gateway fake answering selects from canned rows per table and
/// recording every call. Calls on `fail_tables` fail, as do uploads when
/// `fail_uploads` is set.
#[derive(Default)]
pub struct FakeGateway {
    pub rows: Mutex<Vec<(String, Vec<Value>)>>,
    pub selects: Mutex<Vec<Query>>,
    pub inserts: Mutex<Vec<(String, Value)>>,
    pub updates: Mutex<Vec<(Query, Value)>>,
    pub uploads: Mutex<Vec<(String, String, usize)>>,
    pub fail_tables: Vec<String>,
    pub fail_uploads: bool,
}

impl FakeGateway {
    pub fn with_rows(tables: &[(&str, Value)]) -> Self {
        let rows = tables
            .iter()
            .map(|(table, value)| {
                let rows = value.as_array().cloned().unwrap_or_default();
                (table.to_string(), rows)
            })
            .collect();
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn failing(mut self, table: &str) -> Self {
        self.fail_tables.push(table.to_string());
        self
    }

    fn table_rows(&self, table: &str) -> Vec<Value> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == table)
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Gateway for FakeGateway {
    async fn select(&self, query: &Query) -> ClientResult<Vec<Value>> {
        self.selects.lock().unwrap().push(query.clone());
        if self.fail_tables.iter().any(|t| t == query.table_name()) {
            return Err(ClientError::Status {
                status: 500,
                body: "boom".to_string(),
            });
        }
        Ok(self.table_rows(query.table_name()))
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>> {
        self.inserts
            .lock()
            .unwrap()
            .push((table.to_string(), row.clone()));
        if self.fail_tables.iter().any(|t| t == table) {
            return Err(ClientError::Status {
                status: 400,
                body: "bad row".to_string(),
            });
        }
        let mut stored = row;
        if let Value::Object(ref mut map) = stored {
            map.entry("id").or_insert(json!("generated-id"));
        }
        Ok(vec![stored])
    }

    async fn update(&self, query: &Query, patch: Value) -> ClientResult<()> {
        self.updates.lock().unwrap().push((query.clone(), patch));
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> ClientResult<()> {
        self.uploads
            .lock()
            .unwrap()
            .push((bucket.to_string(), path.to_string(), bytes.len()));
        if self.fail_uploads {
            return Err(ClientError::Status {
                status: 413,
                body: "Payload too large".to_string(),
            });
        }
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("https://files.test/{}/{}", bucket, path)
    }

    fn set_access_token(&self, _token: Option<String>) {}
}

/// Activity source answering from canned events per handle. Unknown
/// handles fail with a 404.
#[derive(Default)]
pub struct FakeActivitySource {
    pub events: HashMap<String, Vec<Value>>,
    pub calls: Mutex<Vec<(String, u32)>>,
}

impl FakeActivitySource {
    pub fn with_events(user: &str, events: Value) -> Self {
        let mut map = HashMap::new();
        map.insert(
            user.to_string(),
            events.as_array().cloned().unwrap_or_default(),
        );
        Self {
            events: map,
            ..Self::default()
        }
    }
}

#[async_trait]
impl ActivitySource for FakeActivitySource {
    async fn public_events(&self, user: &str, limit: u32) -> ClientResult<Vec<ActivityEvent>> {
        self.calls.lock().unwrap().push((user.to_string(), limit));
        let Some(raw) = self.events.get(user) else {
            return Err(ClientError::Status {
                status: 404,
                body: "Not Found".to_string(),
            });
        };
        raw.iter()
            .map(|event| {
                serde_json::from_value(event.clone())
                    .map_err(|e| ClientError::ParseError(e.to_string()))
            })
            .collect()
    }
}
