use std::sync::RwLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

use super::{ClientError, ClientResult, Gateway, Query};

/// REST client for a Supabase-style hosted backend: PostgREST under
/// `/rest/v1` and object storage under `/storage/v1`.
pub struct RestGateway {
    http: reqwest::Client,
    root: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl RestGateway {
    pub fn new(
        root: &str,
        anon_key: String,
        access_token: Option<String>,
        timeout: Duration,
    ) -> ClientResult<Self> {
        if !(root.starts_with("http://") || root.starts_with("https://")) {
            return Err(ClientError::ConfigError(format!(
                "gateway url must be http(s): {}",
                root
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("http client: {}", e)))?;

        tracing::info!("Using gateway at {}", root);

        Ok(Self {
            http,
            root: root.trim_end_matches('/').to_string(),
            anon_key,
            access_token: RwLock::new(access_token),
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.root, table)
    }

    fn object_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{}/{}", self.root, bucket, path)
    }

    fn bearer(&self) -> String {
        let token = self
            .access_token
            .read()
            .ok()
            .and_then(|guard| guard.clone())
            .unwrap_or_else(|| self.anon_key.clone());
        format!("Bearer {}", token)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, self.bearer())
    }
}

#[async_trait]
impl Gateway for RestGateway {
    async fn select(&self, query: &Query) -> ClientResult<Vec<Value>> {
        let request = self
            .http
            .get(self.table_url(query.table_name()))
            .query(&query.params());
        let response = check(self.authorize(request).send().await?).await?;
        json_rows(response).await
    }

    async fn insert(&self, table: &str, row: Value) -> ClientResult<Vec<Value>> {
        let request = self
            .http
            .post(self.table_url(table))
            .header("Prefer", "return=representation")
            .json(&row);
        let response = check(self.authorize(request).send().await?).await?;
        json_rows(response).await
    }

    async fn update(&self, query: &Query, patch: Value) -> ClientResult<()> {
        let filters = query.filter_params();
        if filters.is_empty() {
            return Err(ClientError::RequestFailed(format!(
                "refusing unfiltered update of {}",
                query.table_name()
            )));
        }
        let request = self
            .http
            .patch(self.table_url(query.table_name()))
            .query(&filters)
            .json(&patch);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> ClientResult<()> {
        let request = self
            .http
            .post(self.object_url(bucket, path))
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes);
        check(self.authorize(request).send().await?).await?;
        Ok(())
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/public/{}/{}", self.root, bucket, path)
    }

    fn set_access_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.write() {
            *guard = token;
        }
    }
}

async fn check(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!("gateway returned {}: {}", status, body);
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

async fn json_rows(response: Response) -> ClientResult<Vec<Value>> {
    let bytes = response.bytes().await?;
    if bytes.is_empty() {
        return Ok(vec![]);
    }
    match serde_json::from_slice::<Value>(&bytes)
        .map_err(|e| ClientError::ParseError(e.to_string()))?
    {
        Value::Array(rows) => Ok(rows),
        Value::Object(row) => Ok(vec![Value::Object(row)]),
        other => Err(ClientError::ParseError(format!(
            "expected rows, got {}",
            other
        ))),
    }
}

/// Stand-in used when no gateway url is configured. Every call fails with
/// a config error, which the loaders turn into empty collections.
pub struct OfflineGateway;

impl OfflineGateway {
    fn unavailable<T>() -> ClientResult<T> {
        Err(ClientError::ConfigError(
            "no gateway configured (set FOLIO_GATEWAY_URL)".to_string(),
        ))
    }
}

#[async_trait]
impl Gateway for OfflineGateway {
    async fn select(&self, _query: &Query) -> ClientResult<Vec<Value>> {
        Self::unavailable()
    }

    async fn insert(&self, _table: &str, _row: Value) -> ClientResult<Vec<Value>> {
        Self::unavailable()
    }

    async fn update(&self, _query: &Query, _patch: Value) -> ClientResult<()> {
        Self::unavailable()
    }

    async fn upload(
        &self,
        _bucket: &str,
        _path: &str,
        _bytes: Vec<u8>,
        _content_type: &str,
    ) -> ClientResult<()> {
        Self::unavailable()
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}", bucket, path)
    }

    fn set_access_token(&self, _token: Option<String>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway(token: Option<&str>) -> RestGateway {
        RestGateway::new(
            "https://project.example.co/",
            "anon".to_string(),
            token.map(str::to_string),
            Duration::from_secs(10),
        )
        .expect("gateway")
    }

    #[test]
    fn urls_are_rooted_without_double_slashes() {
        let gw = gateway(None);
        assert_eq!(
            gw.table_url("reviews"),
            "https://project.example.co/rest/v1/reviews"
        );
        assert_eq!(
            gw.public_url("project_files", "projects/p1/1.pdf"),
            "https://project.example.co/storage/v1/object/public/project_files/projects/p1/1.pdf"
        );
    }

    #[test]
    fn bearer_prefers_session_token_and_falls_back_to_anon_key() {
        let gw = gateway(Some("user-jwt"));
        assert_eq!(gw.bearer(), "Bearer user-jwt");

        gw.set_access_token(None);
        assert_eq!(gw.bearer(), "Bearer anon");
    }

    #[test]
    fn rejects_non_http_root() {
        assert!(matches!(
            RestGateway::new("ftp://x", String::new(), None, Duration::from_secs(1)),
            Err(ClientError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn offline_gateway_fails_with_config_error() {
        let result = OfflineGateway.select(&Query::table("services")).await;
        assert!(matches!(result, Err(ClientError::ConfigError(_))));
    }
}
