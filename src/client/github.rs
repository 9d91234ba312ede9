use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::Url;

use super::{ActivitySource, ClientError, ClientResult};
use crate::domain::ActivityEvent;

pub const DEFAULT_GITHUB_API: &str = "https://api.github.com";

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

/// Unauthenticated client for the GitHub public events endpoint.
pub struct GithubClient {
    http: reqwest::Client,
    api_root: Url,
}

impl GithubClient {
    pub fn new(api_root: &str, timeout: Duration) -> ClientResult<Self> {
        let api_root = Url::parse(api_root)
            .map_err(|e| ClientError::ConfigError(format!("invalid GitHub API root: {}", e)))?;
        if api_root.cannot_be_a_base() {
            return Err(ClientError::ConfigError(format!(
                "invalid GitHub API root: {}",
                api_root
            )));
        }

        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::ConfigError(format!("http client: {}", e)))?;

        Ok(Self { http, api_root })
    }

    pub fn events_url(&self, user: &str, limit: u32) -> Url {
        let mut url = self.api_root.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["users", user, "events", "public"]);
        }
        url.query_pairs_mut()
            .append_pair("per_page", &limit.to_string());
        url
    }
}

#[async_trait]
impl ActivitySource for GithubClient {
    async fn public_events(&self, user: &str, limit: u32) -> ClientResult<Vec<ActivityEvent>> {
        let url = self.events_url(user, limit);
        tracing::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::ParseError(format!("events payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_url_appends_path_and_limit() {
        let client = GithubClient::new(DEFAULT_GITHUB_API, Duration::from_secs(10))
            .expect("client");
        assert_eq!(
            client.events_url("octocat", 4).as_str(),
            "https://api.github.com/users/octocat/events/public?per_page=4"
        );
    }

    #[test]
    fn events_url_keeps_api_prefix() {
        let client = GithubClient::new("https://ghe.example.com/api/v3/", Duration::from_secs(1))
            .expect("client");
        assert_eq!(
            client.events_url("a b", 5).as_str(),
            "https://ghe.example.com/api/v3/users/a%20b/events/public?per_page=5"
        );
    }

    #[test]
    fn rejects_unusable_root() {
        assert!(matches!(
            GithubClient::new("not a url", Duration::from_secs(1)),
            Err(ClientError::ConfigError(_))
        ));
    }
}
