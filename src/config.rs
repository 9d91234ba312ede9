use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Deserialize;

use crate::activity::TimeDisplay;
use crate::app::MAX_ACTIVITY_LIMIT;
use crate::client::DEFAULT_GITHUB_API;

pub const DEFAULT_ACTIVITY_LIMIT: u32 = 4;
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

#[derive(Parser, Debug)]
#[command(name = "folio", about = "Terminal portfolio and freelance intake")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Base URL of the hosted data gateway
    #[arg(long, global = true, env = "FOLIO_GATEWAY_URL")]
    pub gateway_url: Option<String>,

    /// Public (anon) key for the gateway
    #[arg(long, global = true, env = "FOLIO_ANON_KEY")]
    pub anon_key: Option<String>,

    /// Signed-in user id
    #[arg(long, global = true, env = "FOLIO_USER_ID")]
    pub user_id: Option<String>,

    /// Access token for the signed-in user
    #[arg(long, global = true, env = "FOLIO_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// GitHub handle whose activity is shown
    #[arg(long, global = true, env = "FOLIO_GITHUB_USER")]
    pub github_user: Option<String>,

    /// GitHub API root
    #[arg(long, global = true, env = "FOLIO_GITHUB_API")]
    pub github_api: Option<String>,

    /// Number of activity items to show (1-100)
    #[arg(long, global = true, env = "FOLIO_ACTIVITY_LIMIT")]
    pub activity_limit: Option<u32>,

    /// HTTP timeout in seconds
    #[arg(long, global = true)]
    pub http_timeout: Option<u64>,

    /// Show activity times in local time instead of UTC
    #[arg(long, global = true)]
    pub local_time: bool,

    /// Portfolio content file (TOML)
    #[arg(long, global = true, env = "FOLIO_CONTENT")]
    pub content: Option<PathBuf>,

    /// Log file path
    #[arg(long, global = true, env = "FOLIO_LOG_FILE")]
    pub log_file: Option<String>,
}

/// Where tracing output goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    File(String),
    Stderr,
    Off,
}

impl Cli {
    /// `--log-file` wins. Subcommands otherwise log to stderr; the TUI owns
    /// the terminal, so it logs nowhere.
    pub fn log_target(&self) -> LogTarget {
        match (&self.log_file, &self.command) {
            (Some(path), _) => LogTarget::File(path.clone()),
            (None, Some(_)) => LogTarget::Stderr,
            (None, None) => LogTarget::Off,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print recent GitHub activity and exit
    Activity {
        /// Print normalized items as JSON
        #[arg(long)]
        json: bool,
    },
    /// Book a project (requires a signed-in user)
    Book(BookArgs),
    /// Request a training session
    Train(TrainArgs),
}

#[derive(Args, Debug)]
pub struct BookArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub description: String,

    #[arg(long)]
    pub requirements: Option<String>,

    /// software or hardware
    #[arg(long = "type", default_value = "software")]
    pub project_type: String,

    #[arg(long)]
    pub budget: Option<String>,

    /// Deadline as YYYY-MM-DD
    #[arg(long)]
    pub deadline: Option<NaiveDate>,

    /// File to attach
    #[arg(long)]
    pub attach: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TrainArgs {
    #[arg(long)]
    pub name: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub phone: Option<String>,

    /// One of the listed topics, or "Other (please specify)"
    #[arg(long)]
    pub topic: String,

    /// Topic text when choosing "Other (please specify)"
    #[arg(long)]
    pub other_topic: Option<String>,

    /// Comma-separated slots, e.g. weekday_morning,weekend_evening
    #[arg(long, value_delimiter = ',')]
    pub availability: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub gateway_url: Option<String>,
    pub anon_key: Option<String>,
    pub github_user: Option<String>,
    pub github_api: Option<String>,
    pub activity_limit: Option<u32>,
    pub http_timeout: Option<u64>,
    pub local_time: Option<bool>,
    pub content: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        Self::load_from(&config_dir.join("folio").join("config.toml"))
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(file) => Some(file),
            Err(e) => {
                tracing::warn!("Ignoring {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Effective settings: CLI and env first, then the config file, then defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub gateway_url: Option<String>,
    pub anon_key: String,
    pub user_id: Option<String>,
    pub access_token: Option<String>,
    /// `None` falls back to the handle in the portfolio content.
    pub github_user: Option<String>,
    pub github_api: String,
    pub activity_limit: u32,
    pub http_timeout: Duration,
    pub time_display: TimeDisplay,
    pub content: Option<PathBuf>,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: ConfigFile) -> Self {
        let activity_limit = cli
            .activity_limit
            .or(file.activity_limit)
            .unwrap_or(DEFAULT_ACTIVITY_LIMIT)
            .clamp(1, MAX_ACTIVITY_LIMIT);
        let local_time = cli.local_time || file.local_time.unwrap_or(false);

        Self {
            gateway_url: non_empty(cli.gateway_url.clone().or(file.gateway_url)),
            anon_key: cli.anon_key.clone().or(file.anon_key).unwrap_or_default(),
            user_id: cli.user_id.clone(),
            access_token: cli.access_token.clone(),
            github_user: non_empty(cli.github_user.clone().or(file.github_user)),
            github_api: cli
                .github_api
                .clone()
                .or(file.github_api)
                .unwrap_or_else(|| DEFAULT_GITHUB_API.to_string()),
            activity_limit,
            http_timeout: Duration::from_secs(
                cli.http_timeout
                    .or(file.http_timeout)
                    .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS)
                    .max(1),
            ),
            time_display: if local_time {
                TimeDisplay::Local
            } else {
                TimeDisplay::Utc
            },
            content: cli.content.clone().or(file.content),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
