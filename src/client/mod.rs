#[cfg(test)]
pub mod fake;
pub mod gateway;
pub mod github;
pub mod query;
pub mod traits;

pub use gateway::{OfflineGateway, RestGateway};
pub use github::{GithubClient, DEFAULT_GITHUB_API};
pub use query::{Direction, Query};
pub use traits::*;
