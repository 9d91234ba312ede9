pub mod activity;
pub mod meeting;
pub mod message;
pub mod portfolio;
pub mod project;
pub mod review;
pub mod service;
pub mod team;
pub mod training;

pub use activity::*;
pub use meeting::*;
pub use message::*;
pub use portfolio::*;
pub use project::*;
pub use review::*;
pub use service::*;
pub use team::*;
pub use training::*;
