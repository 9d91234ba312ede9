pub mod action;
pub mod activity;
pub mod app;
pub mod client;
pub mod collection;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod event;
pub mod headless;
pub mod input;
pub mod intake;
pub mod session;
pub mod tabs;
pub mod theme;
pub mod tui;
pub mod widgets;
pub mod worker;
