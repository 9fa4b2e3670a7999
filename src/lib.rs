pub mod api;
pub mod app;
pub mod core;
pub mod domain;
pub mod error;
pub mod logging;
pub mod messages;
pub mod oauth;
pub mod ui;
