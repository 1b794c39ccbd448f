//! Application service layer - config, scenarios, scan sessions

pub mod app;
pub mod config;
pub mod scenario;
