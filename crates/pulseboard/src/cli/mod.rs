//! Terminal client for the dashboard REST API

pub mod client;
pub mod commands;
pub mod display;
pub mod export;
