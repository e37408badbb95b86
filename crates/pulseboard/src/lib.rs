//! Pulseboard
//!
//! REST server for the project health dashboard and the terminal client that
//! consumes it.

pub mod cli;
pub mod config;
pub mod server;
