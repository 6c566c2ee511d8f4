//! HTTP API module.
//!
//! This module provides the HTTP server and console logging for the backend.

pub mod server;
pub mod logs;

pub use server::{router, serve, start_server, AppState};
pub use logs::*;
