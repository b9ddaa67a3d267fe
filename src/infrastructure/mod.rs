//! Infrastructure layer - Runtime plumbing
//!
//! This layer contains:
//! - Configuration loading (config)
//! - Shared HTTP client setup (http)
//! - Service wiring for the shell (state)

pub mod config;
pub mod http;
pub mod state;

pub use state::AppServices;
