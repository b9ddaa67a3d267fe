//! Domain layer - Pure client abstractions
//!
//! This layer makes NO network calls and spawns no tasks.
//! Only trait definitions and domain error types.

pub mod errors;
pub mod repositories;

pub use errors::{AuthError, NetworkError};
pub use repositories::*;
