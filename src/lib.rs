pub mod app;
pub mod auth;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod modules;
pub mod sync;
pub mod terminal;
pub mod views;

pub use infrastructure::config;
pub use modules::integrations::backend;
