pub mod config;
pub mod dataset;
pub mod error;

// External distance lookups
pub mod maps;

// Search pipeline
pub mod search;

// HTTP surface
pub mod api;

// Command-line interface
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
