//! CLI module
//!
//! Provides:
//! - Argument parsing (configuration overrides only)
//! - Settings resolution (flag → env → config file → default)
//! - Log file setup

pub mod args;
pub mod config;
pub mod logging;

// Re-exports
pub use args::Args;
pub use config::{FileConfig, Settings};
pub use logging::init_logging;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid URL (expected http:// or https://): {0}")]
    InvalidUrl(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Exit code for configuration problems
pub const EXIT_CONFIG_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
