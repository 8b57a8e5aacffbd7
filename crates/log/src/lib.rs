//! # depwarn-log
//!
//! Logging setup for depwarn binaries and log capture for tests.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> depwarn_log::LogResult<()> {
//!     // DEPWARN_LOG / RUST_LOG, else a preset for the build profile
//!     depwarn_log::auto_init()?;
//!
//!     tracing::warn!(path = "server.port", "This field will be removed in a future version");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
pub mod capture;
mod config;
mod error;
mod writer;

// Public API
pub use builder::LoggerBuilder;
pub use capture::{LogCapture, capture_dispatch};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

// ============================================================================
// Initialization Functions
// ============================================================================

/// Auto-detect and initialize the best logging configuration
pub fn auto_init() -> LogResult<()> {
    if std::env::var("DEPWARN_LOG").is_ok() || std::env::var("RUST_LOG").is_ok() {
        init_with(Config::from_env())
    } else if cfg!(debug_assertions) {
        init_with(Config::development())
    } else {
        init_with(Config::production())
    }
}

/// Initialize with default configuration
pub fn init() -> LogResult<()> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<()> {
    LoggerBuilder::from_config(config).init()
}
