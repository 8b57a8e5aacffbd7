//! Error handling for depwarn-log

/// Result alias for logger setup.
pub type LogResult<T> = Result<T, LogError>;

/// Logger setup failures.
#[derive(Debug, thiserror::Error)]
pub enum LogError {
    /// The level directive could not be parsed.
    #[error("invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected directive.
        filter: String,
        /// Parser message.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("global subscriber already set: {0}")]
    AlreadySet(String),
}
