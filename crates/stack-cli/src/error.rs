//! Error types for stack-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from stack-core
    #[error(transparent)]
    Core(#[from] stack_core::Error),

    /// Error from stack-engine
    #[error(transparent)]
    Engine(#[from] stack_engine::Error),

    /// Error from stack-fs
    #[error(transparent)]
    Fs(#[from] stack_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON output could not be produced
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The tracing subscriber could not be installed
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

impl From<stack_core::DocumentError> for CliError {
    fn from(e: stack_core::DocumentError) -> Self {
        Self::Core(stack_core::Error::Render {
            message: e.to_string(),
        })
    }
}
