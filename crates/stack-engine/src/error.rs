//! Error types for stack-engine

/// Result type for stack-engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while talking to the container engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The engine CLI could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The engine CLI exited with a non-zero status
    #[error("'{command}' failed (exit code {code}){}", stderr_suffix(.stderr))]
    CommandFailed {
        command: String,
        code: i32,
        stderr: String,
    },

    /// A document could not be serialized for the engine
    #[error("Failed to render document: {message}")]
    Render { message: String },

    /// The temporary compose file could not be written
    #[error("Failed to write temporary compose file: {source}")]
    TempFile {
        #[source]
        source: std::io::Error,
    },

    /// Error from stack-core
    #[error(transparent)]
    Core(#[from] stack_core::Error),
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(": {stderr}")
    }
}
