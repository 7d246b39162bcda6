//! Error types for stack-core

use std::path::PathBuf;

/// Result type for stack-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in stack-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The fragment store root could not be enumerated
    #[error("Cannot read fragment store at {path}: {source}")]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An option's base fragment is missing or unparsable
    #[error("Loading base for {category}/{option}: {source}")]
    BaseLoad {
        category: String,
        option: String,
        #[source]
        source: Box<Error>,
    },

    /// A fragment file could not be read
    #[error("Cannot read fragment {path}: {source}")]
    FragmentRead {
        path: PathBuf,
        #[source]
        source: stack_fs::Error,
    },

    /// A fragment file is not valid YAML
    #[error("Invalid YAML in {path}: {message}")]
    FragmentParse { path: PathBuf, message: String },

    /// A fragment parsed, but its top level is not a mapping
    #[error("Fragment {path} must be a mapping, found {found}")]
    NotADocument { path: PathBuf, found: &'static str },

    /// No option with this name exists in the catalog
    #[error("Unknown option: {category}/{option}")]
    UnknownOption { category: String, option: String },

    /// The option exists but has no such addon
    #[error("Option {category}/{option} has no addon named '{addon}'")]
    UnknownAddon {
        category: String,
        option: String,
        addon: String,
    },

    /// An option reference did not have the `category/option` shape
    #[error("Invalid option reference '{input}', expected <category>/<option>")]
    InvalidOptionRef { input: String },

    /// A document could not be serialized
    #[error("Failed to render document: {message}")]
    Render { message: String },

    /// Filesystem error from stack-fs
    #[error(transparent)]
    Fs(#[from] stack_fs::Error),
}

impl Error {
    pub(crate) fn base_load(category: &str, option: &str, source: Error) -> Self {
        Self::BaseLoad {
            category: category.to_string(),
            option: option.to_string(),
            source: Box::new(source),
        }
    }
}
