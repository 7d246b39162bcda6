//! Filesystem abstraction for stackmix
//!
//! Provides normalized paths, locked atomic writes, and format-agnostic
//! loading of settings and state files.

pub mod config;
pub mod constants;
pub mod error;
pub mod expand;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::StackPath;
pub use error::{Error, Result};
pub use expand::expand_path;
pub use path::NormalizedPath;
