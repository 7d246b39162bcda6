//! Fragment loading
//!
//! A loader turns a fragment location into a [`Document`]. Failures are
//! reported per fragment; whether they abort anything is the caller's call.

use crate::document::{Document, DocumentError};
use crate::{Error, Result};
use stack_fs::{NormalizedPath, io};

/// Source of parsed fragments.
pub trait FragmentLoader {
    fn load(&self, location: &NormalizedPath) -> Result<Document>;
}

/// Loads fragments from the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLoader;

impl FragmentLoader for FsLoader {
    fn load(&self, location: &NormalizedPath) -> Result<Document> {
        let content = io::read_text(location).map_err(|source| Error::FragmentRead {
            path: location.to_native(),
            source,
        })?;
        let document = parse_fragment(location, &content)?;
        tracing::debug!(path = %location, keys = document.len(), "Loaded fragment");
        Ok(document)
    }
}

/// Parse fragment text, attributing errors to `location`.
pub fn parse_fragment(location: &NormalizedPath, content: &str) -> Result<Document> {
    Document::parse(content).map_err(|e| match e {
        DocumentError::NotAMapping { found } => Error::NotADocument {
            path: location.to_native(),
            found,
        },
        other => Error::FragmentParse {
            path: location.to_native(),
            message: other.to_string(),
        },
    })
}
