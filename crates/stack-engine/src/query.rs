//! Engine listings
//!
//! The engine is asked for one kind of resource at a time and answers
//! with one identifier per line.

use crate::{Error, Result};
use stack_core::ResourceKind;
use std::collections::HashSet;
use std::process::Command;

/// Default engine CLI.
pub const DEFAULT_PROGRAM: &str = "docker";

/// Source of raw resource listings.
pub trait EngineQuery: Send + Sync {
    /// Raw line-oriented listing of every resource of `kind`.
    fn list(&self, kind: ResourceKind) -> Result<String>;
}

impl<T: EngineQuery + ?Sized> EngineQuery for std::sync::Arc<T> {
    fn list(&self, kind: ResourceKind) -> Result<String> {
        (**self).list(kind)
    }
}

/// Queries a docker-compatible CLI.
///
/// Containers are listed with `ps` (running only), networks and volumes
/// with `ls`.
#[derive(Debug, Clone)]
pub struct DockerCli {
    program: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl DockerCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments that list resources of `kind`.
    pub fn list_args(kind: ResourceKind) -> &'static [&'static str] {
        match kind {
            ResourceKind::Container => &["ps", "--format", "{{.Names}}"],
            ResourceKind::Network => &["network", "ls", "--format", "{{.Name}}"],
            ResourceKind::Volume => &["volume", "ls", "--format", "{{.Name}}"],
        }
    }
}

impl EngineQuery for DockerCli {
    fn list(&self, kind: ResourceKind) -> Result<String> {
        let args = Self::list_args(kind);
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| Error::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).to_string())
        } else {
            Err(Error::CommandFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

/// Identifiers in a raw listing: one per line, trimmed, blanks dropped.
pub fn parse_listing(raw: &str) -> HashSet<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
