//! Applying documents to the engine
//!
//! Documents are handed to `compose` through a temporary file that lives
//! for the duration of the command. Per-option actions (start, stop,
//! restart, pull) bypass compose and name their targets directly.

use crate::query::DEFAULT_PROGRAM;
use crate::{Error, Result};
use stack_core::Document;
use std::borrow::Cow;
use std::ffi::OsString;
use std::io::Write;
use std::process::{Command, Stdio};
use tempfile::NamedTempFile;

/// What happens to a command's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Stream to this process's stdout and stderr
    #[default]
    Inherit,
    /// Capture; stderr is reported on failure
    Capture,
}

/// Runs engine commands.
#[derive(Debug, Clone)]
pub struct ComposeRunner {
    program: String,
    output: OutputMode,
}

impl Default for ComposeRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM)
    }
}

impl ComposeRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            output: OutputMode::default(),
        }
    }

    pub fn with_output(mut self, output: OutputMode) -> Self {
        self.output = output;
        self
    }

    /// Run `compose -f <tmp> <args...>` against `document`.
    pub fn compose(&self, document: &Document, args: &[&str]) -> Result<()> {
        let file = write_compose_file(document)?;
        let mut argv: Vec<OsString> = vec!["compose".into(), "-f".into(), file.path().into()];
        argv.extend(args.iter().map(OsString::from));
        self.run(&argv)
        // `file` is removed here, after the command has exited
    }

    /// Run `<action> <targets...>` directly. No targets is a no-op.
    pub fn run_direct(&self, action: &str, targets: &[String]) -> Result<()> {
        if targets.is_empty() {
            tracing::debug!(action, "No targets, nothing to run");
            return Ok(());
        }
        let mut argv: Vec<OsString> = vec![action.into()];
        argv.extend(targets.iter().map(OsString::from));
        self.run(&argv)
    }

    fn run(&self, argv: &[OsString]) -> Result<()> {
        let command_line = self.describe(argv);
        tracing::info!(command = %command_line, "Running engine command");

        let mut command = Command::new(&self.program);
        command.args(argv).stdin(Stdio::null());

        let (status, stderr) = match self.output {
            OutputMode::Inherit => {
                let status = command.status().map_err(|source| self.spawn_error(source))?;
                (status, String::new())
            }
            OutputMode::Capture => {
                let output = command.output().map_err(|source| self.spawn_error(source))?;
                let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
                (output.status, stderr)
            }
        };

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: command_line,
                code: status.code().unwrap_or(-1),
                stderr,
            })
        }
    }

    fn spawn_error(&self, source: std::io::Error) -> Error {
        Error::Spawn {
            program: self.program.clone(),
            source,
        }
    }

    fn describe(&self, argv: &[OsString]) -> String {
        std::iter::once(Cow::Borrowed(self.program.as_str()))
            .chain(argv.iter().map(|a| a.to_string_lossy()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Serialize `document` into a named temporary `.yaml` file.
///
/// The file is deleted when the returned handle is dropped.
pub fn write_compose_file(document: &Document) -> Result<NamedTempFile> {
    let yaml = document.to_yaml().map_err(|e| Error::Render {
        message: e.to_string(),
    })?;

    let mut file = tempfile::Builder::new()
        .prefix("stackmix-compose-")
        .suffix(".yaml")
        .tempfile()
        .map_err(|source| Error::TempFile { source })?;
    file.write_all(yaml.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| Error::TempFile { source })?;

    tracing::debug!(path = %file.path().display(), "Wrote compose file");
    Ok(file)
}
