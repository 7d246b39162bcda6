//! Application settings
//!
//! Settings live in `~/.config/stackmix/config.yaml`:
//!
//! ```yaml
//! fragments_dir: ~/stacks
//! state_file: $XDG_STATE_HOME/stackmix/state.yaml
//! poll_interval: 5
//! ```
//!
//! Every key is optional. Paths are stored as written and expanded on
//! access, so `~` and `$VAR` follow the environment at use time.

use crate::Result;
use serde::{Deserialize, Serialize};
use stack_fs::{ConfigStore, NormalizedPath, StackPath, expand_path};
use std::time::Duration;

/// Default seconds between live state polls.
pub const DEFAULT_POLL_INTERVAL: u64 = 3;

/// Shortest accepted poll interval, in seconds.
pub const MIN_POLL_INTERVAL: u64 = 1;

/// Application directory on every platform, expanded on access.
const APP_DIR: &str = "~/.config/stackmix";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Root of the fragment store
    pub fragments_dir: String,
    /// Where the selection state is persisted
    pub state_file: String,
    /// Seconds between live state polls
    pub poll_interval: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fragments_dir: APP_DIR.to_string(),
            state_file: format!("{APP_DIR}/{}", StackPath::StateFile),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Settings {
    /// The settings file consulted when no path is given.
    pub fn default_path() -> NormalizedPath {
        NormalizedPath::new(expand_path(&format!("{APP_DIR}/{}", StackPath::SettingsFile)))
    }

    /// Load settings.
    ///
    /// With an explicit `path` the file must exist. Without one, the
    /// default location is read and a missing file yields defaults.
    pub fn load(path: Option<&NormalizedPath>) -> Result<Self> {
        let store = ConfigStore::new();
        let settings: Self = match path {
            Some(path) => store.load(path)?,
            None => store.load_or_default(&Self::default_path())?,
        };
        tracing::debug!(?settings, "Loaded settings");
        Ok(settings)
    }

    /// Fragment store root with `~` and variables expanded.
    pub fn fragments_dir(&self) -> NormalizedPath {
        NormalizedPath::new(expand_path(&self.fragments_dir))
    }

    /// State file location with `~` and variables expanded.
    pub fn state_file(&self) -> NormalizedPath {
        NormalizedPath::new(expand_path(&self.state_file))
    }

    /// Poll interval, never shorter than [`MIN_POLL_INTERVAL`] seconds.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval.max(MIN_POLL_INTERVAL))
    }
}
