//! Well-known file and directory names.

use std::path::Path;

/// File extensions recognised as fragments.
pub const FRAGMENT_EXTENSIONS: &[&str] = &["yaml", "yml"];

/// Standard stackmix filesystem names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackPath {
    /// Application directory under the platform config dir
    AppDir,
    /// Settings file inside the application directory
    SettingsFile,
    /// Default selection state file inside the application directory
    StateFile,
    /// Stem of an option's base fragment
    BaseFragment,
}

impl StackPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppDir => "stackmix",
            Self::SettingsFile => "config.yaml",
            Self::StateFile => "state.yaml",
            Self::BaseFragment => "base",
        }
    }
}

impl AsRef<Path> for StackPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for StackPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for StackPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether `extension` marks a fragment file.
pub fn is_fragment_extension(extension: &str) -> bool {
    FRAGMENT_EXTENSIONS
        .iter()
        .any(|ext| ext.eq_ignore_ascii_case(extension))
}
