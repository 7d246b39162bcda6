//! [`TestStore`] builder for fragment store scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary fragment store plus a state file location beside it.
///
/// Layout:
///
/// ```text
/// <tmp>/fragments/<category>/<option>/<fragment>.yaml
/// <tmp>/state.yaml
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use stack_test_utils::TestStore;
///
/// let store = TestStore::new()
///     .base("db", "postgres", "services:\n  pg:\n    image: postgres\n")
///     .addon("db", "postgres", "network", "networks:\n  backend: {}\n");
/// store.enable("db", "postgres", &["network"]);
/// store.assert_file_exists("fragments/db/postgres/base.yaml");
/// ```
pub struct TestStore {
    temp_dir: TempDir,
}

impl Default for TestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStore {
    /// Create a store with an empty fragments directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join("fragments")).unwrap();
        Self { temp_dir }
    }

    /// Root of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The fragment store root.
    pub fn fragments_dir(&self) -> PathBuf {
        self.root().join("fragments")
    }

    /// Where the selection state file lives.
    pub fn state_file(&self) -> PathBuf {
        self.root().join("state.yaml")
    }

    /// Directory of one option.
    pub fn option_dir(&self, category: &str, option: &str) -> PathBuf {
        self.fragments_dir().join(category).join(option)
    }

    /// Write an option's `base.yaml`.
    pub fn base(self, category: &str, option: &str, yaml: &str) -> Self {
        self.fragment(category, option, "base.yaml", yaml)
    }

    /// Write an addon fragment `<addon>.yaml`.
    pub fn addon(self, category: &str, option: &str, addon: &str, yaml: &str) -> Self {
        self.fragment(category, option, &format!("{addon}.yaml"), yaml)
    }

    /// Write an arbitrary file inside an option directory.
    pub fn fragment(self, category: &str, option: &str, file: &str, content: &str) -> Self {
        let dir = self.option_dir(category, option);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
        self
    }

    /// Create a directory under the fragment root without any fragments.
    pub fn dir(self, relative: &str) -> Self {
        fs::create_dir_all(self.fragments_dir().join(relative)).unwrap();
        self
    }

    /// Write a state file marking each `(category, option, addons)` enabled.
    ///
    /// Replaces any previous state file.
    pub fn write_state(&self, enabled: &[(&str, &str, &[&str])]) {
        let mut by_category: Vec<(&str, Vec<(&str, &[&str])>)> = Vec::new();
        for &(category, option, addons) in enabled {
            match by_category.iter().position(|(c, _)| *c == category) {
                Some(index) => by_category[index].1.push((option, addons)),
                None => by_category.push((category, vec![(option, addons)])),
            }
        }

        let mut yaml = String::new();
        for (category, options) in by_category {
            yaml.push_str(&format!("{category}:\n"));
            for (option, addons) in options {
                let addons = addons.join(", ");
                yaml.push_str(&format!(
                    "  {option}:\n    enabled: true\n    addons: [{addons}]\n"
                ));
            }
        }
        fs::write(self.state_file(), yaml).unwrap();
    }

    /// Shorthand for a state file with a single enabled option.
    pub fn enable(&self, category: &str, option: &str, addons: &[&str]) {
        self.write_state(&[(category, option, addons)]);
    }

    /// Write a settings file pointing at this store and return its path.
    pub fn write_settings(&self, poll_interval: u64) -> PathBuf {
        let path = self.root().join("config.yaml");
        let yaml = format!(
            "fragments_dir: {}\nstate_file: {}\npoll_interval: {poll_interval}\n",
            self.fragments_dir().display(),
            self.state_file().display()
        );
        fs::write(&path, yaml).unwrap();
        path
    }

    /// Read a file relative to the root.
    ///
    /// # Panics
    /// Panics if the file cannot be read.
    pub fn read(&self, path: &str) -> String {
        let full_path = self.root().join(path);
        fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()))
    }

    /// Assert that `path` (relative to the root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `path` (relative to the root) contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, path: &str, content: &str) {
        let file_content = self.read(path);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            path,
            content,
            file_content
        );
    }
}
