//! User toggle state
//!
//! [`Selection`] records which options are enabled and which addons are
//! active, keyed by category and option name. It is passed explicitly into
//! resolution; nothing reads it implicitly.
//!
//! The on-disk form is YAML:
//!
//! ```yaml
//! db:
//!   postgres:
//!     enabled: true
//!     addons: [network]
//! ```

use crate::Result;
use crate::catalog::Catalog;
use serde::{Deserialize, Serialize};
use stack_fs::{ConfigStore, NormalizedPath};
use std::collections::{BTreeMap, BTreeSet};

/// Toggle state for one option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionState {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub addons: BTreeSet<String>,
}

/// Toggle state for every option, keyed by category then option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    categories: BTreeMap<String, BTreeMap<String, OptionState>>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a state file; a missing file is an empty selection.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let selection: Self = ConfigStore::new().load_or_default(path)?;
        tracing::debug!(path = %path, "Loaded selection state");
        Ok(selection)
    }

    /// Persist atomically, creating parent directories as needed.
    pub fn save(&self, path: &NormalizedPath) -> Result<()> {
        ConfigStore::new().save(path, self)?;
        Ok(())
    }

    pub fn state(&self, category: &str, option: &str) -> Option<&OptionState> {
        self.categories.get(category)?.get(option)
    }

    fn state_mut(&mut self, category: &str, option: &str) -> &mut OptionState {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(option.to_string())
            .or_default()
    }

    pub fn is_enabled(&self, category: &str, option: &str) -> bool {
        self.state(category, option).is_some_and(|s| s.enabled)
    }

    pub fn set_enabled(&mut self, category: &str, option: &str, enabled: bool) {
        self.state_mut(category, option).enabled = enabled;
    }

    /// Flip the enabled flag, returning the new value.
    pub fn toggle_enabled(&mut self, category: &str, option: &str) -> bool {
        let state = self.state_mut(category, option);
        state.enabled = !state.enabled;
        state.enabled
    }

    pub fn is_addon_active(&self, category: &str, option: &str, addon: &str) -> bool {
        self.state(category, option)
            .is_some_and(|s| s.addons.contains(addon))
    }

    pub fn set_addon(&mut self, category: &str, option: &str, addon: &str, active: bool) {
        let addons = &mut self.state_mut(category, option).addons;
        if active {
            addons.insert(addon.to_string());
        } else {
            addons.remove(addon);
        }
    }

    /// Flip an addon, returning whether it is now active.
    pub fn toggle_addon(&mut self, category: &str, option: &str, addon: &str) -> bool {
        let active = !self.is_addon_active(category, option, addon);
        self.set_addon(category, option, addon, active);
        active
    }

    /// Active addon names for one option, sorted.
    pub fn active_addons(&self, category: &str, option: &str) -> BTreeSet<String> {
        self.state(category, option)
            .map(|s| s.addons.clone())
            .unwrap_or_default()
    }

    /// Drop state for options and addons that no longer exist.
    pub fn prune(&mut self, catalog: &Catalog) {
        self.categories.retain(|category, options| {
            options.retain(|option, state| match catalog.option(category, option) {
                Some(def) => {
                    state.addons.retain(|addon| def.addon(addon).is_some());
                    true
                }
                None => false,
            });
            !options.is_empty()
        });
    }
}
