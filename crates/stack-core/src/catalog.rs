//! Fragment store discovery
//!
//! The fragment store is a directory tree:
//!
//! ```text
//! <root>/<category>/<option>/base.yaml
//! <root>/<category>/<option>/<addon>.yaml
//! ```
//!
//! Discovery produces a [`Catalog`] in which categories, options and addons
//! are all sorted by name. Resolution relies on that ordering.

use crate::{Error, Result};
use serde::Serialize;
use stack_fs::constants::is_fragment_extension;
use stack_fs::{NormalizedPath, StackPath};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display color for an addon badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeColor {
    Blue,
    Magenta,
    Yellow,
}

/// Short label and color shown for an addon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddonDisplay {
    pub label: String,
    pub color: BadgeColor,
}

impl AddonDisplay {
    /// Static lookup by addon name; unknown names get their uppercased
    /// first character in the default color.
    pub fn for_name(name: &str) -> Self {
        match name {
            "network" => Self {
                label: "N".into(),
                color: BadgeColor::Blue,
            },
            "gpu" => Self {
                label: "G".into(),
                color: BadgeColor::Magenta,
            },
            _ => Self {
                label: name
                    .chars()
                    .next()
                    .map(|c| c.to_uppercase().collect())
                    .unwrap_or_default(),
                color: BadgeColor::Yellow,
            },
        }
    }
}

/// An optional override fragment layered on an option's base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Addon {
    pub name: String,
    pub path: NormalizedPath,
    pub display: AddonDisplay,
}

impl Addon {
    pub fn new(name: impl Into<String>, path: impl Into<NormalizedPath>) -> Self {
        let name = name.into();
        let display = AddonDisplay::for_name(&name);
        Self {
            name,
            path: path.into(),
            display,
        }
    }
}

/// A deployable unit: one base fragment plus optional addons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDef {
    pub category: String,
    pub name: String,
    pub base: NormalizedPath,
    addons: Vec<Addon>,
}

impl OptionDef {
    pub fn new(
        category: impl Into<String>,
        name: impl Into<String>,
        base: impl Into<NormalizedPath>,
    ) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            base: base.into(),
            addons: Vec::new(),
        }
    }

    /// Add an addon, keeping addons sorted by name.
    pub fn with_addon(mut self, name: impl Into<String>, path: impl Into<NormalizedPath>) -> Self {
        self.addons.push(Addon::new(name, path));
        self.addons.sort_by(|a, b| a.name.cmp(&b.name));
        self
    }

    /// Addons in lexicographic name order.
    pub fn addons(&self) -> &[Addon] {
        &self.addons
    }

    pub fn addon(&self, name: &str) -> Option<&Addon> {
        self.addons.iter().find(|a| a.name == name)
    }

    pub fn reference(&self) -> OptionRef {
        OptionRef {
            category: self.category.clone(),
            option: self.name.clone(),
        }
    }
}

/// A named grouping of options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub dir: NormalizedPath,
    options: Vec<OptionDef>,
}

impl Category {
    pub fn new(name: impl Into<String>, dir: impl Into<NormalizedPath>) -> Self {
        Self {
            name: name.into(),
            dir: dir.into(),
            options: Vec::new(),
        }
    }

    pub fn with_option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self.options.sort_by(|a, b| a.name.cmp(&b.name));
        self
    }

    /// Options in lexicographic name order.
    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }
}

/// Everything discovered in the fragment store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    /// Build a catalog from an already-enumerated store.
    pub fn from_categories(mut categories: Vec<Category>) -> Self {
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Self { categories }
    }

    /// Walk `root` and build the catalog.
    ///
    /// An unreadable root is an error. Unreadable category or option
    /// directories are skipped, as are options without a base fragment
    /// and any dot-prefixed entries.
    pub fn discover(root: &NormalizedPath) -> Result<Self> {
        let category_dirs = list_dirs(root).map_err(|source| Error::Discovery {
            path: root.to_native(),
            source,
        })?;

        let mut categories = Vec::new();
        for (name, dir) in category_dirs {
            let mut category = Category::new(name, dir.clone());
            match list_dirs(&dir) {
                Ok(option_dirs) => {
                    for (option_name, option_dir) in option_dirs {
                        if let Some(option) = discover_option(&category.name, option_name, &option_dir) {
                            category.options.push(option);
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!(path = %dir, error = %e, "Skipping unreadable category");
                }
            }
            category.options.sort_by(|a, b| a.name.cmp(&b.name));
            categories.push(category);
        }

        let catalog = Self::from_categories(categories);
        tracing::debug!(
            root = %root,
            categories = catalog.categories.len(),
            options = catalog.options().count(),
            "Discovered fragment store"
        );
        Ok(catalog)
    }

    /// Categories in lexicographic name order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// All options, categories first then options, both lexicographic.
    pub fn options(&self) -> impl Iterator<Item = &OptionDef> {
        self.categories.iter().flat_map(|c| c.options.iter())
    }

    pub fn option(&self, category: &str, option: &str) -> Option<&OptionDef> {
        self.category(category)?
            .options
            .iter()
            .find(|o| o.name == option)
    }

    /// Look up an option, failing with [`Error::UnknownOption`].
    pub fn find(&self, reference: &OptionRef) -> Result<&OptionDef> {
        self.option(&reference.category, &reference.option)
            .ok_or_else(|| Error::UnknownOption {
                category: reference.category.clone(),
                option: reference.option.clone(),
            })
    }
}

fn discover_option(category: &str, name: String, dir: &NormalizedPath) -> Option<OptionDef> {
    let entries = match std::fs::read_dir(dir.to_native()) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(path = %dir, error = %e, "Skipping unreadable option");
            return None;
        }
    };

    let mut by_stem: BTreeMap<String, Vec<NormalizedPath>> = BTreeMap::new();
    for entry in entries.flatten() {
        let path = NormalizedPath::new(entry.path());
        if !path.is_file() || path.is_hidden() {
            continue;
        }
        if !path.extension().is_some_and(is_fragment_extension) {
            continue;
        }
        let Some(stem) = path.file_stem().map(str::to_string) else {
            continue;
        };
        by_stem.entry(stem).or_default().push(path);
    }

    let mut base = None;
    let mut addons = Vec::new();
    for (stem, candidates) in by_stem {
        let Some(path) = pick_fragment(candidates) else {
            continue;
        };
        if stem == StackPath::BaseFragment.as_str() {
            base = Some(path);
        } else {
            addons.push(Addon::new(stem, path));
        }
    }

    let Some(base) = base else {
        tracing::debug!(path = %dir, "No base fragment, not an option");
        return None;
    };

    addons.sort_by(|a, b| a.name.cmp(&b.name));
    Some(OptionDef {
        category: category.to_string(),
        name,
        base,
        addons,
    })
}

/// One fragment per stem: `.yaml` before `.yml`, then by file name.
fn pick_fragment(mut candidates: Vec<NormalizedPath>) -> Option<NormalizedPath> {
    let not_yaml = |p: &NormalizedPath| !p.extension().is_some_and(|e| e.eq_ignore_ascii_case("yaml"));
    candidates.sort_by(|a, b| {
        not_yaml(a)
            .cmp(&not_yaml(b))
            .then_with(|| a.file_name().cmp(&b.file_name()))
    });
    let mut candidates = candidates.into_iter();
    let chosen = candidates.next()?;
    for ignored in candidates {
        tracing::warn!(
            path = %ignored,
            using = %chosen,
            "Ignoring fragment that shares its name with another"
        );
    }
    Some(chosen)
}

/// Visible subdirectories of `dir` as (name, path) pairs.
fn list_dirs(dir: &NormalizedPath) -> std::io::Result<Vec<(String, NormalizedPath)>> {
    let mut dirs = Vec::new();
    for entry in std::fs::read_dir(dir.to_native())? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') || !entry.path().is_dir() {
            continue;
        }
        dirs.push((name, NormalizedPath::new(entry.path())));
    }
    dirs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(dirs)
}

/// A `category/option` reference as typed on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OptionRef {
    pub category: String,
    pub option: String,
}

impl FromStr for OptionRef {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        match input.split_once('/') {
            Some((category, option))
                if !category.is_empty() && !option.is_empty() && !option.contains('/') =>
            {
                Ok(Self {
                    category: category.to_string(),
                    option: option.to_string(),
                })
            }
            _ => Err(Error::InvalidOptionRef {
                input: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for OptionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.option)
    }
}
