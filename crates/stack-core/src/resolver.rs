//! Option and global document resolution
//!
//! An option's resolved document is its base fragment with each active
//! addon merged on top, addons taken in lexicographic order. The global
//! document is the merge of every enabled option's resolved document,
//! categories then options in lexicographic order, starting from empty.
//!
//! Failure isolation:
//!
//! - a base that cannot be loaded fails that option's resolution
//! - an active addon that cannot be loaded is skipped
//! - an option that fails during global aggregation is skipped
//!
//! Inactive addons are never loaded, so their failures cannot surface.

use crate::catalog::{Catalog, OptionDef};
use crate::document::Document;
use crate::loader::{FragmentLoader, FsLoader};
use crate::selection::Selection;
use crate::{Error, Result};
use std::collections::BTreeSet;

/// Resolves options against a catalog and a selection.
///
/// Holds only borrows, so it is cheap to copy and rebuild whenever the
/// selection changes. Nothing is cached: every call re-reads fragments.
#[derive(Clone, Copy)]
pub struct Resolver<'a> {
    catalog: &'a Catalog,
    selection: &'a Selection,
    loader: &'a dyn FragmentLoader,
}

impl<'a> Resolver<'a> {
    /// A resolver reading fragments from the filesystem.
    pub fn new(catalog: &'a Catalog, selection: &'a Selection) -> Self {
        Self {
            catalog,
            selection,
            loader: &FsLoader,
        }
    }

    /// Replace the fragment loader.
    pub fn with_loader(mut self, loader: &'a dyn FragmentLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    pub fn selection(&self) -> &'a Selection {
        self.selection
    }

    /// Resolve an option with the addons the selection marks active.
    pub fn resolve(&self, option: &OptionDef) -> Result<Document> {
        self.resolve_filtered(option, |addon| {
            self.selection
                .is_addon_active(&option.category, &option.name, addon)
        })
    }

    /// Resolve an option with an explicit set of active addons.
    ///
    /// Names in `active` that the option does not have are ignored.
    pub fn resolve_with(&self, option: &OptionDef, active: &BTreeSet<String>) -> Result<Document> {
        self.resolve_filtered(option, |addon| active.contains(addon))
    }

    fn resolve_filtered<F>(&self, option: &OptionDef, is_active: F) -> Result<Document>
    where
        F: Fn(&str) -> bool,
    {
        let mut document = self
            .loader
            .load(&option.base)
            .map_err(|e| Error::base_load(&option.category, &option.name, e))?;

        for addon in option.addons() {
            if !is_active(&addon.name) {
                continue;
            }
            match self.loader.load(&addon.path) {
                Ok(overlay) => document.merge(overlay),
                Err(e) => {
                    tracing::warn!(
                        category = %option.category,
                        option = %option.name,
                        addon = %addon.name,
                        error = %e,
                        "Skipping addon that failed to load"
                    );
                }
            }
        }

        Ok(document)
    }

    /// Enabled options in global merge order.
    pub fn enabled_options(&self) -> impl Iterator<Item = &'a OptionDef> + use<'a> {
        let selection = self.selection;
        self.catalog
            .options()
            .filter(move |o| selection.is_enabled(&o.category, &o.name))
    }

    /// Merge every enabled option's resolved document.
    ///
    /// Never fails: options that cannot be resolved are left out.
    pub fn global(&self) -> Document {
        let mut global = Document::new();
        for option in self.enabled_options() {
            match self.resolve(option) {
                Ok(resolved) => global.merge(resolved),
                Err(e) => {
                    tracing::warn!(
                        category = %option.category,
                        option = %option.name,
                        error = %e,
                        "Skipping option in global document"
                    );
                }
            }
        }
        global
    }
}
