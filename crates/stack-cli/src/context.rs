//! Per-invocation state
//!
//! Settings are loaded first; `--dir` and `--state` then override the
//! fragment store root and the state file. The catalog is discovered
//! once per invocation.

use crate::cli::Cli;
use crate::error::{CliError, Result};
use stack_core::{Catalog, OptionDef, OptionRef, Resolver, Selection, Settings};
use stack_engine::{ComposeRunner, DockerCli};
use stack_fs::{NormalizedPath, expand_path};
use std::path::Path;

/// Everything a command needs.
pub struct AppContext {
    pub settings: Settings,
    pub catalog: Catalog,
    pub selection: Selection,
    pub state_path: NormalizedPath,
    pub engine: String,
}

impl AppContext {
    /// Build the context from parsed arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config = cli.config.as_deref().map(expand_arg);
        let mut settings = Settings::load(config.as_ref())?;
        if let Some(dir) = &cli.dir {
            settings.fragments_dir = dir.to_string_lossy().into_owned();
        }
        if let Some(state) = &cli.state {
            settings.state_file = state.to_string_lossy().into_owned();
        }
        Self::open(settings, &cli.engine)
    }

    /// Discover the store and load the selection for `settings`.
    pub fn open(settings: Settings, engine: &str) -> Result<Self> {
        let root = settings.fragments_dir();
        let catalog = Catalog::discover(&root)?;
        let state_path = settings.state_file();
        let selection = Selection::load(&state_path)?;

        Ok(Self {
            settings,
            catalog,
            selection,
            state_path,
            engine: engine.to_string(),
        })
    }

    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::new(&self.catalog, &self.selection)
    }

    pub fn option(&self, reference: &OptionRef) -> Result<&OptionDef> {
        Ok(self.catalog.find(reference)?)
    }

    /// Fail unless `addon` exists on `option`.
    pub fn check_addon(&self, reference: &OptionRef, addon: &str) -> Result<()> {
        let option = self.option(reference)?;
        if option.addon(addon).is_none() {
            return Err(stack_core::Error::UnknownAddon {
                category: reference.category.clone(),
                option: reference.option.clone(),
                addon: addon.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Persist the selection, dropping entries the store no longer has.
    pub fn save_selection(&mut self) -> Result<()> {
        self.selection.prune(&self.catalog);
        self.selection.save(&self.state_path)?;
        Ok(())
    }

    pub fn query(&self) -> DockerCli {
        DockerCli::new(&self.engine)
    }

    pub fn runner(&self) -> ComposeRunner {
        ComposeRunner::new(&self.engine)
    }

    /// Fail when nothing is enabled, naming the remedy.
    pub fn require_enabled(&self) -> Result<()> {
        if self.resolver().enabled_options().next().is_none() {
            return Err(CliError::user(
                "No options are enabled (use 'stackmix enable <category>/<option>')",
            ));
        }
        Ok(())
    }
}

fn expand_arg(path: &Path) -> NormalizedPath {
    NormalizedPath::new(expand_path(&path.to_string_lossy()))
}
