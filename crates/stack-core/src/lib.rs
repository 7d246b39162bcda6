//! Fragment resolution layer for stackmix
//!
//! This crate turns a tree of YAML fragments into deployable documents and
//! decides whether those documents are live:
//!
//! - **Catalog**: discovery of `category/option/{base, addons...}` fragments
//! - **Selection**: explicit, persisted toggle state for options and addons
//! - **Merge engine**: deterministic deep merge of keyed-tree documents
//! - **Resolver**: per-option and global document resolution
//! - **Names**: container, network and volume identifiers a document declares
//! - **Reconciler**: option liveness against observed engine state
//!
//! # Architecture
//!
//! ```text
//!                 stack-cli
//!                 /       \
//!         stack-engine     |
//!                 \       /
//!                stack-core
//!                    |
//!                 stack-fs
//! ```

pub mod catalog;
pub mod document;
pub mod error;
pub mod loader;
pub mod merge;
pub mod names;
pub mod reconcile;
pub mod resolver;
pub mod selection;
pub mod settings;

pub use catalog::{Addon, AddonDisplay, BadgeColor, Catalog, Category, OptionDef, OptionRef};
pub use document::{Document, DocumentError, Mapping, Scalar, Value};
pub use error::{Error, Result};
pub use loader::{FragmentLoader, FsLoader, parse_fragment};
pub use merge::merge;
pub use names::{ResourceKind, ResourceNames, extract_names, image_names};
pub use reconcile::{Reconciler, ResourcePresence};
pub use resolver::Resolver;
pub use selection::{OptionState, Selection};
pub use settings::Settings;
