//! Resource name extraction
//!
//! Derives the identifiers a document would create in the container
//! engine. A declaration's explicit name field wins; otherwise the
//! declaration's key is the runtime name.

use crate::document::{Document, Value};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// The three kinds of engine resources tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Container,
    Network,
    Volume,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [Self::Container, Self::Network, Self::Volume];

    /// Top-level document section holding declarations of this kind.
    pub fn section(&self) -> &'static str {
        match self {
            Self::Container => "services",
            Self::Network => "networks",
            Self::Volume => "volumes",
        }
    }

    /// Field that overrides the runtime name of a declaration.
    pub fn name_field(&self) -> &'static str {
        match self {
            Self::Container => "container_name",
            Self::Network | Self::Volume => "name",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Network => "network",
            Self::Volume => "volume",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifiers of one kind declared by `document`.
///
/// A missing or non-mapping section yields an empty set. Two declarations
/// that collide on a declared name collapse into one identifier.
pub fn extract_names(document: &Document, kind: ResourceKind) -> BTreeSet<String> {
    let section = match document.get(kind.section()) {
        Some(Value::Mapping(section)) => section,
        Some(other) => {
            tracing::debug!(
                section = kind.section(),
                found = other.kind_name(),
                "Section is not a mapping, no names declared"
            );
            return BTreeSet::new();
        }
        None => return BTreeSet::new(),
    };

    section
        .iter()
        .map(|(key, entry)| {
            entry
                .as_mapping()
                .and_then(|fields| fields.get(kind.name_field()))
                .and_then(Value::as_str)
                .filter(|name| !name.is_empty())
                .unwrap_or(key)
                .to_string()
        })
        .collect()
}

/// Image references of every service that declares one.
pub fn image_names(document: &Document) -> BTreeSet<String> {
    let Some(services) = document
        .get(ResourceKind::Container.section())
        .and_then(Value::as_mapping)
    else {
        return BTreeSet::new();
    };

    services
        .values()
        .filter_map(|service| service.as_mapping()?.get("image")?.as_str())
        .filter(|image| !image.is_empty())
        .map(str::to_string)
        .collect()
}

/// All three identifier sets of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceNames {
    pub containers: BTreeSet<String>,
    pub networks: BTreeSet<String>,
    pub volumes: BTreeSet<String>,
}

impl ResourceNames {
    pub fn of(document: &Document) -> Self {
        Self {
            containers: extract_names(document, ResourceKind::Container),
            networks: extract_names(document, ResourceKind::Network),
            volumes: extract_names(document, ResourceKind::Volume),
        }
    }

    pub fn get(&self, kind: ResourceKind) -> &BTreeSet<String> {
        match kind {
            ResourceKind::Container => &self.containers,
            ResourceKind::Network => &self.networks,
            ResourceKind::Volume => &self.volumes,
        }
    }

    /// Every identifier paired with its kind.
    pub fn iter(&self) -> impl Iterator<Item = (ResourceKind, &str)> {
        ResourceKind::ALL
            .into_iter()
            .flat_map(move |kind| self.get(kind).iter().map(move |name| (kind, name.as_str())))
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.networks.is_empty() && self.volumes.is_empty()
    }
}
