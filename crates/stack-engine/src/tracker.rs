//! Live resource state
//!
//! [`LiveState`] caches which containers, networks and volumes the engine
//! reported on the last successful query of each kind. Each kind's set is
//! an immutable `Arc<HashSet<String>>` behind its own lock and is only
//! ever swapped whole, so readers see either the old set or the new one.
//!
//! A poll queries all three kinds. A kind whose query fails keeps its
//! previous set; the other kinds still update.

use crate::query::{EngineQuery, parse_listing};
use parking_lot::RwLock;
use stack_core::{ResourceKind, ResourcePresence};
use std::collections::HashSet;
use std::sync::Arc;

type NameSet = Arc<HashSet<String>>;

/// Outcome of one poll, per kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollReport {
    /// Kinds whose set was replaced
    pub updated: Vec<ResourceKind>,
    /// Kinds whose query failed, with the error message
    pub failed: Vec<(ResourceKind, String)>,
}

impl PollReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Thread-safe snapshot of engine resources.
#[derive(Debug, Default)]
pub struct LiveState {
    containers: RwLock<NameSet>,
    networks: RwLock<NameSet>,
    volumes: RwLock<NameSet>,
}

impl LiveState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: ResourceKind) -> &RwLock<NameSet> {
        match kind {
            ResourceKind::Container => &self.containers,
            ResourceKind::Network => &self.networks,
            ResourceKind::Volume => &self.volumes,
        }
    }

    /// Query every kind and replace the sets whose query succeeded.
    pub fn poll(&self, query: &dyn EngineQuery) -> PollReport {
        let mut report = PollReport::default();
        for kind in ResourceKind::ALL {
            match query.list(kind) {
                Ok(raw) => {
                    self.replace(kind, parse_listing(&raw));
                    report.updated.push(kind);
                }
                Err(e) => {
                    tracing::warn!(kind = %kind, error = %e, "Query failed, keeping previous state");
                    report.failed.push((kind, e.to_string()));
                }
            }
        }
        tracing::debug!(
            updated = report.updated.len(),
            failed = report.failed.len(),
            "Polled engine state"
        );
        report
    }

    /// Swap in a new set for `kind`.
    pub fn replace(&self, kind: ResourceKind, names: HashSet<String>) {
        // Build outside the lock; the write only swaps a pointer
        let names = Arc::new(names);
        *self.slot(kind).write() = names;
    }

    /// Whether `name` was present at the last successful query of `kind`.
    pub fn is_present(&self, kind: ResourceKind, name: &str) -> bool {
        self.slot(kind).read().contains(name)
    }

    /// The current set for `kind`. Later polls do not affect it.
    pub fn snapshot(&self, kind: ResourceKind) -> Arc<HashSet<String>> {
        Arc::clone(&self.slot(kind).read())
    }
}

impl ResourcePresence for LiveState {
    fn is_present(&self, kind: ResourceKind, name: &str) -> bool {
        LiveState::is_present(self, kind, name)
    }
}
