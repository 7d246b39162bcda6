//! Option liveness
//!
//! Maps an option's declared resource names onto observed engine state.
//! An option is live when any one of its containers, networks or volumes
//! is present. Partially applied options therefore count as live.

use crate::catalog::OptionDef;
use crate::names::{ResourceKind, ResourceNames};
use crate::resolver::Resolver;

/// Point lookups against observed engine state.
pub trait ResourcePresence {
    fn is_present(&self, kind: ResourceKind, name: &str) -> bool;
}

impl<T: ResourcePresence + ?Sized> ResourcePresence for &T {
    fn is_present(&self, kind: ResourceKind, name: &str) -> bool {
        (**self).is_present(kind, name)
    }
}

/// Answers "is this option running?" for a resolver and a presence source.
#[derive(Clone, Copy)]
pub struct Reconciler<'a> {
    resolver: Resolver<'a>,
    presence: &'a dyn ResourcePresence,
}

impl<'a> Reconciler<'a> {
    pub fn new(resolver: Resolver<'a>, presence: &'a dyn ResourcePresence) -> Self {
        Self { resolver, presence }
    }

    /// True when any resource the resolved option declares is present.
    ///
    /// An option that fails to resolve is reported as not live.
    pub fn is_option_live(&self, option: &OptionDef) -> bool {
        match self.resolver.resolve(option) {
            Ok(document) => self.any_present(&ResourceNames::of(&document)),
            Err(e) => {
                tracing::debug!(
                    category = %option.category,
                    option = %option.name,
                    error = %e,
                    "Unresolvable option reported as not live"
                );
                false
            }
        }
    }

    /// True when any of `names` is present.
    pub fn any_present(&self, names: &ResourceNames) -> bool {
        names
            .iter()
            .any(|(kind, name)| self.presence.is_present(kind, name))
    }

    /// Liveness of every catalog option, in catalog order.
    pub fn liveness(&self) -> Vec<(&'a OptionDef, bool)> {
        self.resolver
            .catalog()
            .options()
            .map(|option| (option, self.is_option_live(option)))
            .collect()
    }
}
