//! Providers - scope-policy-aware instance factories
//!
//! A [`Provider`] combines a descriptor (what it produces), a requirement
//! (when it participates), a tier (how tie-break ranks it), a scope policy
//! (whether instances are reused), and the opaque construction callback
//! supplied by external wiring code.
//!
//! Instances travel as [`Instance`] - a type-erased `Arc` whose payload is
//! the service pointer `Arc<T>`. Wrapping the pointer itself (rather than the
//! service) keeps unsized trait-object services downcastable.

use std::any::Any;
use std::sync::{Arc, Mutex};

use weave_domain::{Descriptor, Error, Requirement, Result, ScopePolicy, Tier};

use crate::registry::ProviderRegistry;

/// Type-erased shared instance produced by a provider
///
/// The payload behind `dyn Any` is always `Arc<T>` for the advertised target
/// type `T`.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Error type returned by construction callbacks
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Opaque construction callback supplied by external wiring code
///
/// The callback receives the registry so generated wiring can resolve its
/// own constructor dependencies through the engine.
pub type ConstructFn =
    Arc<dyn Fn(&ProviderRegistry) -> std::result::Result<Instance, BoxError> + Send + Sync>;

/// A registered, scoped instance factory
///
/// Tier and scope policy are fixed at registration and never change. For
/// shared scopes the provider owns a lazily populated, at-most-once-written
/// cache slot; the slot mutex serializes concurrent first access so the
/// construction callback runs at most once, and a construction failure
/// leaves the slot empty so a later call retries.
pub struct Provider {
    name: String,
    descriptor: Descriptor,
    requirement: Requirement,
    tier: Tier,
    scope: ScopePolicy,
    construct: ConstructFn,
    slot: Mutex<Option<Instance>>,
}

impl Provider {
    pub(crate) fn new(
        name: String,
        descriptor: Descriptor,
        requirement: Requirement,
        tier: Tier,
        scope: ScopePolicy,
        construct: ConstructFn,
    ) -> Self {
        Self {
            name,
            descriptor,
            requirement,
            tier,
            scope,
            construct,
            slot: Mutex::new(None),
        }
    }

    /// Registration name, for diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What this provider produces
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// When this provider participates
    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Tie-break tier
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Instance reuse policy
    pub fn scope(&self) -> ScopePolicy {
        self.scope
    }

    /// Human-readable summary used in ambiguity errors
    pub fn summary(&self) -> String {
        format!("{} ({}, {} tier)", self.name, self.descriptor, self.tier)
    }

    /// Produce an instance according to the scope policy
    pub(crate) fn get(&self, registry: &ProviderRegistry) -> Result<Instance> {
        if self.scope.is_shared() {
            self.get_or_init(registry)
        } else {
            self.construct_fresh(registry)
        }
    }

    /// Shared-scope path: return the cached instance or build it under the
    /// slot lock. The lock is held across the callback, so concurrent first
    /// callers block until construction completes or fails.
    fn get_or_init(&self, registry: &ProviderRegistry) -> Result<Instance> {
        let mut slot = match self.slot.lock() {
            Ok(guard) => guard,
            // A poisoned slot means a callback panicked before writing; the
            // slot is still empty and construction can be retried.
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(instance) = slot.as_ref() {
            return Ok(instance.clone());
        }
        let instance = self.construct_fresh(registry)?;
        *slot = Some(instance.clone());
        Ok(instance)
    }

    fn construct_fresh(&self, registry: &ProviderRegistry) -> Result<Instance> {
        (self.construct)(registry)
            .map_err(|source| Error::construction(self.descriptor.clone(), source))
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("name", &self.name)
            .field("descriptor", &self.descriptor)
            .field("tier", &self.tier)
            .field("scope", &self.scope)
            .finish()
    }
}
