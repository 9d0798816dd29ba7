//! Provider registry - the resolution and lifecycle engine
//!
//! The registry owns the full provider set and the active environment tag
//! set, and performs resolution: requirement filtering, descriptor matching,
//! tie-break selection, and scope-aware instantiation.
//!
//! ```text
//! Descriptor query
//!        │
//!        ▼
//! ┌─────────────────────────────────────┐
//! │ filter: Requirement.is_satisfied     │  ← active environment tags
//! └─────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────┐
//! │ filter: Descriptor.matches           │
//! └─────────────────────────────────────┘
//!        │
//!        ▼
//! ┌─────────────────────────────────────┐
//! │ SearchResult (primary/basic/fallback)│ → tie-break → one Provider
//! └─────────────────────────────────────┘
//!        │
//!        ▼
//! Provider.get() - scope-policy-aware construction
//! ```
//!
//! The registry is built once, single-threaded, and is read-only afterwards;
//! resolution runs from many threads without registry-level locking. Only the
//! per-provider singleton slot synchronizes.

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{info, warn};
use weave_domain::{Descriptor, Error, Result};

use crate::config::EngineConfig;
use crate::provider::{Instance, Provider};
use crate::registration::{ProviderRegistration, ProviderSpec, PROVIDER_REGISTRATIONS};
use crate::search::SearchResult;

/// The resolution and lifecycle engine
///
/// An explicitly constructed, explicitly passed value - there is no
/// process-wide instance, so tests can run many independent registries.
pub struct ProviderRegistry {
    providers: Vec<Arc<Provider>>,
    environments: BTreeSet<String>,
}

impl ProviderRegistry {
    /// Build a registry from a list of provider registrations
    ///
    /// Runs each registration's spec factory and expands aggregate nested
    /// recipes into the flat provider list. A failing registration is logged
    /// and skipped - partial availability with clear per-lookup errors later
    /// is preferable to an all-or-nothing startup failure.
    pub fn initialize<I, S>(registrations: &[ProviderRegistration], environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut specs = Vec::new();
        for registration in registrations {
            match (registration.spec)() {
                Ok(spec) => specs.push(spec),
                Err(message) => {
                    let error = Error::registration(registration.name, message);
                    warn!(%error, "skipping provider registration");
                }
            }
        }
        Self::from_specs(specs, environments)
    }

    /// Build a registry directly from provider recipes
    ///
    /// The manual composition path, for wiring assembled at runtime rather
    /// than submitted through the registration slice.
    pub fn from_specs<I, S>(specs: Vec<ProviderSpec>, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut providers = Vec::new();
        for spec in specs {
            Self::push_spec(&mut providers, spec);
        }
        let environments: BTreeSet<String> = environments.into_iter().map(Into::into).collect();
        info!(
            providers = providers.len(),
            environments = ?environments,
            "provider registry initialized"
        );
        Self {
            providers,
            environments,
        }
    }

    /// Build a registry from the linkme-collected registrations
    pub fn from_linked<I, S>(environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::initialize(&PROVIDER_REGISTRATIONS, environments)
    }

    /// Build a registry from configuration
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::from_linked(config.environments.iter().cloned())
    }

    fn push_spec(providers: &mut Vec<Arc<Provider>>, spec: ProviderSpec) {
        let ProviderSpec {
            name,
            descriptor,
            requirement,
            tier,
            scope,
            construct,
            nested,
        } = spec;
        providers.push(Arc::new(Provider::new(
            name,
            descriptor,
            requirement,
            tier,
            scope,
            construct,
        )));
        for child in nested {
            Self::push_spec(providers, child);
        }
    }

    /// Replace the active environment tag set
    ///
    /// Callable before the registry is shared; once resolution runs from
    /// multiple threads the set is immutable (enforced by `&mut self`).
    pub fn set_environments<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.environments = tags.into_iter().map(Into::into).collect();
    }

    /// The active environment tags
    pub fn environments(&self) -> &BTreeSet<String> {
        &self.environments
    }

    /// Number of registered providers
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// True when no provider is registered
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Human-readable provider summaries, in registration order
    pub fn provider_summaries(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.summary()).collect()
    }

    // ========================================================================
    // Resolution
    // ========================================================================

    /// Resolve exactly one instance for the query
    ///
    /// Filters by requirement satisfaction, then by descriptor match, groups
    /// the matches by tier and applies tie-break: the highest non-empty tier
    /// must hold exactly one candidate. The winner's scope policy decides
    /// between a cached and a fresh instance.
    pub fn resolve_one(&self, descriptor: &Descriptor) -> Result<Instance> {
        let provider = self.search(descriptor).select(descriptor)?;
        provider.get(self)
    }

    /// Resolve every matching instance, in registration order
    ///
    /// Multiplicity is expected here: no tie-break runs, every
    /// requirement-satisfied matching provider contributes, and zero matches
    /// is an empty list rather than an error. A construction failure still
    /// propagates.
    pub fn resolve_all(&self, descriptor: &Descriptor) -> Result<Vec<Instance>> {
        self.matching(descriptor).map(|p| p.get(self)).collect()
    }

    /// Resolve the unqualified `T`
    pub fn resolve<T>(&self) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(&Descriptor::of::<T>())
    }

    /// Resolve `T` under a qualifier name
    pub fn resolve_named<T>(&self, qualifier: &str) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.resolve_with(&Descriptor::of::<T>().with_qualifier(qualifier))
    }

    /// Resolve one typed instance for an explicit descriptor
    pub fn resolve_with<T>(&self, descriptor: &Descriptor) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let instance = self.resolve_one(descriptor)?;
        Self::downcast(descriptor, instance)
    }

    /// Resolve every matching instance of the unqualified `T`
    pub fn resolve_all_of<T>(&self) -> Result<Vec<Arc<T>>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let descriptor = Descriptor::of::<T>();
        self.resolve_all(&descriptor)?
            .into_iter()
            .map(|instance| Self::downcast(&descriptor, instance))
            .collect()
    }

    fn matching<'a>(
        &'a self,
        descriptor: &'a Descriptor,
    ) -> impl Iterator<Item = &'a Arc<Provider>> + 'a {
        self.providers.iter().filter(move |provider| {
            provider.requirement().is_satisfied(&self.environments)
                && descriptor.matches(provider.descriptor())
        })
    }

    fn search(&self, descriptor: &Descriptor) -> SearchResult {
        let mut result = SearchResult::new();
        for provider in self.matching(descriptor) {
            result.push(provider.clone());
        }
        result
    }

    fn downcast<T>(descriptor: &Descriptor, instance: Instance) -> Result<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        instance
            .downcast::<Arc<T>>()
            .map(|service| (*service).clone())
            .map_err(|_| Error::type_mismatch(descriptor.clone()))
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.providers.len())
            .field("environments", &self.environments)
            .finish()
    }
}
