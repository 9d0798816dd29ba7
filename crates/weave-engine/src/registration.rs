//! Provider registration - compile-time discovery via linkme
//!
//! External wiring code (generated or hand-written) registers providers by
//! submitting [`ProviderRegistration`] entries into the
//! [`PROVIDER_REGISTRATIONS`] distributed slice. The engine discovers the
//! entries at initialization and asks each one's factory to produce a
//! [`ProviderSpec`] - the buildable recipe the registry turns into a live
//! provider.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Provider Registration Flow                    │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  1. Wiring defines:   #[linkme::distributed_slice(              │
//! │                           PROVIDER_REGISTRATIONS)]              │
//! │                       static ENTRY: ProviderRegistration = ...  │
//! │                              ↓                                  │
//! │  2. Engine collects:  PROVIDER_REGISTRATIONS.iter()             │
//! │                              ↓                                  │
//! │  3. Factory runs:     (entry.spec)() -> ProviderSpec            │
//! │                              ↓                                  │
//! │  4. Registry holds:   Provider (descriptor, tier, scope, ...)   │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Registering a provider
//!
//! ```ignore
//! use std::sync::Arc;
//! use weave_engine::{ProviderRegistration, ProviderSpec, PROVIDER_REGISTRATIONS};
//!
//! #[linkme::distributed_slice(PROVIDER_REGISTRATIONS)]
//! static PLAIN_GREETER: ProviderRegistration = ProviderRegistration {
//!     name: "plain-greeter",
//!     description: "Default greeter implementation",
//!     spec: || Ok(ProviderSpec::of::<dyn Greeter, _>("plain-greeter", |_| {
//!         Ok(Arc::new(PlainGreeter))
//!     })),
//! };
//! ```

use std::sync::Arc;

use weave_domain::{Descriptor, Requirement, ScopePolicy, Tier};

use crate::provider::{BoxError, ConstructFn, Instance};
use crate::registry::ProviderRegistry;

/// Buildable recipe for one provider
///
/// Defaults: unqualified descriptor, unconditional requirement, basic tier,
/// singleton scope. Nested specs (for aggregate providers) inherit nothing
/// implicitly - each carries its own full recipe, and the same defaults
/// apply when a nested recipe leaves tier or scope untouched.
pub struct ProviderSpec {
    pub(crate) name: String,
    pub(crate) descriptor: Descriptor,
    pub(crate) requirement: Requirement,
    pub(crate) tier: Tier,
    pub(crate) scope: ScopePolicy,
    pub(crate) construct: ConstructFn,
    pub(crate) nested: Vec<ProviderSpec>,
}

impl ProviderSpec {
    /// Create a spec for target type `T` with the given construction callback
    ///
    /// The callback returns the service pointer `Arc<T>`; the engine wraps it
    /// into the type-erased [`Instance`] form. `T` may be a trait object.
    pub fn of<T, F>(name: impl Into<String>, factory: F) -> Self
    where
        T: ?Sized + Send + Sync + 'static,
        F: Fn(&ProviderRegistry) -> std::result::Result<Arc<T>, BoxError> + Send + Sync + 'static,
    {
        let construct: ConstructFn =
            Arc::new(move |registry| factory(registry).map(|service| Arc::new(service) as Instance));
        Self {
            name: name.into(),
            descriptor: Descriptor::of::<T>(),
            requirement: Requirement::unconditional(),
            tier: Tier::Basic,
            scope: ScopePolicy::Singleton,
            construct,
            nested: Vec::new(),
        }
    }

    /// Set the advertised qualifier name
    pub fn with_qualifier(mut self, name: impl Into<String>) -> Self {
        self.descriptor = self.descriptor.with_qualifier(name);
        self
    }

    /// Add an advertised qualifier attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.descriptor = self.descriptor.with_attribute(key, value);
        self
    }

    /// Set the activation requirement
    pub fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Set the tie-break tier
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    /// Set the scope policy
    pub fn with_scope(mut self, scope: ScopePolicy) -> Self {
        self.scope = scope;
        self
    }

    /// Attach a nested provider recipe (aggregate providers)
    ///
    /// Nested recipes are expanded flat into the registry at initialization
    /// time, making them independently resolvable.
    pub fn with_nested(mut self, nested: ProviderSpec) -> Self {
        self.nested.push(nested);
        self
    }

    /// Registration name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Advertised descriptor
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }
}

/// Registry entry for a provider
///
/// Each entry is an opaque registration id plus the factory that turns it
/// into a [`ProviderSpec`]. A factory returning `Err` is the non-fatal
/// registration failure path: the engine logs it and skips the entry.
pub struct ProviderRegistration {
    /// Unique registration name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Factory producing the provider recipe
    pub spec: fn() -> std::result::Result<ProviderSpec, String>,
}

// Auto-collection via linkme distributed slices - wiring code submits entries
// at compile time
#[linkme::distributed_slice]
pub static PROVIDER_REGISTRATIONS: [ProviderRegistration] = [..];

/// List all registered providers
///
/// Returns `(name, description)` pairs for every linked registration.
/// Useful for CLI help and admin diagnostics.
pub fn list_registered_providers() -> Vec<(&'static str, &'static str)> {
    PROVIDER_REGISTRATIONS
        .iter()
        .map(|entry| (entry.name, entry.description))
        .collect()
}
