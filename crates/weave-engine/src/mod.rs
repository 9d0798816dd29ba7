//! Weave engine - resolution and lifecycle for registered providers
//!
//! Given a set of registered component providers, the engine resolves,
//! constructs, scopes, and caches instances on behalf of consumers that
//! declare typed, qualified dependencies.
//!
//! ## Architecture
//!
//! ```text
//! linkme (compile-time)          ProviderRegistry (runtime)
//! ─────────────────────          ──────────────────────────
//! PROVIDER_REGISTRATIONS    →    initialize() / from_linked()
//!                                       ↓
//!                                resolve_one(descriptor)
//!                                       ↓
//!                  requirement filter → descriptor match → tie-break
//!                                       ↓
//!                                Provider.get()  (scope policy)
//! ```
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use weave_engine::{ProviderRegistry, ProviderSpec, ProviderRegistration};
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self) -> String;
//! }
//!
//! struct PlainGreeter;
//!
//! impl Greeter for PlainGreeter {
//!     fn greet(&self) -> String {
//!         "hello".into()
//!     }
//! }
//!
//! static GREETER: ProviderRegistration = ProviderRegistration {
//!     name: "plain-greeter",
//!     description: "Default greeter",
//!     spec: || Ok(ProviderSpec::of::<dyn Greeter, _>("plain-greeter", |_| {
//!         Ok(Arc::new(PlainGreeter))
//!     })),
//! };
//!
//! let registry = ProviderRegistry::initialize(std::slice::from_ref(&GREETER), ["prod"]);
//! let greeter: Arc<dyn Greeter> = registry.resolve::<dyn Greeter>().unwrap();
//! assert_eq!(greeter.greet(), "hello");
//! ```

pub mod config;
pub mod provider;
pub mod registration;
pub mod registry;

mod search;

// Re-export the domain vocabulary so consumers depend on one crate
pub use weave_domain::{
    AggregateReuse, Descriptor, Error, Qualifier, Requirement, Result, ScopePolicy, Tier, TypeKey,
};

pub use config::EngineConfig;
pub use provider::{BoxError, ConstructFn, Instance, Provider};
pub use registration::{
    list_registered_providers, ProviderRegistration, ProviderSpec, PROVIDER_REGISTRATIONS,
};
pub use registry::ProviderRegistry;
