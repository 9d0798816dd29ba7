//! Scope policies controlling instance reuse

/// Reuse behavior of an aggregate provider's own instance
///
/// Aggregate providers expose nested providers to the engine at
/// initialization time; how their *own* instance is cached is a separate,
/// configurable choice rather than a fixed rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AggregateReuse {
    /// Construct once and share the cached instance (singleton-like)
    #[default]
    Shared,
    /// Construct fresh on every resolution (factory-like)
    Fresh,
}

/// Instance reuse policy of a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePolicy {
    /// Built at most once, cached for the life of the engine
    ///
    /// Concurrent first access is serialized so the construction callback
    /// runs at most once; a construction failure resets the cache slot so a
    /// later call can retry.
    Singleton,
    /// A fresh instance on every call, never cached
    ///
    /// Concurrent calls may run the construction callback concurrently and
    /// each caller gets a distinct instance.
    Factory,
    /// A provider that is also a source of nested providers
    ///
    /// Nested providers are merged into the engine registry at
    /// initialization time and become independently resolvable. The
    /// aggregate's own instance follows [`AggregateReuse`].
    Aggregate {
        /// Reuse behavior of the aggregate's own instance
        reuse: AggregateReuse,
    },
}

impl ScopePolicy {
    /// The default aggregate policy (shared instance)
    pub fn aggregate() -> Self {
        ScopePolicy::Aggregate {
            reuse: AggregateReuse::default(),
        }
    }

    /// True when instances produced under this policy are cached and shared
    pub fn is_shared(self) -> bool {
        matches!(
            self,
            ScopePolicy::Singleton
                | ScopePolicy::Aggregate {
                    reuse: AggregateReuse::Shared
                }
        )
    }
}
