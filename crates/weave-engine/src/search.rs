//! Tier-bucketed candidate grouping and tie-break selection
//!
//! A [`SearchResult`] is a transient structure scoped to one resolution
//! call: matching providers are partitioned into primary/basic/fallback
//! buckets (in registration order), then [`SearchResult::select`] walks the
//! tiers to pick exactly one winner or fail.

use std::sync::Arc;

use weave_domain::{Descriptor, Error, Result, Tier};

use crate::provider::Provider;

/// Matching providers partitioned by tier, in registration order
#[derive(Default)]
pub(crate) struct SearchResult {
    primary: Vec<Arc<Provider>>,
    basic: Vec<Arc<Provider>>,
    fallback: Vec<Arc<Provider>>,
}

impl SearchResult {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, provider: Arc<Provider>) {
        match provider.tier() {
            Tier::Primary => self.primary.push(provider),
            Tier::Basic => self.basic.push(provider),
            Tier::Fallback => self.fallback.push(provider),
        }
    }

    /// Tie-break: the highest non-empty tier must contain exactly one entry
    ///
    /// A primary candidate wins over any number of basic candidates; the
    /// fallback bucket is consulted only when both higher tiers are empty,
    /// and ambiguity inside any single tier is an error rather than an
    /// arbitrary pick. All buckets empty is a not-found failure.
    pub(crate) fn select(self, query: &Descriptor) -> Result<Arc<Provider>> {
        let buckets = [
            (Tier::Primary, self.primary),
            (Tier::Basic, self.basic),
            (Tier::Fallback, self.fallback),
        ];
        for (tier, mut bucket) in buckets {
            match bucket.len() {
                0 => {}
                1 => return Ok(bucket.remove(0)),
                _ => {
                    let candidates = bucket.iter().map(|p| p.summary()).collect();
                    return Err(Error::ambiguous(query.clone(), tier, candidates));
                }
            }
        }
        Err(Error::not_found(query.clone()))
    }
}
