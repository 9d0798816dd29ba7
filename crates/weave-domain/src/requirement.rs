//! Requirements - environment-tag activation predicates
//!
//! A [`Requirement`] decides whether a provider participates in resolution at
//! all, based on the engine's active environment tags. It is evaluated
//! read-only on every resolution attempt and never cached, since the active
//! set is owned by the engine.

use std::collections::BTreeSet;

/// Conditional-activation predicate attached to a provider
///
/// Satisfied when every required tag is active and no excluded tag is
/// active. Empty sets are always satisfied (unconditional provider).
///
/// A tag listed in both sets makes the requirement permanently
/// unsatisfiable. That is intentional and allowed: it is a legitimate way to
/// disable a provider entirely, so it is not validated away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Requirement {
    required: BTreeSet<String>,
    excluded: BTreeSet<String>,
}

impl Requirement {
    /// A requirement with no conditions, always satisfied
    pub fn unconditional() -> Self {
        Self::default()
    }

    /// Require a tag to be active
    pub fn requires(mut self, tag: impl Into<String>) -> Self {
        self.required.insert(tag.into());
        self
    }

    /// Require a tag to be inactive
    pub fn excludes(mut self, tag: impl Into<String>) -> Self {
        self.excluded.insert(tag.into());
        self
    }

    /// Evaluate against the active environment set
    pub fn is_satisfied(&self, active: &BTreeSet<String>) -> bool {
        self.required.iter().all(|tag| active.contains(tag))
            && self.excluded.iter().all(|tag| !active.contains(tag))
    }
}
