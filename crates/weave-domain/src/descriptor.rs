//! Descriptors - typed, qualified lookup and advertisement keys
//!
//! A [`Descriptor`] is used in both directions: a provider advertises what it
//! produces, and a consumer asks for a dependency. Matching is an exact value
//! comparison - type key equality plus qualifier equality. There is no
//! partial or fuzzy matching; this is the only correctness gate that runs
//! before tier and requirement logic.
//!
//! Trait objects are first-class targets. Since Rust has no runtime
//! subtyping, the trait object *is* the assignability seam: a provider that
//! serves `dyn Greeter` advertises `Descriptor::of::<dyn Greeter>()`, and
//! consumers query the same key.

use std::any::TypeId;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Type identity of a resolution target
///
/// Wraps a [`TypeId`] together with the human-readable type name captured at
/// the same site. Equality and hashing use the id only; the name exists for
/// diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Capture the type key for `T`
    ///
    /// `T` may be unsized, so trait objects work: `TypeKey::of::<dyn Svc>()`.
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Human-readable type name for diagnostics
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Qualifier attached to a descriptor
///
/// A qualifier is a name plus an ordered attribute map. The empty qualifier
/// means "unqualified" and matches only providers advertised without a
/// qualifier - it is not a wildcard. Enum-derived qualifier tags map onto the
/// attribute map with a namespace-style key, giving them a stable
/// `(namespace, tag)` identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Qualifier {
    name: String,
    attributes: BTreeMap<String, String>,
}

impl Qualifier {
    /// The empty (unqualified) qualifier
    pub fn none() -> Self {
        Self::default()
    }

    /// Create a named qualifier
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    /// Add a qualifier attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Qualifier name, empty for unqualified
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True when neither a name nor attributes are set
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.attributes.is_empty()
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.name)?;
        for (key, value) in &self.attributes {
            write!(f, " {key}={value}")?;
        }
        Ok(())
    }
}

/// Typed, qualified lookup/advertisement key
///
/// Immutable once in use; the `with_*` steps consume `self` and are meant to
/// run once, at construction.
///
/// # Example
///
/// ```
/// use weave_domain::Descriptor;
///
/// trait Greeter {}
///
/// let advertised = Descriptor::of::<dyn Greeter>().with_qualifier("loud");
/// let query = Descriptor::of::<dyn Greeter>().with_qualifier("loud");
/// assert!(query.matches(&advertised));
///
/// // An unqualified query is not a wildcard.
/// assert!(!Descriptor::of::<dyn Greeter>().matches(&advertised));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    target: TypeKey,
    qualifier: Qualifier,
}

impl Descriptor {
    /// Create an unqualified descriptor for `T`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            target: TypeKey::of::<T>(),
            qualifier: Qualifier::none(),
        }
    }

    /// Set the qualifier name
    pub fn with_qualifier(mut self, name: impl Into<String>) -> Self {
        self.qualifier.name = name.into();
        self
    }

    /// Add a qualifier attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.qualifier = self.qualifier.with_attribute(key, value);
        self
    }

    /// Target type key
    pub fn target(&self) -> &TypeKey {
        &self.target
    }

    /// Qualifier, empty when unqualified
    pub fn qualifier(&self) -> &Qualifier {
        &self.qualifier
    }

    /// Exact match against an advertised descriptor
    ///
    /// True iff the target type keys are equal and the qualifiers are equal,
    /// including the empty-qualifier case. Pure value comparison.
    pub fn matches(&self, advertised: &Descriptor) -> bool {
        self.target == advertised.target && self.qualifier == advertised.qualifier
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.qualifier.is_empty() {
            write!(f, "{}", self.target)
        } else {
            write!(f, "{} [{}]", self.target, self.qualifier)
        }
    }
}
