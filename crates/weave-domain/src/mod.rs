//! Domain layer for Weave - Core value objects of the resolution engine
//!
//! This crate holds the pure, dependency-light vocabulary shared by the
//! engine and by registration code:
//!
//! - [`Descriptor`] - a typed, qualified lookup/advertisement key
//! - [`Requirement`] - an environment-tag activation predicate
//! - [`Tier`] - priority classification used by tie-break selection
//! - [`ScopePolicy`] - instance reuse policy (singleton, factory, aggregate)
//! - [`Error`] - the error taxonomy surfaced by resolution
//!
//! Everything here is a plain value: immutable after construction, cheap to
//! clone, and free of engine state.

pub mod descriptor;
pub mod error;
pub mod requirement;
pub mod scope;
pub mod tier;

pub use descriptor::{Descriptor, Qualifier, TypeKey};
pub use error::{Error, Result};
pub use requirement::Requirement;
pub use scope::{AggregateReuse, ScopePolicy};
pub use tier::Tier;
