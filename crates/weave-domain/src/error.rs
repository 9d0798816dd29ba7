//! Error handling types

use thiserror::Error;

use crate::descriptor::Descriptor;
use crate::tier::Tier;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Weave resolution engine
#[derive(Error, Debug)]
pub enum Error {
    /// No provider matched a single-instance query
    #[error("no provider found for {descriptor}")]
    NotFound {
        /// The query that had no candidates
        descriptor: Descriptor,
    },

    /// More than one candidate survived tie-break within a single tier
    #[error("ambiguous {tier} candidates for {descriptor}: {candidates:?}")]
    Ambiguous {
        /// The query that produced the ambiguity
        descriptor: Descriptor,
        /// The tier in which the ambiguity occurred
        tier: Tier,
        /// Human-readable candidate summaries, in registration order
        candidates: Vec<String>,
    },

    /// The selected provider's construction callback failed
    #[error("construction of {descriptor} failed: {source}")]
    Construction {
        /// What was being constructed
        descriptor: Descriptor,
        /// The underlying cause
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A single provider failed to materialize during initialization
    ///
    /// Recovered locally (skip-and-continue) at initialize time; never fatal
    /// to engine startup.
    #[error("registration '{name}' failed: {message}")]
    Registration {
        /// Registration name
        name: String,
        /// Description of the failure
        message: String,
    },

    /// A resolved instance did not have the concrete type the caller expected
    #[error("instance for {descriptor} has an unexpected concrete type")]
    TypeMismatch {
        /// The query whose result failed to downcast
        descriptor: Descriptor,
    },

    /// Configuration-related error
    #[error("configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },
}

impl Error {
    /// Create a not found error
    pub fn not_found(descriptor: Descriptor) -> Self {
        Self::NotFound { descriptor }
    }

    /// Create an ambiguity error for one tier's candidate list
    pub fn ambiguous(descriptor: Descriptor, tier: Tier, candidates: Vec<String>) -> Self {
        Self::Ambiguous {
            descriptor,
            tier,
            candidates,
        }
    }

    /// Create a construction error with its underlying cause
    pub fn construction(
        descriptor: Descriptor,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Construction { descriptor, source }
    }

    /// Create a registration error
    pub fn registration(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Registration {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(descriptor: Descriptor) -> Self {
        Self::TypeMismatch { descriptor }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
