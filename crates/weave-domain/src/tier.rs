//! Priority tiers for tie-break selection

use std::fmt;

/// Priority classification of a provider, used only by tie-break selection
///
/// A primary provider exists specifically to disambiguate an otherwise
/// ambiguous set. A fallback provider is chosen only when nothing else
/// matched, and ambiguity inside the fallback tier is still an error rather
/// than an arbitrary pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Wins over any number of basic candidates
    Primary,
    /// The default tier
    Basic,
    /// Considered only when no primary or basic provider matched
    Fallback,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Primary => f.write_str("primary"),
            Tier::Basic => f.write_str("basic"),
            Tier::Fallback => f.write_str("fallback"),
        }
    }
}
