//! Value types returned by the engines.
//!
//! Nothing here is persisted by the core; callers store or transmit these as
//! they see fit.

// =============================================================================
// Selector Engine
// =============================================================================

/// Which rule produced a selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `tag#id` from a non-volatile id.
    Id,
    /// `tag[name=..][data-testid=..][role=..]`.
    Attributes,
    /// Structural `a > b > c` path with classes and `:nth-of-type`.
    Path,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Attributes => "attributes",
            Self::Path => "path",
        }
    }
}

/// A computed selector together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedSelector {
    pub selector: String,
    pub strategy: Strategy,
}

/// Advisory robustness rating of a selector string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Robustness {
    /// 0..=100
    pub score: u8,
    /// One entry per deduction.
    pub issues: Vec<String>,
    pub is_robust: bool,
}

// =============================================================================
// URL Pattern Engine
// =============================================================================

/// Origin and slash-collapsed path of a URL. Both empty when the URL did not
/// parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedUrl {
    pub origin: String,
    pub path: String,
}

impl NormalizedUrl {
    /// True for the parse-failure sentinel.
    pub fn is_empty(&self) -> bool {
        self.origin.is_empty() && self.path.is_empty()
    }
}

/// Outcome of [`validate_pattern`](crate::pattern::validate_pattern).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternValidation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl PatternValidation {
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(error.into()),
        }
    }
}
