//! Error type shared by every page

use std::fmt;

/// Result alias used by all page operations
pub type PageResult<T> = Result<T, PageError>;

/// Why a page operation was rejected.
///
/// Every check runs before the page is touched, so an `Err` never leaves
/// a half-applied change behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    /// Input failed a precondition (blank text, bad number, malformed code)
    Validation(String),
    /// The page is not in a state that allows the operation
    State(String),
    /// An index fell outside `[0, len)`
    Range {
        what: &'static str,
        index: usize,
        len: usize,
    },
    /// Lookup by exact value found nothing
    NotFound(String),
}

impl PageError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn state(message: impl Into<String>) -> Self {
        Self::State(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self, Self::Range { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation failed: {}", msg),
            Self::State(msg) => write!(f, "invalid state: {}", msg),
            Self::Range { what, index, len } => {
                write!(f, "{} index {} out of range (len {})", what, index, len)
            }
            Self::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for PageError {}
