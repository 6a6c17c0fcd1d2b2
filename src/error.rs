use std::collections::TryReserveError;

/// Failures reported by the skip list. Lookups that miss are not errors: they
/// return `None`.
#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// The requested maximum height is zero or above `MAX_HEIGHT_LIMIT`.
    InvalidMaxHeight(usize),

    /// The level upgrade probability is not inside the open interval (0, 1).
    InvalidProbability(f64),

    /// Storage for a new node could not be reserved. The list is left exactly
    /// as it was before the failed call.
    Alloc(TryReserveError),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::InvalidMaxHeight(height) => write!(
                f,
                "invalid maximum height {} (expected 1..={})",
                height,
                crate::config::MAX_HEIGHT_LIMIT
            ),
            Error::InvalidProbability(probability) => write!(
                f,
                "invalid upgrade probability {} (expected a value strictly between 0 and 1)",
                probability
            ),
            Error::Alloc(ref source) => write!(f, "failed to allocate a node: {}", source),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::Alloc(ref source) => Some(source),
            _ => None,
        }
    }
}

impl From<TryReserveError> for Error {
    fn from(source: TryReserveError) -> Error {
        Error::Alloc(source)
    }
}
