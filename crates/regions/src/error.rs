//! Error taxonomy shared by region construction, sectioning, and the copy driver.

use std::fmt;

/// Errors reported by region factories, region queries, and region-driven copies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// Malformed input: empty/mismatched arrays, bad ranges, non-finite coordinates.
    InvalidArgument { reason: String },
    /// The `n+1` simplex vertices are affinely dependent.
    DegenerateSimplex { reason: String },
    /// The region does not provide the requested capability (e.g. `contains` on a polygon).
    Unsupported { reason: String },
    /// The request makes no sense in the current state (e.g. section of a 1-D region).
    InvalidState { reason: String },
    /// An algorithm invariant broke; indicates a bug, not bad input.
    InternalInvariant { reason: String },
    /// The result would need more memory than can be reserved.
    ResourceExhausted { requested: usize },
    /// A region point (or its shifted source point) lies outside a matrix.
    OutOfBounds { reason: String },
}

impl RegionError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateSimplex {
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(reason: impl Into<String>) -> Self {
        Self::Unsupported {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    pub(crate) fn invariant(reason: impl Into<String>) -> Self {
        Self::InternalInvariant {
            reason: reason.into(),
        }
    }

    pub(crate) fn out_of_bounds(reason: impl Into<String>) -> Self {
        Self::OutOfBounds {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { reason } => write!(f, "invalid argument: {reason}"),
            Self::DegenerateSimplex { reason } => write!(f, "degenerate simplex: {reason}"),
            Self::Unsupported { reason } => write!(f, "unsupported operation: {reason}"),
            Self::InvalidState { reason } => write!(f, "invalid state: {reason}"),
            Self::InternalInvariant { reason } => write!(f, "internal invariant violated: {reason}"),
            Self::ResourceExhausted { requested } => {
                write!(f, "cannot allocate {requested} result segments")
            }
            Self::OutOfBounds { reason } => write!(f, "index out of bounds: {reason}"),
        }
    }
}

impl std::error::Error for RegionError {}
