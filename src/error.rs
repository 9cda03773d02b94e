//! Error types reported by table construction and mutation.

use std::{error, fmt};

/// Failures a [`QuadMap`](crate::QuadMap) operation can report.
///
/// Key absence is not an error; lookups report it through `Option` and
/// `bool` results. All failures here are local and recoverable: the caller
/// can resize, change parameters or pick different keys and try again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuadMapError {
    /// The probe sequence visited `capacity` candidate slots without finding
    /// an empty one. The table may be full, or the quadratic sequence may be
    /// unable to reach the slots that remain free.
    CapacityExhausted {
        /// Slot count of the table at the time of the failed insert
        capacity: usize,
    },
    /// A construction or resize asked for a zero-slot table
    InvalidCapacity(usize),
}

impl fmt::Display for QuadMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExhausted { capacity } => {
                write!(f, "no empty slot within {capacity} probe attempts")
            }
            Self::InvalidCapacity(capacity) => {
                write!(f, "capacity must be positive, got {capacity}")
            }
        }
    }
}

impl error::Error for QuadMapError {}
