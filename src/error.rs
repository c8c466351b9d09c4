//! Error types for teigr

use crate::runtime::Target;
use thiserror::Error;

/// Result type alias using teigr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in teigr operations
///
/// All variants are fatal for the pipeline invocation that produced them:
/// no stage retries or falls back, and the caller must discard the matrix
/// and output vectors on any error. Programming-contract violations
/// (malformed tiles, touching a non-local tile) panic instead of returning
/// an error, since they indicate caller misuse rather than a runtime
/// condition.
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch between operands or against an expected shape
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Tile distributions of two containers disagree where they must match
    #[error("Distribution mismatch: {reason}")]
    DistributionMismatch {
        /// What disagreed
        reason: String,
    },

    /// The requested execution target has no backend compiled in
    #[error("Unsupported execution target {target:?}")]
    UnsupportedTarget {
        /// The requested target
        target: Target,
    },

    /// The task-parallel runtime could not be set up or a submission failed
    #[error("Task submission failed: {reason}")]
    TaskSubmission {
        /// Underlying cause
        reason: String,
    },

    /// Cross-process transport was required but none is connected
    ///
    /// The single-process communicator returns this for any send/recv,
    /// since all tiles it can see are local by construction.
    #[error("Transport unavailable: cannot reach rank {rank} from rank {from}")]
    TransportUnavailable {
        /// Destination or source rank
        rank: usize,
        /// Calling rank
        from: usize,
    },

    /// Iterative eigenvalue computation exceeded its iteration budget
    #[error(
        "Eigenvalue iteration failed to converge: {remaining} off-diagonal \
         entries still live after {iterations} iterations"
    )]
    NonConvergence {
        /// Iterations performed before giving up
        iterations: usize,
        /// Off-diagonal entries not yet deflated
        remaining: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }
}
