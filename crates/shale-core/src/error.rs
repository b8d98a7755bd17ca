//! Error taxonomy shared across the workspace.

use thiserror::Error;

use crate::motion::MotionKind;
use crate::wave::WaveField;

/// Errors produced by output configuration and invocation.
///
/// All failures are immediate, synchronous, and non-retryable: they indicate
/// configuration errors, not transient conditions.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A time-series output was invoked against a motion with no time
    /// discretization.
    #[error("time-series output requires a time-domain motion, got {found}")]
    UnsupportedMotionKind {
        /// Kind of the offending motion.
        found: MotionKind,
    },

    /// An output was configured in a way its variant does not allow.
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A depth or index could not be mapped onto the profile.
    #[error("cannot resolve {wave_field} location at {target}")]
    UnresolvedLocation {
        /// Requested wave field.
        wave_field: WaveField,
        /// The depth or index that failed to resolve.
        target: String,
    },
}

/// Result type for site-response output operations.
pub type Result<T> = std::result::Result<T, Error>;
