//! Error types for process calculations.

use tc_fluids::{FluidError, FluidKind};
use thiserror::Error;
use tracing::warn;

/// Errors that can occur while running a process.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessError {
    /// Process parameters rejected before any property evaluation.
    #[error("Invalid process parameter: {what} (got {value})")]
    InvalidSpec { what: &'static str, value: f64 },

    #[error("Inlet state is {state} but the fluid handle is {handle}")]
    FluidMismatch { handle: FluidKind, state: FluidKind },

    /// Outlet violates a conservation or second-law constraint of the process.
    #[error("Physical consistency check failed for {what}: reference {reference}, actual {actual}")]
    PhysicalConsistency {
        what: &'static str,
        reference: f64,
        actual: f64,
    },

    #[error(transparent)]
    Fluid(#[from] FluidError),
}

pub type EngineResult<T> = Result<T, ProcessError>;

impl ProcessError {
    /// Whether the caller can fix the input and retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidSpec { .. } | Self::FluidMismatch { .. } => true,
            Self::PhysicalConsistency { .. } => false,
            Self::Fluid(e) => e.is_recoverable(),
        }
    }
}

/// Build a consistency error, logging it first so the failure is visible even
/// when the caller discards the error.
pub(crate) fn consistency_violation(
    what: &'static str,
    reference: f64,
    actual: f64,
) -> ProcessError {
    warn!(what, reference, actual, "process outlet failed consistency check");
    ProcessError::PhysicalConsistency {
        what,
        reference,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ProcessError::InvalidSpec {
            what: "isentropic efficiency must be in (0, 1]",
            value: 1.2,
        };
        let msg = err.to_string();
        assert!(msg.contains("efficiency"));
        assert!(msg.contains("1.2"));
    }

    #[test]
    fn fluid_errors_pass_through() {
        let err: ProcessError = FluidError::FluidNotFound {
            name: "argon".into(),
        }
        .into();
        assert!(err.to_string().contains("argon"));
        assert!(err.is_recoverable());
    }

    #[test]
    fn recoverability_follows_taxonomy() {
        assert!(
            ProcessError::InvalidSpec {
                what: "x",
                value: 0.0
            }
            .is_recoverable()
        );
        assert!(
            !ProcessError::PhysicalConsistency {
                what: "entropy",
                reference: 1.0,
                actual: 0.9
            }
            .is_recoverable()
        );
        let numerical: ProcessError = FluidError::Convergence {
            what: "T(P, v)",
            iterations: 200,
            last_iterate: 300.0,
            residual: 1e-3,
        }
        .into();
        assert!(!numerical.is_recoverable());
    }
}
