//! Fluid property errors.

use crate::kind::FluidKind;
use tc_core::CoreError;
use thiserror::Error;

/// Result type for fluid operations.
pub type FluidResult<T> = Result<T, FluidError>;

/// Errors that can occur while resolving fluids, states and saturation data.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FluidError {
    /// Name did not match any fluid in the catalog.
    #[error("Fluid not found: '{name}'")]
    FluidNotFound { name: String },

    /// Input outside the fluid's valid envelope.
    #[error("Value out of range for {what}: {value} (valid range {min} to {max})")]
    OutOfRange {
        what: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Property pair that cannot determine a state for this fluid.
    #[error("Invalid property pair {pair} for {fluid}: {reason}")]
    InvalidPropertyPair {
        fluid: FluidKind,
        pair: &'static str,
        reason: &'static str,
    },

    /// Invalid argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-finite input or intermediate value.
    #[error("Non-finite value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    /// A bracketing solve was started without a sign change.
    #[error("Root of {what} is not bracketed by [{lower}, {upper}]")]
    NoBracket {
        what: &'static str,
        lower: f64,
        upper: f64,
    },

    /// Iterative solve did not converge within its bound.
    #[error(
        "Convergence failed for {what} after {iterations} iterations \
         (last iterate {last_iterate}, residual {residual:e})"
    )]
    Convergence {
        what: &'static str,
        iterations: usize,
        last_iterate: f64,
        residual: f64,
    },

    /// Computed state disagrees with the equation of state it came from.
    #[error("Physical consistency check failed for {what}: expected {expected}, got {actual}")]
    PhysicalConsistency {
        what: &'static str,
        expected: f64,
        actual: f64,
    },
}

impl FluidError {
    /// Validation errors can be fixed by the caller and retried; numerical and
    /// consistency failures are terminal for the call that raised them.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FluidNotFound { .. }
                | Self::OutOfRange { .. }
                | Self::InvalidPropertyPair { .. }
                | Self::InvalidArg { .. }
        )
    }
}

impl From<CoreError> for FluidError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NonFinite { what, value } => FluidError::NonFinite { what, value },
            CoreError::InvalidArg { what } => FluidError::InvalidArg { what },
            CoreError::NoBracket { what, lower, upper } => {
                FluidError::NoBracket { what, lower, upper }
            }
            CoreError::Convergence {
                what,
                iterations,
                last_iterate,
                residual,
            } => FluidError::Convergence {
                what,
                iterations,
                last_iterate,
                residual,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FluidError::OutOfRange {
            what: "temperature [°C]",
            value: 900.0,
            min: 0.01,
            max: 800.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("temperature"));
        assert!(msg.contains("900"));
        assert!(msg.contains("800"));

        let err = FluidError::FluidNotFound {
            name: "unobtainium".into(),
        };
        assert!(err.to_string().contains("unobtainium"));
    }

    #[test]
    fn core_errors_keep_their_context() {
        let err: FluidError = CoreError::Convergence {
            what: "temperature",
            iterations: 200,
            last_iterate: 350.0,
            residual: 0.5,
        }
        .into();
        assert_eq!(
            err,
            FluidError::Convergence {
                what: "temperature",
                iterations: 200,
                last_iterate: 350.0,
                residual: 0.5,
            }
        );
        assert!(!err.is_recoverable());
    }

    #[test]
    fn validation_errors_are_recoverable() {
        let err = FluidError::InvalidPropertyPair {
            fluid: FluidKind::Air,
            pair: "P&x",
            reason: "no phase change",
        };
        assert!(err.is_recoverable());
        assert!(
            !FluidError::PhysicalConsistency {
                what: "enthalpy",
                expected: 1.0,
                actual: 2.0
            }
            .is_recoverable()
        );
    }
}
