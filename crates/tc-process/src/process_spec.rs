//! Process parameters and their validation.

use crate::error::{EngineResult, ProcessError};
use tc_core::numeric::{Tolerances, nearly_equal};

/// Second boundary of an isobaric process.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsobaricTarget {
    /// Outlet temperature [°C].
    Temperature(f64),
    /// Outlet specific enthalpy [kJ/kg].
    Enthalpy(f64),
}

/// Second boundary of an isochoric process.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IsochoricTarget {
    /// Outlet temperature [°C].
    Temperature(f64),
    /// Outlet pressure [kPa].
    Pressure(f64),
}

/// A process to apply to an inlet state.
///
/// Built by the caller, checked once by [`ProcessSpec::validate`] and then
/// consumed by the engine. Pressures are in kPa.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessSpec {
    Isentropic {
        outlet_pressure_kpa: f64,
        /// Isentropic efficiency in (0, 1].
        efficiency: f64,
    },
    Isobaric {
        target: IsobaricTarget,
    },
    Isochoric {
        target: IsochoricTarget,
    },
    Throttling {
        outlet_pressure_kpa: f64,
    },
    Polytropic {
        outlet_pressure_kpa: f64,
        /// Exponent n in P·vⁿ = const.
        exponent: f64,
    },
}

/// Process kind without parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProcessKind {
    Isentropic,
    Isobaric,
    Isochoric,
    Throttling,
    Polytropic,
}

impl ProcessKind {
    pub const ALL: [ProcessKind; 5] = [
        ProcessKind::Isentropic,
        ProcessKind::Isobaric,
        ProcessKind::Isochoric,
        ProcessKind::Throttling,
        ProcessKind::Polytropic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Isentropic => "isentropic",
            Self::Isobaric => "isobaric",
            Self::Isochoric => "isochoric",
            Self::Throttling => "throttling",
            Self::Polytropic => "polytropic",
        }
    }
}

impl std::fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Direction of a pressure-changing process, inferred from the pressure ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compression,
    Expansion,
    /// Outlet pressure equals inlet pressure to rounding.
    Neutral,
}

impl Direction {
    pub fn from_pressures(inlet_kpa: f64, outlet_kpa: f64) -> Self {
        if nearly_equal(inlet_kpa, outlet_kpa, Tolerances::default()) {
            Self::Neutral
        } else if outlet_kpa > inlet_kpa {
            Self::Compression
        } else {
            Self::Expansion
        }
    }
}

impl ProcessSpec {
    pub fn isentropic(outlet_pressure_kpa: f64, efficiency: f64) -> Self {
        Self::Isentropic {
            outlet_pressure_kpa,
            efficiency,
        }
    }

    pub fn isobaric(target: IsobaricTarget) -> Self {
        Self::Isobaric { target }
    }

    pub fn isochoric(target: IsochoricTarget) -> Self {
        Self::Isochoric { target }
    }

    pub fn throttling(outlet_pressure_kpa: f64) -> Self {
        Self::Throttling {
            outlet_pressure_kpa,
        }
    }

    pub fn polytropic(outlet_pressure_kpa: f64, exponent: f64) -> Self {
        Self::Polytropic {
            outlet_pressure_kpa,
            exponent,
        }
    }

    pub fn kind(&self) -> ProcessKind {
        match self {
            Self::Isentropic { .. } => ProcessKind::Isentropic,
            Self::Isobaric { .. } => ProcessKind::Isobaric,
            Self::Isochoric { .. } => ProcessKind::Isochoric,
            Self::Throttling { .. } => ProcessKind::Throttling,
            Self::Polytropic { .. } => ProcessKind::Polytropic,
        }
    }

    /// Outlet pressure fixed by the process parameters, if any.
    pub fn outlet_pressure_kpa(&self) -> Option<f64> {
        match *self {
            Self::Isentropic {
                outlet_pressure_kpa,
                ..
            }
            | Self::Throttling {
                outlet_pressure_kpa,
            }
            | Self::Polytropic {
                outlet_pressure_kpa,
                ..
            } => Some(outlet_pressure_kpa),
            Self::Isochoric {
                target: IsochoricTarget::Pressure(p),
            } => Some(p),
            Self::Isobaric { .. } | Self::Isochoric { .. } => None,
        }
    }

    /// Check the parameters without touching any fluid data.
    ///
    /// Range checks against a particular fluid happen later, in the resolver.
    pub fn validate(&self) -> EngineResult<()> {
        match *self {
            Self::Isentropic {
                outlet_pressure_kpa,
                efficiency,
            } => {
                check_pressure(outlet_pressure_kpa)?;
                if !efficiency.is_finite() || efficiency <= 0.0 || efficiency > 1.0 {
                    return Err(ProcessError::InvalidSpec {
                        what: "isentropic efficiency must be in (0, 1]",
                        value: efficiency,
                    });
                }
            }
            Self::Isobaric { target } => match target {
                IsobaricTarget::Temperature(t) => check_finite("target temperature", t)?,
                IsobaricTarget::Enthalpy(h) => check_finite("target enthalpy", h)?,
            },
            Self::Isochoric { target } => match target {
                IsochoricTarget::Temperature(t) => check_finite("target temperature", t)?,
                IsochoricTarget::Pressure(p) => check_pressure(p)?,
            },
            Self::Throttling {
                outlet_pressure_kpa,
            } => check_pressure(outlet_pressure_kpa)?,
            Self::Polytropic {
                outlet_pressure_kpa,
                exponent,
            } => {
                check_pressure(outlet_pressure_kpa)?;
                if !exponent.is_finite() || exponent <= 0.0 {
                    return Err(ProcessError::InvalidSpec {
                        what: "polytropic exponent must be positive",
                        value: exponent,
                    });
                }
            }
        }
        Ok(())
    }
}

fn check_pressure(p_kpa: f64) -> EngineResult<()> {
    if !p_kpa.is_finite() || p_kpa <= 0.0 {
        return Err(ProcessError::InvalidSpec {
            what: "outlet pressure must be positive and finite",
            value: p_kpa,
        });
    }
    Ok(())
}

fn check_finite(what: &'static str, value: f64) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(ProcessError::InvalidSpec { what, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn efficiency_bounds() {
        assert!(ProcessSpec::isentropic(800.0, 1.0).validate().is_ok());
        assert!(ProcessSpec::isentropic(800.0, 0.85).validate().is_ok());
        for eta in [0.0, -0.5, 1.000_001, f64::NAN] {
            let err = ProcessSpec::isentropic(800.0, eta).validate().unwrap_err();
            assert!(matches!(err, ProcessError::InvalidSpec { .. }), "eta = {eta}");
        }
    }

    #[test]
    fn polytropic_exponent_must_be_positive() {
        assert!(ProcessSpec::polytropic(500.0, 1.3).validate().is_ok());
        assert!(ProcessSpec::polytropic(500.0, 1.0).validate().is_ok());
        assert!(ProcessSpec::polytropic(500.0, 0.0).validate().is_err());
        assert!(ProcessSpec::polytropic(500.0, -1.2).validate().is_err());
        assert!(ProcessSpec::polytropic(500.0, f64::INFINITY).validate().is_err());
    }

    #[test]
    fn pressures_must_be_positive() {
        assert!(ProcessSpec::throttling(0.0).validate().is_err());
        assert!(ProcessSpec::throttling(-10.0).validate().is_err());
        assert!(ProcessSpec::isentropic(f64::NAN, 0.9).validate().is_err());
        assert!(
            ProcessSpec::isochoric(IsochoricTarget::Pressure(0.0))
                .validate()
                .is_err()
        );
        assert!(
            ProcessSpec::isobaric(IsobaricTarget::Temperature(f64::NAN))
                .validate()
                .is_err()
        );
    }

    #[test]
    fn kind_and_outlet_pressure() {
        let spec = ProcessSpec::throttling(150.0);
        assert_eq!(spec.kind(), ProcessKind::Throttling);
        assert_eq!(spec.outlet_pressure_kpa(), Some(150.0));
        assert_eq!(
            ProcessSpec::isobaric(IsobaricTarget::Enthalpy(300.0)).outlet_pressure_kpa(),
            None
        );
        assert_eq!(
            ProcessSpec::isochoric(IsochoricTarget::Pressure(300.0)).outlet_pressure_kpa(),
            Some(300.0)
        );
        assert_eq!(ProcessKind::Polytropic.to_string(), "polytropic");
    }

    #[test]
    fn direction_from_pressure_ratio() {
        assert_eq!(Direction::from_pressures(100.0, 800.0), Direction::Compression);
        assert_eq!(Direction::from_pressures(800.0, 100.0), Direction::Expansion);
        assert_eq!(Direction::from_pressures(100.0, 100.0), Direction::Neutral);
    }
}
