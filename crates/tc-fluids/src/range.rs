//! Per-fluid validity envelopes.

use crate::error::{FluidError, FluidResult};
use tc_core::units::to_kelvin;

/// Temperature/pressure envelope inside which a fluid's correlations hold.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValidRange {
    /// Minimum temperature [°C]
    pub t_min_c: f64,
    /// Maximum temperature [°C]
    pub t_max_c: f64,
    /// Minimum pressure [kPa]
    pub p_min_kpa: f64,
    /// Maximum pressure [kPa]
    pub p_max_kpa: f64,
}

impl ValidRange {
    pub const fn new(t_min_c: f64, t_max_c: f64, p_min_kpa: f64, p_max_kpa: f64) -> Self {
        Self {
            t_min_c,
            t_max_c,
            p_min_kpa,
            p_max_kpa,
        }
    }

    pub fn check_temperature(&self, t_c: f64) -> FluidResult<f64> {
        check_bounds("temperature [°C]", t_c, self.t_min_c, self.t_max_c)
    }

    pub fn check_pressure(&self, p_kpa: f64) -> FluidResult<f64> {
        check_bounds("pressure [kPa]", p_kpa, self.p_min_kpa, self.p_max_kpa)
    }

    pub fn contains(&self, t_c: f64, p_kpa: f64) -> bool {
        self.check_temperature(t_c).is_ok() && self.check_pressure(p_kpa).is_ok()
    }

    pub fn t_min_k(&self) -> f64 {
        to_kelvin(self.t_min_c)
    }

    pub fn t_max_k(&self) -> f64 {
        to_kelvin(self.t_max_c)
    }
}

pub(crate) fn check_bounds(what: &'static str, value: f64, min: f64, max: f64) -> FluidResult<f64> {
    if !value.is_finite() {
        return Err(FluidError::NonFinite { what, value });
    }
    if value < min || value > max {
        return Err(FluidError::OutOfRange {
            what,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RANGE: ValidRange = ValidRange::new(0.0, 100.0, 1.0, 1000.0);

    #[test]
    fn inclusive_bounds() {
        assert!(RANGE.contains(0.0, 1.0));
        assert!(RANGE.contains(100.0, 1000.0));
        assert!(!RANGE.contains(100.1, 500.0));
    }

    #[test]
    fn out_of_range_reports_bounds() {
        match RANGE.check_pressure(2000.0) {
            Err(FluidError::OutOfRange {
                value, min, max, ..
            }) => {
                assert_eq!(value, 2000.0);
                assert_eq!(min, 1.0);
                assert_eq!(max, 1000.0);
            }
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn nan_is_not_silently_accepted() {
        assert!(matches!(
            RANGE.check_temperature(f64::NAN),
            Err(FluidError::NonFinite { .. })
        ));
    }
}
