//! Fluid property model trait and validation helpers.

use crate::error::{FluidError, FluidResult};
use crate::kind::FluidKind;
use crate::range::ValidRange;
use crate::state::PhaseProps;

/// Which single-phase branch of an equation of state to evaluate.
///
/// Below the critical point an equation of state can admit both a liquid-like
/// and a vapour-like solution at the same (T, P); the caller picks one after
/// locating the state against the saturation curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Liquid,
    Vapor,
    /// Above the critical temperature or pressure, where only one fluid phase exists.
    Dense,
}

/// Extent of a fluid's saturation curve inside its valid envelope.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturationLimits {
    /// Lowest saturation temperature [K]
    pub t_min_k: f64,
    /// Saturation pressure at `t_min_k` [kPa]
    pub p_min_kpa: f64,
    /// Highest saturation temperature reachable inside the envelope [K]
    pub t_max_k: f64,
    /// Saturation pressure at `t_max_k` [kPa]
    pub p_max_kpa: f64,
    /// Critical temperature [K]
    pub t_crit_k: f64,
    /// Critical pressure [kPa]
    pub p_crit_kpa: f64,
}

impl SaturationLimits {
    /// Whether a two-phase state can exist at this pressure.
    pub fn covers_pressure(&self, p_kpa: f64) -> bool {
        p_kpa >= self.p_min_kpa && p_kpa <= self.p_max_kpa && p_kpa < self.p_crit_kpa
    }

    /// Whether a two-phase state can exist at this temperature.
    pub fn covers_temperature(&self, t_k: f64) -> bool {
        t_k >= self.t_min_k && t_k <= self.t_max_k && t_k < self.t_crit_k
    }

    pub fn is_supercritical(&self, t_k: f64, p_kpa: f64) -> bool {
        t_k >= self.t_crit_k && p_kpa >= self.p_crit_kpa
    }
}

/// Trait for per-fluid property correlations.
///
/// Implementations must be thread-safe (Send + Sync) so loaded tables can be
/// shared across parallel callers. Inputs are absolute temperature [K] and
/// pressure [kPa]; outputs follow the crate's units contract.
pub trait FluidModel: Send + Sync {
    fn kind(&self) -> FluidKind;

    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    fn valid_range(&self) -> ValidRange;

    /// `None` for fluids without a phase change inside their envelope.
    fn saturation_limits(&self) -> Option<SaturationLimits>;

    /// Evaluate h, s, v at (T, P) on the requested branch.
    fn point(&self, t_k: f64, p_kpa: f64, branch: Branch) -> FluidResult<PhaseProps>;

    /// Saturation pressure [kPa] at temperature `t_k`.
    fn saturation_pressure(&self, _t_k: f64) -> FluidResult<f64> {
        Err(no_saturation(self.kind()))
    }

    /// Saturation temperature [K] at pressure `p_kpa`.
    fn saturation_temperature(&self, _p_kpa: f64) -> FluidResult<f64> {
        Err(no_saturation(self.kind()))
    }
}

pub(crate) fn no_saturation(fluid: FluidKind) -> FluidError {
    FluidError::InvalidPropertyPair {
        fluid,
        pair: "saturation",
        reason: "fluid has no liquid-vapor phase change",
    }
}

/// Validation helpers for computed properties.
pub(crate) mod validation {
    use super::*;

    /// Ensure a property triple is finite with a positive specific volume.
    pub fn validate_props(props: PhaseProps) -> FluidResult<PhaseProps> {
        if !props.h.is_finite() {
            return Err(FluidError::NonFinite {
                what: "enthalpy",
                value: props.h,
            });
        }
        if !props.s.is_finite() {
            return Err(FluidError::NonFinite {
                what: "entropy",
                value: props.s,
            });
        }
        if !props.v.is_finite() || props.v <= 0.0 {
            return Err(FluidError::NonFinite {
                what: "specific volume",
                value: props.v,
            });
        }
        Ok(props)
    }

    /// Ensure temperature [K] and pressure [kPa] are positive and finite.
    pub fn validate_tp(t_k: f64, p_kpa: f64) -> FluidResult<()> {
        if !t_k.is_finite() || t_k <= 0.0 {
            return Err(FluidError::NonFinite {
                what: "absolute temperature",
                value: t_k,
            });
        }
        if !p_kpa.is_finite() || p_kpa <= 0.0 {
            return Err(FluidError::NonFinite {
                what: "pressure",
                value: p_kpa,
            });
        }
        Ok(())
    }
}
