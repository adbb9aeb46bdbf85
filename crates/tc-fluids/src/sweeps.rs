//! Property sweeps for plotting collaborators.
//!
//! Sweeps evaluate independent points in parallel with rayon. A point that
//! fails to resolve is kept as `None` and counted, never extrapolated.

use crate::error::{FluidError, FluidResult};
use crate::kind::FluidKind;
use crate::model::FluidModel;
use crate::registry::FluidHandle;
use crate::resolver::{PropertyPair, resolve, saturation_at_temperature};
use crate::saturation::SaturationPoint;
use crate::state::ThermodynamicState;
use rayon::prelude::*;
use std::fmt;
use tc_core::units::to_celsius;
use tracing::debug;

/// Type of sweep progression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SweepType {
    /// Uniformly spaced points
    Linear,
    /// Logarithmically spaced points
    Logarithmic,
}

/// Definition of a single parameter sweep in contract units.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepDefinition {
    pub start: f64,
    pub end: f64,
    pub num_points: usize,
    pub sweep_type: SweepType,
}

impl SweepDefinition {
    pub fn new(start: f64, end: f64, num_points: usize, sweep_type: SweepType) -> FluidResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(FluidError::InvalidArg {
                what: "sweep bounds must be finite",
            });
        }
        if num_points < 2 {
            return Err(FluidError::InvalidArg {
                what: "sweep must have at least 2 points",
            });
        }
        if (start - end).abs() < 1e-12 {
            return Err(FluidError::InvalidArg {
                what: "sweep start and end must differ",
            });
        }
        if sweep_type == SweepType::Logarithmic && (start <= 0.0 || end <= 0.0) {
            return Err(FluidError::InvalidArg {
                what: "logarithmic sweep bounds must be positive",
            });
        }
        Ok(Self {
            start,
            end,
            num_points,
            sweep_type,
        })
    }

    /// Generate all points in the sweep.
    pub fn generate_points(&self) -> Vec<f64> {
        let n = self.num_points;
        let (a, b) = match self.sweep_type {
            SweepType::Linear => (self.start, self.end),
            SweepType::Logarithmic => (self.start.ln(), self.end.ln()),
        };
        let delta = (b - a) / (n - 1) as f64;
        let mut points: Vec<f64> = (0..n)
            .map(|i| {
                let x = a + i as f64 * delta;
                match self.sweep_type {
                    SweepType::Linear => x,
                    SweepType::Logarithmic => x.exp(),
                }
            })
            .collect();

        // Ensure exact endpoints
        points[0] = self.start;
        points[n - 1] = self.end;
        points
    }
}

impl fmt::Display for SweepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "Linear"),
            Self::Logarithmic => write!(f, "Logarithmic"),
        }
    }
}

/// Result of a property sweep.
#[derive(Debug, Clone)]
pub struct SweepResult {
    pub fluid: FluidKind,
    /// Pair used for every point; the swept value fills one slot, `fixed_value` the other
    pub pair: PropertyPair,
    pub fixed_value: f64,
    pub independent_values: Vec<f64>,
    /// Resolved states (None for failed points)
    pub states: Vec<Option<ThermodynamicState>>,
    pub num_successful: usize,
    pub num_failed: usize,
}

impl SweepResult {
    fn collect(
        fluid: FluidKind,
        pair: PropertyPair,
        fixed_value: f64,
        independent_values: Vec<f64>,
        states: Vec<Option<ThermodynamicState>>,
    ) -> Self {
        let num_successful = states.iter().filter(|s| s.is_some()).count();
        let num_failed = states.len() - num_successful;
        debug!(
            fluid = fluid.key(),
            pair = pair.label(),
            num_successful,
            num_failed,
            "sweep finished"
        );
        Self {
            fluid,
            pair,
            fixed_value,
            independent_values,
            states,
            num_successful,
            num_failed,
        }
    }

    fn column(&self, f: impl Fn(&ThermodynamicState) -> f64) -> Vec<f64> {
        self.states.iter().flatten().map(f).collect()
    }

    pub fn temperatures_c(&self) -> Vec<f64> {
        self.column(ThermodynamicState::temperature_c)
    }

    pub fn pressures_kpa(&self) -> Vec<f64> {
        self.column(ThermodynamicState::pressure_kpa)
    }

    pub fn enthalpies(&self) -> Vec<f64> {
        self.column(ThermodynamicState::enthalpy)
    }

    pub fn entropies(&self) -> Vec<f64> {
        self.column(ThermodynamicState::entropy)
    }

    pub fn specific_volumes(&self) -> Vec<f64> {
        self.column(ThermodynamicState::specific_volume)
    }

    /// Independent values corresponding to successful states
    pub fn successful_independent_values(&self) -> Vec<f64> {
        self.independent_values
            .iter()
            .zip(&self.states)
            .filter_map(|(val, state)| state.as_ref().map(|_| *val))
            .collect()
    }
}

/// Temperature sweep [°C] along an isobar at `pressure_kpa`.
pub fn isobar_sweep(
    handle: &FluidHandle,
    pressure_kpa: f64,
    temperatures: &SweepDefinition,
) -> SweepResult {
    let values = temperatures.generate_points();
    let states = values
        .par_iter()
        .map(|&t| resolve(handle, PropertyPair::TemperaturePressure, t, pressure_kpa).ok())
        .collect();
    SweepResult::collect(
        handle.kind(),
        PropertyPair::TemperaturePressure,
        pressure_kpa,
        values,
        states,
    )
}

/// Pressure sweep [kPa] along an isotherm at `temperature_c`.
pub fn isotherm_sweep(
    handle: &FluidHandle,
    temperature_c: f64,
    pressures: &SweepDefinition,
) -> SweepResult {
    let values = pressures.generate_points();
    let states = values
        .par_iter()
        .map(|&p| resolve(handle, PropertyPair::TemperaturePressure, temperature_c, p).ok())
        .collect();
    SweepResult::collect(
        handle.kind(),
        PropertyPair::TemperaturePressure,
        temperature_c,
        values,
        states,
    )
}

/// Saturation dome from the lowest saturation temperature up to (not
/// including) the critical point, for T-s and P-h diagram envelopes.
pub fn saturation_dome(handle: &FluidHandle, num_points: usize) -> FluidResult<Vec<SaturationPoint>> {
    let limits = handle
        .table()
        .saturation_limits()
        .ok_or(FluidError::InvalidPropertyPair {
            fluid: handle.kind(),
            pair: "saturation dome",
            reason: "fluid has no liquid-vapor phase change",
        })?;
    let t_start = to_celsius(limits.t_min_k);
    // Stop short of Tc, where h_fg vanishes and the phases merge.
    let t_end = to_celsius(limits.t_max_k.min(limits.t_crit_k * (1.0 - 1e-3)));
    let sweep = SweepDefinition::new(t_start, t_end, num_points, SweepType::Linear)?;
    sweep
        .generate_points()
        .par_iter()
        .map(|&t| saturation_at_temperature(handle, t))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FluidRegistry;

    #[test]
    fn linear_sweep_generation() {
        let sweep = SweepDefinition::new(300.0, 400.0, 5, SweepType::Linear).unwrap();
        let points = sweep.generate_points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert!((points[4] - 400.0).abs() < 1e-9);
    }

    #[test]
    fn logarithmic_sweep_generation() {
        let sweep = SweepDefinition::new(10.0, 1000.0, 3, SweepType::Logarithmic).unwrap();
        let points = sweep.generate_points();
        assert!((points[1] - 100.0).abs() < 1e-9);
        assert_eq!(points[2], 1000.0);
    }

    #[test]
    fn invalid_definitions_are_rejected() {
        assert!(SweepDefinition::new(1.0, 2.0, 1, SweepType::Linear).is_err());
        assert!(SweepDefinition::new(1.0, 1.0, 5, SweepType::Linear).is_err());
        assert!(SweepDefinition::new(-1.0, 2.0, 5, SweepType::Logarithmic).is_err());
    }

    #[test]
    fn isobar_sweep_keeps_failed_points() {
        let water = FluidRegistry::global().handle(FluidKind::Water).unwrap();
        // 900 °C lies outside the water envelope
        let sweep = SweepDefinition::new(20.0, 900.0, 5, SweepType::Linear).unwrap();
        let result = isobar_sweep(&water, 101.325, &sweep);
        assert_eq!(result.states.len(), 5);
        assert_eq!(result.num_failed, 1);
        assert_eq!(result.num_successful, 4);
        assert!(result.states[4].is_none());
        assert_eq!(result.successful_independent_values().len(), 4);
        let h = result.enthalpies();
        assert!(h.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn isotherm_sweep_covers_both_phases() {
        let r22 = FluidRegistry::global().handle(FluidKind::R22).unwrap();
        let sweep = SweepDefinition::new(50.0, 5_000.0, 12, SweepType::Logarithmic).unwrap();
        let result = isotherm_sweep(&r22, 0.0, &sweep);
        assert_eq!(result.num_failed, 0);
        let v = result.specific_volumes();
        assert!(v.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn dome_is_ordered_and_closes() {
        let co2 = FluidRegistry::global().handle(FluidKind::CO2).unwrap();
        let dome = saturation_dome(&co2, 20).unwrap();
        assert_eq!(dome.len(), 20);
        assert!(dome.windows(2).all(|w| w[1].pressure_kpa > w[0].pressure_kpa));
        assert!(dome.iter().all(|p| p.h_fg() > 0.0));
        let air = FluidRegistry::global().handle(FluidKind::Air).unwrap();
        assert!(saturation_dome(&air, 10).is_err());
    }
}
