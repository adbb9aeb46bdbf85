//! Process engine: dispatch a [`ProcessSpec`] against an inlet state.

use crate::error::{EngineResult, ProcessError};
use crate::process_spec::ProcessSpec;
use crate::result::ProcessResult;
use crate::{isentropic, isobaric, isochoric, polytropic, throttling};
use tc_core::numeric::SolveConfig;
use tc_fluids::{FluidHandle, PropertyPair, ThermodynamicState, resolve_with};
use tracing::debug;

/// Stateless driver for the five process laws.
///
/// The solve configuration bounds every iterative outlet resolution the
/// engine performs.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEngine {
    config: SolveConfig,
}

impl ProcessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SolveConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// Apply `spec` to `inlet`.
    ///
    /// Parameters are validated before any property is evaluated. No
    /// partial result is returned: either the outlet passed every check of its
    /// process law or an error comes back.
    pub fn run(
        &self,
        handle: &FluidHandle,
        inlet: &ThermodynamicState,
        spec: &ProcessSpec,
    ) -> EngineResult<ProcessResult> {
        spec.validate()?;
        if handle.kind() != inlet.fluid() {
            return Err(ProcessError::FluidMismatch {
                handle: handle.kind(),
                state: inlet.fluid(),
            });
        }
        debug!(fluid = %handle.kind(), process = %spec.kind(), inlet = %inlet.summary(), "running process");

        let config = &self.config;
        let result = match *spec {
            ProcessSpec::Isentropic {
                outlet_pressure_kpa,
                efficiency,
            } => isentropic::run(handle, inlet, outlet_pressure_kpa, efficiency, config)?,
            ProcessSpec::Isobaric { target } => isobaric::run(handle, inlet, target, config)?,
            ProcessSpec::Isochoric { target } => isochoric::run(handle, inlet, target, config)?,
            ProcessSpec::Throttling {
                outlet_pressure_kpa,
            } => throttling::run(handle, inlet, outlet_pressure_kpa, config)?,
            ProcessSpec::Polytropic {
                outlet_pressure_kpa,
                exponent,
            } => polytropic::run(handle, inlet, outlet_pressure_kpa, exponent, config)?,
        };

        debug!(
            outlet = %result.outlet.summary(),
            work = result.work,
            heat = result.heat,
            "process complete"
        );
        Ok(result)
    }

    /// Resolve the inlet from a property pair, then apply `spec`.
    pub fn run_from(
        &self,
        handle: &FluidHandle,
        pair: PropertyPair,
        first: f64,
        second: f64,
        spec: &ProcessSpec,
    ) -> EngineResult<ProcessResult> {
        spec.validate()?;
        let inlet = resolve_with(handle, pair, first, second, &self.config)?;
        self.run(handle, &inlet, spec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process_spec::IsobaricTarget;
    use tc_fluids::{FluidError, resolve, resolve_fluid};

    #[test]
    fn validation_precedes_evaluation() {
        // The inlet temperature is far outside the air envelope, but the bad
        // efficiency is reported first.
        let air = resolve_fluid("air").unwrap();
        let engine = ProcessEngine::new();
        let err = engine
            .run_from(
                &air,
                PropertyPair::TemperaturePressure,
                1.0e6,
                100.0,
                &ProcessSpec::isentropic(800.0, 1.5),
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::InvalidSpec { .. }));
    }

    #[test]
    fn mismatched_fluid_is_rejected() {
        let air = resolve_fluid("air").unwrap();
        let water = resolve_fluid("water").unwrap();
        let inlet = resolve(&water, PropertyPair::TemperaturePressure, 25.0, 100.0).unwrap();
        let err = ProcessEngine::new()
            .run(&air, &inlet, &ProcessSpec::throttling(50.0))
            .unwrap_err();
        assert!(matches!(err, ProcessError::FluidMismatch { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn out_of_range_outlet_surfaces_fluid_error() {
        let water = resolve_fluid("water").unwrap();
        let inlet = resolve(&water, PropertyPair::TemperaturePressure, 700.0, 100.0).unwrap();
        let err = ProcessEngine::new()
            .run(
                &water,
                &inlet,
                &ProcessSpec::isobaric(IsobaricTarget::Temperature(900.0)),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Fluid(FluidError::OutOfRange { .. })
        ));
    }

    #[test]
    fn tight_iteration_bound_reports_convergence_failure() {
        let air = resolve_fluid("air").unwrap();
        let inlet = resolve(&air, PropertyPair::TemperaturePressure, 25.0, 100.0).unwrap();
        let engine = ProcessEngine::with_config(SolveConfig {
            max_iterations: 3,
            ..SolveConfig::default()
        });
        let err = engine
            .run(&air, &inlet, &ProcessSpec::polytropic(400.0, 1.3))
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::Fluid(FluidError::Convergence { .. })
        ));
        assert!(!err.is_recoverable());
    }
}
