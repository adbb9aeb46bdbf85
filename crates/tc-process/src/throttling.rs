//! Adiabatic throttling through a valve: constant enthalpy, no work.

use crate::ENTROPY_ABS_TOL;
use crate::error::{EngineResult, ProcessError, consistency_violation};
use crate::process_spec::ProcessKind;
use crate::result::ProcessResult;
use tc_core::numeric::SolveConfig;
use tc_fluids::{FluidHandle, PropertyPair, ThermodynamicState, resolve_with};

pub(crate) fn run(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    p_out_kpa: f64,
    config: &SolveConfig,
) -> EngineResult<ProcessResult> {
    if p_out_kpa > inlet.pressure_kpa() {
        return Err(ProcessError::InvalidSpec {
            what: "throttling outlet pressure must not exceed inlet pressure",
            value: p_out_kpa,
        });
    }

    let outlet = resolve_with(
        handle,
        PropertyPair::PressureEnthalpy,
        p_out_kpa,
        inlet.enthalpy(),
        config,
    )?;
    // A real pressure drop generates entropy; equal pressure is the identity.
    let violated = if p_out_kpa < inlet.pressure_kpa() {
        outlet.entropy() <= inlet.entropy()
    } else {
        outlet.entropy() < inlet.entropy() - ENTROPY_ABS_TOL
    };
    if violated {
        return Err(consistency_violation(
            "throttling entropy change",
            inlet.entropy(),
            outlet.entropy(),
        ));
    }

    Ok(ProcessResult {
        kind: ProcessKind::Throttling,
        inlet: *inlet,
        outlet,
        ideal: None,
        work: 0.0,
        heat: 0.0,
    })
}
