//! Constant-pressure heating or cooling. No shaft work; heat equals Δh.

use crate::error::EngineResult;
use crate::process_spec::{IsobaricTarget, ProcessKind};
use crate::result::ProcessResult;
use tc_core::numeric::SolveConfig;
use tc_fluids::{FluidHandle, PropertyPair, ThermodynamicState, resolve_with};

pub(crate) fn run(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    target: IsobaricTarget,
    config: &SolveConfig,
) -> EngineResult<ProcessResult> {
    let p = inlet.pressure_kpa();
    let outlet = match target {
        IsobaricTarget::Temperature(t_c) => {
            resolve_with(handle, PropertyPair::TemperaturePressure, t_c, p, config)?
        }
        IsobaricTarget::Enthalpy(h) => {
            resolve_with(handle, PropertyPair::PressureEnthalpy, p, h, config)?
        }
    };

    Ok(ProcessResult {
        kind: ProcessKind::Isobaric,
        inlet: *inlet,
        work: 0.0,
        heat: outlet.enthalpy() - inlet.enthalpy(),
        outlet,
        ideal: None,
    })
}
