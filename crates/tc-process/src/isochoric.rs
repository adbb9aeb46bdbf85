//! Constant-volume heating or cooling of a closed mass. Heat equals Δu.

use crate::error::{EngineResult, consistency_violation};
use crate::process_spec::{IsochoricTarget, ProcessKind};
use crate::result::ProcessResult;
use tc_core::numeric::{SolveConfig, relative_error};
use tc_fluids::{CONSISTENCY_REL_TOL, FluidHandle, PropertyPair, ThermodynamicState, resolve_with};

pub(crate) fn run(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    target: IsochoricTarget,
    config: &SolveConfig,
) -> EngineResult<ProcessResult> {
    let v = inlet.specific_volume();
    let outlet = match target {
        IsochoricTarget::Temperature(t_c) => {
            resolve_with(handle, PropertyPair::TemperatureVolume, t_c, v, config)?
        }
        IsochoricTarget::Pressure(p) => {
            resolve_with(handle, PropertyPair::PressureVolume, p, v, config)?
        }
    };
    if relative_error(outlet.specific_volume(), v) > CONSISTENCY_REL_TOL {
        return Err(consistency_violation(
            "isochoric specific volume",
            v,
            outlet.specific_volume(),
        ));
    }

    Ok(ProcessResult {
        kind: ProcessKind::Isochoric,
        inlet: *inlet,
        work: 0.0,
        heat: outlet.internal_energy() - inlet.internal_energy(),
        outlet,
        ideal: None,
    })
}
