//! Adiabatic compression and expansion with an isentropic efficiency.
//!
//! The reversible outlet at the target pressure is always computed first.
//! The actual outlet enthalpy is then corrected from it:
//!
//! ```text
//! compression: h = h_in + (h_s - h_in) / eta
//! expansion:   h = h_in - eta * (h_in - h_s)
//! ```
//!
//! and the actual outlet is resolved from (P_out, h).

use crate::ENTROPY_ABS_TOL;
use crate::error::{EngineResult, consistency_violation};
use crate::process_spec::{Direction, ProcessKind};
use crate::result::ProcessResult;
use tc_core::numeric::SolveConfig;
use tc_fluids::{FluidHandle, PropertyPair, ThermodynamicState, resolve_with};
use tracing::debug;

/// Reversible outlet at `p_out_kpa` with the inlet entropy.
pub(crate) fn reference_outlet(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    p_out_kpa: f64,
    config: &SolveConfig,
) -> EngineResult<ThermodynamicState> {
    let ideal = resolve_with(
        handle,
        PropertyPair::PressureEntropy,
        p_out_kpa,
        inlet.entropy(),
        config,
    )?;
    if (ideal.entropy() - inlet.entropy()).abs() > ENTROPY_ABS_TOL {
        return Err(consistency_violation(
            "isentropic outlet entropy",
            inlet.entropy(),
            ideal.entropy(),
        ));
    }
    Ok(ideal)
}

pub(crate) fn run(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    p_out_kpa: f64,
    efficiency: f64,
    config: &SolveConfig,
) -> EngineResult<ProcessResult> {
    let ideal = reference_outlet(handle, inlet, p_out_kpa, config)?;
    let direction = Direction::from_pressures(inlet.pressure_kpa(), p_out_kpa);
    let dh_s = ideal.enthalpy() - inlet.enthalpy();

    let outlet = if efficiency == 1.0 || direction == Direction::Neutral {
        ideal
    } else {
        let h_actual = match direction {
            Direction::Compression => inlet.enthalpy() + dh_s / efficiency,
            _ => inlet.enthalpy() + efficiency * dh_s,
        };
        debug!(
            ?direction,
            efficiency,
            h_ideal = ideal.enthalpy(),
            h_actual,
            "applying efficiency correction"
        );
        let actual = resolve_with(
            handle,
            PropertyPair::PressureEnthalpy,
            p_out_kpa,
            h_actual,
            config,
        )?;
        if actual.entropy() <= ideal.entropy() {
            return Err(consistency_violation(
                "actual outlet entropy above isentropic outlet",
                ideal.entropy(),
                actual.entropy(),
            ));
        }
        actual
    };

    Ok(ProcessResult {
        kind: ProcessKind::Isentropic,
        inlet: *inlet,
        work: outlet.enthalpy() - inlet.enthalpy(),
        heat: 0.0,
        outlet,
        ideal: Some(ideal),
    })
}
