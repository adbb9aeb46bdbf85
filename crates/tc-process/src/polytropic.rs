//! Polytropic compression or expansion along P·vⁿ = const.
//!
//! The outlet volume follows from the pressure ratio and the full state is
//! resolved from (P_out, v_out). Steady-flow work is ∫v dP along the path:
//!
//! ```text
//! w = n/(n-1) * (P2 v2 - P1 v1)      n != 1
//! w = P1 v1 ln(P2 / P1)              n -> 1
//! ```
//!
//! Heat closes the energy balance, q = Δh - w.
//!
//! The isentropic outlet at the same pressure is attached as a reference when
//! it lies inside the fluid's envelope. A polytropic path can stay in range
//! where the isentrope leaves it (a deep isothermal expansion, say), and then
//! the result carries no reference.

use crate::error::{EngineResult, ProcessError, consistency_violation};
use crate::isentropic::reference_outlet;
use crate::process_spec::ProcessKind;
use crate::result::ProcessResult;
use tc_core::numeric::{SolveConfig, relative_error};
use tc_fluids::{CONSISTENCY_REL_TOL, FluidHandle, PropertyPair, ThermodynamicState, resolve_with};
use tracing::debug;

/// Below this distance from 1 the exponent is treated as isothermal.
pub const ISOTHERMAL_EXPONENT_TOL: f64 = 1e-3;

/// Specific volume after a polytropic change from (p_in, v_in) to p_out.
pub fn outlet_volume(p_in_kpa: f64, v_in: f64, p_out_kpa: f64, exponent: f64) -> f64 {
    v_in * (p_in_kpa / p_out_kpa).powf(1.0 / exponent)
}

/// Steady-flow polytropic work [kJ/kg] between two (P, v) points.
pub fn polytropic_work(p1_kpa: f64, v1: f64, p2_kpa: f64, v2: f64, exponent: f64) -> f64 {
    if (exponent - 1.0).abs() < ISOTHERMAL_EXPONENT_TOL {
        p1_kpa * v1 * (p2_kpa / p1_kpa).ln()
    } else {
        exponent / (exponent - 1.0) * (p2_kpa * v2 - p1_kpa * v1)
    }
}

pub(crate) fn run(
    handle: &FluidHandle,
    inlet: &ThermodynamicState,
    p_out_kpa: f64,
    exponent: f64,
    config: &SolveConfig,
) -> EngineResult<ProcessResult> {
    let (p_in, v_in) = (inlet.pressure_kpa(), inlet.specific_volume());
    let v_out = outlet_volume(p_in, v_in, p_out_kpa, exponent);
    debug!(p_out_kpa, exponent, v_out, "polytropic outlet volume");

    let outlet = resolve_with(
        handle,
        PropertyPair::PressureVolume,
        p_out_kpa,
        v_out,
        config,
    )?;
    if relative_error(outlet.specific_volume(), v_out) > CONSISTENCY_REL_TOL {
        return Err(consistency_violation(
            "polytropic outlet volume",
            v_out,
            outlet.specific_volume(),
        ));
    }
    let ideal = match reference_outlet(handle, inlet, p_out_kpa, config) {
        Ok(state) => Some(state),
        Err(ProcessError::Fluid(err)) if err.is_recoverable() => {
            debug!(%err, "no isentropic reference for polytropic outlet");
            None
        }
        Err(err) => return Err(err),
    };

    let work = polytropic_work(p_in, v_in, p_out_kpa, outlet.specific_volume(), exponent);
    Ok(ProcessResult {
        kind: ProcessKind::Polytropic,
        inlet: *inlet,
        heat: outlet.enthalpy() - inlet.enthalpy() - work,
        work,
        outlet,
        ideal,
    })
}
