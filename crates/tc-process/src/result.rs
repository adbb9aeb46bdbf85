//! Outcome of a process evaluation.

use crate::process_spec::ProcessKind;
use tc_fluids::ThermodynamicState;

/// Inlet, outlet and energy figures of one process.
///
/// Work and heat are specific values in kJ/kg, positive when they flow into
/// the fluid, so `work + heat` equals the enthalpy change of the stream.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessResult {
    pub kind: ProcessKind,
    pub inlet: ThermodynamicState,
    pub outlet: ThermodynamicState,
    /// Isentropic reference outlet, for processes that have one.
    pub ideal: Option<ThermodynamicState>,
    /// Specific work [kJ/kg].
    pub work: f64,
    /// Specific heat [kJ/kg].
    pub heat: f64,
}

impl ProcessResult {
    /// Outlet minus inlet temperature [K].
    pub fn temperature_change(&self) -> f64 {
        self.outlet.temperature_c() - self.inlet.temperature_c()
    }

    pub fn enthalpy_change(&self) -> f64 {
        self.outlet.enthalpy() - self.inlet.enthalpy()
    }

    /// Outlet minus inlet entropy [kJ/(kg·K)]; zero for a reversible adiabatic process.
    pub fn entropy_generation(&self) -> f64 {
        self.outlet.entropy() - self.inlet.entropy()
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} -> {} (w={:.3} kJ/kg, q={:.3} kJ/kg)",
            self.kind,
            self.inlet.summary(),
            self.outlet.summary(),
            self.work,
            self.heat
        )
    }
}
