//! Ideal-gas correlations with temperature-dependent heat capacity.

use crate::error::FluidResult;
use crate::kind::FluidKind;
use crate::model::{Branch, FluidModel, SaturationLimits, validation};
use crate::range::ValidRange;
use crate::state::PhaseProps;
use tc_core::units::{KELVIN_OFFSET, R_UNIVERSAL, STANDARD_PRESSURE_KPA};
use tracing::debug;

/// Ideal-gas molar heat capacity cp0(T) = c0 + c1·T + c2·T² + c3·T³ [kJ/(kmol·K)].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CpPolynomial {
    pub coeffs: [f64; 4],
}

impl CpPolynomial {
    pub const fn new(coeffs: [f64; 4]) -> Self {
        Self { coeffs }
    }

    pub fn cp(&self, t_k: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coeffs;
        c0 + t_k * (c1 + t_k * (c2 + t_k * c3))
    }

    /// ∫ cp dT from `t0` to `t1` [kJ/kmol].
    pub fn enthalpy_change(&self, t0: f64, t1: f64) -> f64 {
        self.h_antiderivative(t1) - self.h_antiderivative(t0)
    }

    /// ∫ cp/T dT from `t0` to `t1` [kJ/(kmol·K)].
    pub fn entropy_change(&self, t0: f64, t1: f64) -> f64 {
        self.s_antiderivative(t1) - self.s_antiderivative(t0)
    }

    fn h_antiderivative(&self, t: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coeffs;
        t * (c0 + t * (c1 / 2.0 + t * (c2 / 3.0 + t * c3 / 4.0)))
    }

    fn s_antiderivative(&self, t: f64) -> f64 {
        let [c0, c1, c2, c3] = self.coeffs;
        c0 * t.ln() + t * (c1 + t * (c2 / 2.0 + t * c3 / 3.0))
    }
}

/// Parameters of an ideal-gas fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdealGasParameters {
    pub kind: FluidKind,
    pub cp: CpPolynomial,
    pub range: ValidRange,
    /// Reference temperature where h = 0 and s = 0 [K]
    pub t_ref_k: f64,
    /// Reference pressure where s = 0 [kPa]
    pub p_ref_kpa: f64,
}

pub const AIR: IdealGasParameters = IdealGasParameters {
    kind: FluidKind::Air,
    cp: CpPolynomial::new([28.11, 0.1967e-2, 0.4802e-5, -1.966e-9]),
    range: ValidRange::new(-73.15, 1526.85, 0.1, 20_000.0),
    t_ref_k: KELVIN_OFFSET,
    p_ref_kpa: STANDARD_PRESSURE_KPA,
};

/// Closed-form ideal-gas property table. Always a single gas phase.
#[derive(Debug, Clone)]
pub struct IdealGasTable {
    params: IdealGasParameters,
    molar_mass: f64,
}

impl IdealGasTable {
    pub fn load(params: IdealGasParameters) -> FluidResult<Self> {
        let molar_mass = params.kind.molar_mass();
        debug!(
            fluid = params.kind.key(),
            gas_constant = R_UNIVERSAL / molar_mass,
            "loaded ideal-gas table"
        );
        Ok(Self { params, molar_mass })
    }

    /// Specific gas constant [kJ/(kg·K)].
    pub fn gas_constant(&self) -> f64 {
        R_UNIVERSAL / self.molar_mass
    }

    /// cp [kJ/(kg·K)] at `t_k`.
    pub fn cp(&self, t_k: f64) -> f64 {
        self.params.cp.cp(t_k) / self.molar_mass
    }

    /// Heat capacity ratio γ = cp/(cp − R) at `t_k`.
    pub fn gamma(&self, t_k: f64) -> f64 {
        let cp = self.cp(t_k);
        cp / (cp - self.gas_constant())
    }
}

impl FluidModel for IdealGasTable {
    fn kind(&self) -> FluidKind {
        self.params.kind
    }

    fn name(&self) -> &str {
        "ideal gas"
    }

    fn valid_range(&self) -> ValidRange {
        self.params.range
    }

    fn saturation_limits(&self) -> Option<SaturationLimits> {
        None
    }

    fn point(&self, t_k: f64, p_kpa: f64, _branch: Branch) -> FluidResult<PhaseProps> {
        validation::validate_tp(t_k, p_kpa)?;
        let t0 = self.params.t_ref_k;
        let h = self.params.cp.enthalpy_change(t0, t_k) / self.molar_mass;
        let s = (self.params.cp.entropy_change(t0, t_k)
            - R_UNIVERSAL * (p_kpa / self.params.p_ref_kpa).ln())
            / self.molar_mass;
        let v = self.gas_constant() * t_k / p_kpa;
        validation::validate_props(PhaseProps { h, s, v })
    }
}
