//! Thermodynamic state representation.
//!
//! A [`ThermodynamicState`] is an immutable value: every resolver or process
//! step produces a new one. All quantities use the fixed units contract
//! (°C, kPa, kJ/kg, kJ/kg·K, m³/kg).

use crate::kind::FluidKind;
use std::fmt;
use tc_core::units::{Pressure, Temperature, degc, kpa, to_kelvin};

/// Phase region tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    SubcooledLiquid,
    SaturatedMixture,
    SuperheatedVapor,
    Supercritical,
    SinglePhaseGas,
}

impl Phase {
    pub fn label(&self) -> &'static str {
        match self {
            Phase::SubcooledLiquid => "subcooled liquid",
            Phase::SaturatedMixture => "saturated mixture",
            Phase::SuperheatedVapor => "superheated vapor",
            Phase::Supercritical => "supercritical",
            Phase::SinglePhaseGas => "single-phase gas",
        }
    }

    pub fn is_two_phase(&self) -> bool {
        matches!(self, Phase::SaturatedMixture)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Fully resolved state of a fluid.
///
/// `quality` is present exactly when `phase` is [`Phase::SaturatedMixture`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThermodynamicState {
    fluid: FluidKind,
    temperature_c: f64,
    pressure_kpa: f64,
    enthalpy: f64,
    entropy: f64,
    specific_volume: f64,
    phase: Phase,
    quality: Option<f64>,
}

impl ThermodynamicState {
    pub(crate) fn single_phase(
        fluid: FluidKind,
        temperature_c: f64,
        pressure_kpa: f64,
        props: PhaseProps,
        phase: Phase,
    ) -> Self {
        debug_assert!(!phase.is_two_phase());
        Self {
            fluid,
            temperature_c,
            pressure_kpa,
            enthalpy: props.h,
            entropy: props.s,
            specific_volume: props.v,
            phase,
            quality: None,
        }
    }

    pub(crate) fn mixture(
        fluid: FluidKind,
        temperature_c: f64,
        pressure_kpa: f64,
        props: PhaseProps,
        quality: f64,
    ) -> Self {
        debug_assert!((0.0..=1.0).contains(&quality));
        Self {
            fluid,
            temperature_c,
            pressure_kpa,
            enthalpy: props.h,
            entropy: props.s,
            specific_volume: props.v,
            phase: Phase::SaturatedMixture,
            quality: Some(quality),
        }
    }

    pub fn fluid(&self) -> FluidKind {
        self.fluid
    }

    /// Temperature [°C]
    pub fn temperature_c(&self) -> f64 {
        self.temperature_c
    }

    /// Temperature [K]
    pub fn temperature_k(&self) -> f64 {
        to_kelvin(self.temperature_c)
    }

    /// Pressure [kPa]
    pub fn pressure_kpa(&self) -> f64 {
        self.pressure_kpa
    }

    /// Specific enthalpy [kJ/kg]
    pub fn enthalpy(&self) -> f64 {
        self.enthalpy
    }

    /// Specific entropy [kJ/(kg·K)]
    pub fn entropy(&self) -> f64 {
        self.entropy
    }

    /// Specific volume [m³/kg]
    pub fn specific_volume(&self) -> f64 {
        self.specific_volume
    }

    /// Density [kg/m³]
    pub fn density(&self) -> f64 {
        1.0 / self.specific_volume
    }

    /// Specific internal energy u = h − P·v [kJ/kg]
    pub fn internal_energy(&self) -> f64 {
        self.enthalpy - self.pressure_kpa * self.specific_volume
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Vapour mass fraction, only for saturated mixtures.
    pub fn quality(&self) -> Option<f64> {
        self.quality
    }

    pub fn temperature(&self) -> Temperature {
        degc(self.temperature_c)
    }

    pub fn pressure(&self) -> Pressure {
        kpa(self.pressure_kpa)
    }

    pub fn summary(&self) -> String {
        let quality = match self.quality {
            Some(x) => format!(",x={x:.4}"),
            None => String::new(),
        };
        format!(
            "State({},T={:.2}°C,P={:.3}kPa,h={:.2}kJ/kg,s={:.4}kJ/kg·K,v={:.6}m³/kg,{}{})",
            self.fluid,
            self.temperature_c,
            self.pressure_kpa,
            self.enthalpy,
            self.entropy,
            self.specific_volume,
            self.phase,
            quality
        )
    }
}

impl fmt::Display for ThermodynamicState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Single-phase property triple produced by a fluid model at (T, P).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseProps {
    /// Specific enthalpy [kJ/kg]
    pub h: f64,
    /// Specific entropy [kJ/(kg·K)]
    pub s: f64,
    /// Specific volume [m³/kg]
    pub v: f64,
}

impl PhaseProps {
    /// Mass-weighted blend of two saturated phases.
    pub fn blend(liquid: &PhaseProps, vapor: &PhaseProps, quality: f64) -> PhaseProps {
        PhaseProps {
            h: liquid.h + quality * (vapor.h - liquid.h),
            s: liquid.s + quality * (vapor.s - liquid.s),
            v: liquid.v + quality * (vapor.v - liquid.v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn props() -> PhaseProps {
        PhaseProps {
            h: 300.0,
            s: 1.0,
            v: 0.5,
        }
    }

    #[test]
    fn derived_properties() {
        let state = ThermodynamicState::single_phase(
            FluidKind::Air,
            25.0,
            100.0,
            props(),
            Phase::SinglePhaseGas,
        );
        assert!((state.temperature_k() - 298.15).abs() < 1e-12);
        assert!((state.density() - 2.0).abs() < 1e-12);
        assert!((state.internal_energy() - 250.0).abs() < 1e-12);
        assert_eq!(state.quality(), None);
    }

    #[test]
    fn mixture_carries_quality() {
        let state = ThermodynamicState::mixture(FluidKind::Water, 100.0, 101.325, props(), 0.25);
        assert_eq!(state.phase(), Phase::SaturatedMixture);
        assert_eq!(state.quality(), Some(0.25));
        assert!(state.summary().contains("x=0.2500"));
    }

    #[test]
    fn blend_endpoints() {
        let liquid = PhaseProps {
            h: 100.0,
            s: 0.3,
            v: 0.001,
        };
        let vapor = PhaseProps {
            h: 2500.0,
            s: 7.5,
            v: 1.5,
        };
        assert_eq!(PhaseProps::blend(&liquid, &vapor, 0.0), liquid);
        let top = PhaseProps::blend(&liquid, &vapor, 1.0);
        assert!((top.h - vapor.h).abs() < 1e-12);
        assert!((top.s - vapor.s).abs() < 1e-12);
        assert!((top.v - vapor.v).abs() < 1e-12);
        let mid = PhaseProps::blend(&liquid, &vapor, 0.5);
        assert!((mid.h - 1300.0).abs() < 1e-12);
    }
}
