//! Saturation properties and tabulated saturation curves.

use crate::error::{FluidError, FluidResult};
use crate::kind::FluidKind;
use crate::range::check_bounds;
use crate::state::{PhaseProps, ThermodynamicState};
use tc_core::numeric::lerp;

/// Saturated liquid and vapour properties at one point of the saturation curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaturationPoint {
    pub fluid: FluidKind,
    /// Saturation temperature [°C]
    pub temperature_c: f64,
    /// Saturation pressure [kPa]
    pub pressure_kpa: f64,
    /// Saturated liquid enthalpy [kJ/kg]
    pub h_f: f64,
    /// Saturated vapour enthalpy [kJ/kg]
    pub h_g: f64,
    /// Saturated liquid entropy [kJ/(kg·K)]
    pub s_f: f64,
    /// Saturated vapour entropy [kJ/(kg·K)]
    pub s_g: f64,
    /// Saturated liquid specific volume [m³/kg]
    pub v_f: f64,
    /// Saturated vapour specific volume [m³/kg]
    pub v_g: f64,
}

impl SaturationPoint {
    pub(crate) fn new(
        fluid: FluidKind,
        temperature_c: f64,
        pressure_kpa: f64,
        liquid: PhaseProps,
        vapor: PhaseProps,
    ) -> Self {
        Self {
            fluid,
            temperature_c,
            pressure_kpa,
            h_f: liquid.h,
            h_g: vapor.h,
            s_f: liquid.s,
            s_g: vapor.s,
            v_f: liquid.v,
            v_g: vapor.v,
        }
    }

    /// Latent heat of vaporization [kJ/kg]
    pub fn h_fg(&self) -> f64 {
        self.h_g - self.h_f
    }

    /// Entropy of vaporization [kJ/(kg·K)]
    pub fn s_fg(&self) -> f64 {
        self.s_g - self.s_f
    }

    pub fn v_fg(&self) -> f64 {
        self.v_g - self.v_f
    }

    pub fn liquid(&self) -> PhaseProps {
        PhaseProps {
            h: self.h_f,
            s: self.s_f,
            v: self.v_f,
        }
    }

    pub fn vapor(&self) -> PhaseProps {
        PhaseProps {
            h: self.h_g,
            s: self.s_g,
            v: self.v_g,
        }
    }

    /// Two-phase state with vapour mass fraction `quality`.
    pub fn mixture(&self, quality: f64) -> FluidResult<ThermodynamicState> {
        let quality = check_bounds("quality", quality, 0.0, 1.0)?;
        let props = if quality == 1.0 {
            self.vapor()
        } else {
            PhaseProps::blend(&self.liquid(), &self.vapor(), quality)
        };
        Ok(ThermodynamicState::mixture(
            self.fluid,
            self.temperature_c,
            self.pressure_kpa,
            props,
            quality,
        ))
    }

    /// Quality of a mixture whose property lies between the saturated values,
    /// or `None` when it lies outside the dome. Exact boundary values map to 0 or 1.
    pub(crate) fn quality_for(liquid: f64, vapor: f64, value: f64) -> Option<f64> {
        if value == liquid {
            return Some(0.0);
        }
        if value == vapor {
            return Some(1.0);
        }
        let (lo, hi) = if liquid <= vapor {
            (liquid, vapor)
        } else {
            (vapor, liquid)
        };
        if value < lo || value > hi {
            return None;
        }
        Some(((value - liquid) / (vapor - liquid)).clamp(0.0, 1.0))
    }
}

/// Saturation pressures tabulated on a temperature grid.
///
/// Interpolation is linear in ln P against 1/T (Clausius–Clapeyron form), so
/// the grid gives accurate starting points and brackets for exact solves.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaturationCurve {
    /// (T [K], P [kPa]) in increasing temperature order
    points: Vec<(f64, f64)>,
}

impl SaturationCurve {
    pub fn new(points: Vec<(f64, f64)>) -> FluidResult<Self> {
        if points.len() < 2 {
            return Err(FluidError::InvalidArg {
                what: "saturation curve needs at least two points",
            });
        }
        if points
            .windows(2)
            .any(|w| !(w[1].0 > w[0].0 && w[1].1 > w[0].1))
        {
            return Err(FluidError::InvalidArg {
                what: "saturation curve must increase in temperature and pressure",
            });
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Interpolated saturation pressure, clamped to the grid ends.
    pub fn pressure_hint(&self, t_k: f64) -> Option<f64> {
        let first = *self.points.first()?;
        let last = *self.points.last()?;
        if t_k <= first.0 {
            return Some(first.1);
        }
        if t_k >= last.0 {
            return Some(last.1);
        }
        let i = self.points.partition_point(|&(t, _)| t <= t_k);
        let (t0, p0) = self.points[i - 1];
        let (t1, p1) = self.points[i];
        Some(lerp(1.0 / t_k, 1.0 / t0, p0.ln(), 1.0 / t1, p1.ln()).exp())
    }

    /// Index `i` with `P_i <= p <= P_{i+1}`, or `None` outside the grid.
    pub fn pressure_interval(&self, p_kpa: f64) -> Option<usize> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if p_kpa < first.1 || p_kpa > last.1 {
            return None;
        }
        let i = self.points.partition_point(|&(_, p)| p <= p_kpa);
        Some(i.saturating_sub(1).min(self.points.len() - 2))
    }
}
