//! State resolver: any supported pair of independent properties to a full state.
//!
//! Phase detection always precedes property evaluation. The resolver locates
//! the input against the saturation curve, returns a two-phase mixture when the
//! pair falls inside the dome, and otherwise solves on the single-phase branch
//! with a bounded bracketing search.

use crate::CONSISTENCY_REL_TOL;
use crate::error::{FluidError, FluidResult};
use crate::model::{Branch, FluidModel, SaturationLimits};
use crate::registry::FluidHandle;
use crate::saturation::SaturationPoint;
use crate::state::{Phase, PhaseProps, ThermodynamicState};
use crate::table::PropertyTable;
use tc_core::numeric::{SolveConfig, Tolerances, bisect, nearly_equal, relative_error};
use tc_core::units::{to_celsius, to_kelvin};
use tracing::{debug, warn};

/// Relative distance from the saturation pressure inside which a (T, P) input
/// is taken to lie on the saturation line.
const SATURATION_LINE_TOL: f64 = 1e-9;

/// Independent property pairs accepted by [`resolve`]. Values are passed in the
/// order of the variant name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropertyPair {
    TemperaturePressure,
    PressureEnthalpy,
    PressureEntropy,
    PressureQuality,
    TemperatureQuality,
    PressureVolume,
    TemperatureVolume,
    EnthalpyEntropy,
}

impl PropertyPair {
    pub const ALL: [PropertyPair; 8] = [
        PropertyPair::TemperaturePressure,
        PropertyPair::PressureEnthalpy,
        PropertyPair::PressureEntropy,
        PropertyPair::PressureQuality,
        PropertyPair::TemperatureQuality,
        PropertyPair::PressureVolume,
        PropertyPair::TemperatureVolume,
        PropertyPair::EnthalpyEntropy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::TemperaturePressure => "T&P",
            Self::PressureEnthalpy => "P&h",
            Self::PressureEntropy => "P&s",
            Self::PressureQuality => "P&x",
            Self::TemperatureQuality => "T&x",
            Self::PressureVolume => "P&v",
            Self::TemperatureVolume => "T&v",
            Self::EnthalpyEntropy => "h&s",
        }
    }

    pub fn first_label(self) -> &'static str {
        match self {
            Self::TemperaturePressure | Self::TemperatureQuality | Self::TemperatureVolume => {
                "Temperature [°C]"
            }
            Self::EnthalpyEntropy => "Enthalpy [kJ/kg]",
            _ => "Pressure [kPa]",
        }
    }

    pub fn second_label(self) -> &'static str {
        match self {
            Self::TemperaturePressure => "Pressure [kPa]",
            Self::PressureEnthalpy => "Enthalpy [kJ/kg]",
            Self::PressureEntropy | Self::EnthalpyEntropy => "Entropy [kJ/(kg·K)]",
            Self::PressureQuality | Self::TemperatureQuality => "Quality [-]",
            Self::PressureVolume | Self::TemperatureVolume => "Specific volume [m³/kg]",
        }
    }

    fn needs_saturation(self) -> bool {
        matches!(self, Self::PressureQuality | Self::TemperatureQuality)
    }
}

/// Resolve a full state with the default solve configuration.
pub fn resolve(
    handle: &FluidHandle,
    pair: PropertyPair,
    first: f64,
    second: f64,
) -> FluidResult<ThermodynamicState> {
    resolve_with(handle, pair, first, second, &SolveConfig::default())
}

/// Resolve a full state from `pair` = (`first`, `second`) in contract units.
pub fn resolve_with(
    handle: &FluidHandle,
    pair: PropertyPair,
    first: f64,
    second: f64,
    config: &SolveConfig,
) -> FluidResult<ThermodynamicState> {
    let table = handle.table();
    let range = table.valid_range();
    for (what, value) in [(pair.first_label(), first), (pair.second_label(), second)] {
        if !value.is_finite() {
            return Err(FluidError::NonFinite { what, value });
        }
    }
    if pair.needs_saturation() && table.saturation_limits().is_none() {
        return Err(FluidError::InvalidPropertyPair {
            fluid: handle.kind(),
            pair: pair.label(),
            reason: "quality is undefined for a fluid without phase change",
        });
    }

    let state = match pair {
        PropertyPair::TemperaturePressure => {
            range.check_temperature(first)?;
            range.check_pressure(second)?;
            at_temperature_pressure(table, to_kelvin(first), second)?
        }
        PropertyPair::PressureEnthalpy => {
            range.check_pressure(first)?;
            solve_isobar(table, first, Target::Enthalpy(second), config)?
        }
        PropertyPair::PressureEntropy => {
            range.check_pressure(first)?;
            solve_isobar(table, first, Target::Entropy(second), config)?
        }
        PropertyPair::PressureVolume => {
            range.check_pressure(first)?;
            check_volume(second)?;
            solve_isobar(table, first, Target::Volume(second), config)?
        }
        PropertyPair::PressureQuality => {
            range.check_pressure(first)?;
            check_quality(second)?;
            saturation_point_at_pressure(table, first)?.mixture(second)?
        }
        PropertyPair::TemperatureQuality => {
            range.check_temperature(first)?;
            check_quality(second)?;
            saturation_point_at_temperature(table, to_kelvin(first))?.mixture(second)?
        }
        PropertyPair::TemperatureVolume => {
            range.check_temperature(first)?;
            check_volume(second)?;
            solve_isotherm(table, to_kelvin(first), second, config)?
        }
        PropertyPair::EnthalpyEntropy => solve_isentrope(table, first, second, config)?,
    };

    debug!(
        fluid = handle.kind().key(),
        pair = pair.label(),
        first,
        second,
        phase = state.phase().label(),
        "state resolved"
    );
    Ok(state)
}

/// Saturated liquid/vapour properties at pressure `p_kpa`.
pub fn saturation_at_pressure(handle: &FluidHandle, p_kpa: f64) -> FluidResult<SaturationPoint> {
    let table = handle.table();
    if table.saturation_limits().is_none() {
        return Err(no_phase_change(handle, "P_sat"));
    }
    table.valid_range().check_pressure(p_kpa)?;
    saturation_point_at_pressure(table, p_kpa)
}

/// Saturated liquid/vapour properties at temperature `t_c` [°C].
pub fn saturation_at_temperature(
    handle: &FluidHandle,
    t_c: f64,
) -> FluidResult<SaturationPoint> {
    let table = handle.table();
    if table.saturation_limits().is_none() {
        return Err(no_phase_change(handle, "T_sat"));
    }
    table.valid_range().check_temperature(t_c)?;
    saturation_point_at_temperature(table, to_kelvin(t_c))
}

fn no_phase_change(handle: &FluidHandle, pair: &'static str) -> FluidError {
    FluidError::InvalidPropertyPair {
        fluid: handle.kind(),
        pair,
        reason: "fluid has no liquid-vapor phase change",
    }
}

fn check_quality(x: f64) -> FluidResult<f64> {
    crate::range::check_bounds("quality", x, 0.0, 1.0)
}

fn check_volume(v: f64) -> FluidResult<f64> {
    if v <= 0.0 {
        return Err(FluidError::OutOfRange {
            what: "specific volume [m³/kg]",
            value: v,
            min: 0.0,
            max: f64::INFINITY,
        });
    }
    Ok(v)
}

/// Side of the saturation curve a single-phase segment lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Liquid,
    Vapor,
}

fn branch_at(limits: Option<&SaturationLimits>, t_k: f64, p_kpa: f64, side: Side) -> Branch {
    match limits {
        None => Branch::Dense,
        Some(l) if t_k >= l.t_crit_k || p_kpa >= l.p_crit_kpa => Branch::Dense,
        Some(_) => match side {
            Side::Liquid => Branch::Liquid,
            Side::Vapor => Branch::Vapor,
        },
    }
}

fn phase_for(limits: Option<&SaturationLimits>, branch: Branch, t_k: f64, p_kpa: f64) -> Phase {
    let Some(l) = limits else {
        return Phase::SinglePhaseGas;
    };
    match branch {
        Branch::Liquid => Phase::SubcooledLiquid,
        Branch::Vapor => Phase::SuperheatedVapor,
        Branch::Dense if l.is_supercritical(t_k, p_kpa) => Phase::Supercritical,
        Branch::Dense if p_kpa >= l.p_crit_kpa => Phase::SubcooledLiquid,
        Branch::Dense => Phase::SuperheatedVapor,
    }
}

fn single_phase(
    table: &PropertyTable,
    t_k: f64,
    p_kpa: f64,
    side: Side,
) -> FluidResult<ThermodynamicState> {
    let limits = table.saturation_limits();
    let branch = branch_at(limits.as_ref(), t_k, p_kpa, side);
    let props = table.point(t_k, p_kpa, branch)?;
    Ok(ThermodynamicState::single_phase(
        table.kind(),
        to_celsius(t_k),
        p_kpa,
        props,
        phase_for(limits.as_ref(), branch, t_k, p_kpa),
    ))
}

fn at_temperature_pressure(
    table: &PropertyTable,
    t_k: f64,
    p_kpa: f64,
) -> FluidResult<ThermodynamicState> {
    let Some(limits) = table.saturation_limits() else {
        return single_phase(table, t_k, p_kpa, Side::Vapor);
    };
    if t_k >= limits.t_crit_k || p_kpa >= limits.p_crit_kpa {
        return single_phase(table, t_k, p_kpa, Side::Vapor);
    }
    if t_k > limits.t_max_k {
        // Saturation pressure here exceeds every pressure in the envelope.
        return single_phase(table, t_k, p_kpa, Side::Vapor);
    }

    let p_sat = table.saturation_pressure(t_k)?;
    let on_line = Tolerances {
        abs: 0.0,
        rel: SATURATION_LINE_TOL,
    };
    if nearly_equal(p_kpa, p_sat, on_line) {
        return saturation_point_at_temperature(table, t_k)?.mixture(0.0);
    }
    let side = if p_kpa > p_sat {
        Side::Liquid
    } else {
        Side::Vapor
    };
    single_phase(table, t_k, p_kpa, side)
}

fn saturation_point(
    table: &PropertyTable,
    t_k: f64,
    p_kpa: f64,
) -> FluidResult<SaturationPoint> {
    let liquid = table.point(t_k, p_kpa, Branch::Liquid)?;
    let vapor = table.point(t_k, p_kpa, Branch::Vapor)?;
    Ok(SaturationPoint::new(
        table.kind(),
        to_celsius(t_k),
        p_kpa,
        liquid,
        vapor,
    ))
}

fn saturation_point_at_pressure(
    table: &PropertyTable,
    p_kpa: f64,
) -> FluidResult<SaturationPoint> {
    match try_saturation_at_pressure(table, p_kpa)? {
        Some(sat) => Ok(sat),
        None => {
            let (min, max) = table
                .saturation_limits()
                .map_or((f64::NAN, f64::NAN), |l| (l.p_min_kpa, l.p_max_kpa));
            Err(FluidError::OutOfRange {
                what: "saturation pressure [kPa]",
                value: p_kpa,
                min,
                max,
            })
        }
    }
}

fn try_saturation_at_pressure(
    table: &PropertyTable,
    p_kpa: f64,
) -> FluidResult<Option<SaturationPoint>> {
    match table.saturation_limits() {
        Some(limits) if limits.covers_pressure(p_kpa) => {
            let t_sat = table.saturation_temperature(p_kpa)?;
            saturation_point(table, t_sat, p_kpa).map(Some)
        }
        _ => Ok(None),
    }
}

fn saturation_point_at_temperature(
    table: &PropertyTable,
    t_k: f64,
) -> FluidResult<SaturationPoint> {
    match try_saturation_at_temperature(table, t_k)? {
        Some(sat) => Ok(sat),
        None => {
            let (min, max) = table
                .saturation_limits()
                .map_or((f64::NAN, f64::NAN), |l| {
                    (to_celsius(l.t_min_k), to_celsius(l.t_max_k))
                });
            Err(FluidError::OutOfRange {
                what: "saturation temperature [°C]",
                value: to_celsius(t_k),
                min,
                max,
            })
        }
    }
}

fn try_saturation_at_temperature(
    table: &PropertyTable,
    t_k: f64,
) -> FluidResult<Option<SaturationPoint>> {
    match table.saturation_limits() {
        Some(limits) if limits.covers_temperature(t_k) => {
            let p_sat = table.saturation_pressure(t_k)?;
            saturation_point(table, t_k, p_sat).map(Some)
        }
        _ => Ok(None),
    }
}

/// Property held fixed by an isobaric search.
#[derive(Debug, Clone, Copy)]
enum Target {
    Enthalpy(f64),
    Entropy(f64),
    Volume(f64),
}

impl Target {
    fn value(self) -> f64 {
        match self {
            Target::Enthalpy(v) | Target::Entropy(v) | Target::Volume(v) => v,
        }
    }

    fn of(self, props: &PhaseProps) -> f64 {
        match self {
            Target::Enthalpy(_) => props.h,
            Target::Entropy(_) => props.s,
            Target::Volume(_) => props.v,
        }
    }

    fn what(self) -> &'static str {
        match self {
            Target::Enthalpy(_) => "enthalpy [kJ/kg]",
            Target::Entropy(_) => "entropy [kJ/(kg·K)]",
            Target::Volume(_) => "specific volume [m³/kg]",
        }
    }

    fn solve_label(self) -> &'static str {
        match self {
            Target::Enthalpy(_) => "temperature from (P, h)",
            Target::Entropy(_) => "temperature from (P, s)",
            Target::Volume(_) => "temperature from (P, v)",
        }
    }
}

/// Solve for temperature at fixed pressure so that `target` is met.
fn solve_isobar(
    table: &PropertyTable,
    p_kpa: f64,
    target: Target,
    config: &SolveConfig,
) -> FluidResult<ThermodynamicState> {
    let range = table.valid_range();
    let limits = table.saturation_limits();
    let y = target.value();
    let (t_lo, t_hi) = (range.t_min_k(), range.t_max_k());

    let (lower, upper, side) = match try_saturation_at_pressure(table, p_kpa)? {
        Some(sat) => {
            let (f, g) = (target.of(&sat.liquid()), target.of(&sat.vapor()));
            if let Some(quality) = SaturationPoint::quality_for(f, g, y) {
                return sat.mixture(quality);
            }
            let t_sat = to_kelvin(sat.temperature_c);
            if y < f {
                (t_lo, t_sat, Side::Liquid)
            } else {
                (t_sat, t_hi, Side::Vapor)
            }
        }
        None => (t_lo, t_hi, Side::Vapor),
    };

    let eval = |t_k: f64| -> FluidResult<f64> {
        let branch = branch_at(limits.as_ref(), t_k, p_kpa, side);
        Ok(target.of(&table.point(t_k, p_kpa, branch)?))
    };

    let y_lower = eval(lower)?;
    let y_upper = eval(upper)?;
    if (y - y_lower) * (y - y_upper) > 0.0 {
        let full_lo = eval_side(table, limits.as_ref(), t_lo, p_kpa, target)?;
        let full_hi = eval_side(table, limits.as_ref(), t_hi, p_kpa, target)?;
        return Err(FluidError::OutOfRange {
            what: target.what(),
            value: y,
            min: full_lo.min(full_hi),
            max: full_lo.max(full_hi),
        });
    }

    let root = bisect(
        target.solve_label(),
        |t| Ok::<_, FluidError>(eval(t)? - y),
        lower,
        upper,
        config,
    )?;
    let state = single_phase(table, root.x, p_kpa, side)?;

    let achieved = match target {
        Target::Enthalpy(_) => state.enthalpy(),
        Target::Entropy(_) => state.entropy(),
        Target::Volume(_) => state.specific_volume(),
    };
    check_consistency(target.what(), y, achieved)?;
    Ok(state)
}

/// Target property at one end of the temperature envelope, evaluated on the
/// side of the saturation curve that end lies on.
fn eval_side(
    table: &PropertyTable,
    limits: Option<&SaturationLimits>,
    t_k: f64,
    p_kpa: f64,
    target: Target,
) -> FluidResult<f64> {
    let side = match limits {
        Some(l) if l.covers_pressure(p_kpa) => {
            if t_k < table.saturation_temperature(p_kpa)? {
                Side::Liquid
            } else {
                Side::Vapor
            }
        }
        _ => Side::Vapor,
    };
    let branch = branch_at(limits, t_k, p_kpa, side);
    Ok(target.of(&table.point(t_k, p_kpa, branch)?))
}

/// Solve for pressure at fixed temperature so that the specific volume is met.
fn solve_isotherm(
    table: &PropertyTable,
    t_k: f64,
    v: f64,
    config: &SolveConfig,
) -> FluidResult<ThermodynamicState> {
    let range = table.valid_range();
    let limits = table.saturation_limits();
    let (p_lo, p_hi) = (range.p_min_kpa, range.p_max_kpa);

    let (lower, upper, side) = match try_saturation_at_temperature(table, t_k)? {
        Some(sat) => {
            if let Some(quality) = SaturationPoint::quality_for(sat.v_f, sat.v_g, v) {
                return sat.mixture(quality);
            }
            let p_sat = sat.pressure_kpa.min(p_hi);
            if v < sat.v_f {
                (p_sat, p_hi, Side::Liquid)
            } else {
                (p_lo, p_sat, Side::Vapor)
            }
        }
        None => (p_lo, p_hi, Side::Vapor),
    };

    // Search in ln P; specific volume spans decades across the range.
    let eval = |ln_p: f64| -> FluidResult<f64> {
        let p = ln_p.exp();
        let branch = branch_at(limits.as_ref(), t_k, p, side);
        Ok(table.point(t_k, p, branch)?.v - v)
    };
    let (a, b) = (lower.ln(), upper.ln());
    let (fa, fb) = (eval(a)?, eval(b)?);
    if fa * fb > 0.0 {
        let (v_a, v_b) = (fa + v, fb + v);
        return Err(FluidError::OutOfRange {
            what: "specific volume [m³/kg]",
            value: v,
            min: v_a.min(v_b),
            max: v_a.max(v_b),
        });
    }

    let root = bisect("pressure from (T, v)", eval, a, b, config)?;
    let state = single_phase(table, t_k, root.x.exp(), side)?;
    check_consistency("specific volume [m³/kg]", v, state.specific_volume())?;
    Ok(state)
}

/// Where an isentrope crosses one isobar of the envelope.
#[derive(Debug, Clone, Copy)]
enum Crossing {
    State(ThermodynamicState),
    /// The isentrope needs a temperature below the envelope at this pressure.
    TooCold,
    /// The isentrope needs a temperature above the envelope at this pressure.
    TooHot,
}

impl Crossing {
    fn residual(self, h: f64) -> f64 {
        match self {
            Crossing::State(state) => state.enthalpy() - h,
            Crossing::TooCold => -1.0,
            Crossing::TooHot => 1.0,
        }
    }
}

fn isentrope_at(
    table: &PropertyTable,
    p_kpa: f64,
    s: f64,
    config: &SolveConfig,
) -> FluidResult<Crossing> {
    match solve_isobar(table, p_kpa, Target::Entropy(s), config) {
        Ok(state) => Ok(Crossing::State(state)),
        // Entropy falls with pressure along an isotherm, so an entropy above the
        // isobar's range means the isentrope crosses it above t_max.
        Err(FluidError::OutOfRange { value, max, .. }) if value > max => Ok(Crossing::TooHot),
        Err(FluidError::OutOfRange { value, min, .. }) if value < min => Ok(Crossing::TooCold),
        Err(err) => Err(err),
    }
}

/// Solve for pressure along the isentrope `s` so that the enthalpy is met.
///
/// Enthalpy rises with pressure along an isentrope (dh = v dP), so the outer
/// search is a bisection in ln P with an inner (P, s) solve at each step.
fn solve_isentrope(
    table: &PropertyTable,
    h: f64,
    s: f64,
    config: &SolveConfig,
) -> FluidResult<ThermodynamicState> {
    let range = table.valid_range();
    let (a, b) = (range.p_min_kpa.ln(), range.p_max_kpa.ln());
    let low = isentrope_at(table, range.p_min_kpa, s, config)?;
    let high = isentrope_at(table, range.p_max_kpa, s, config)?;
    if low.residual(h) * high.residual(h) > 0.0 {
        let bound = |c: Crossing| match c {
            Crossing::State(state) => state.enthalpy(),
            _ => f64::NAN,
        };
        return Err(FluidError::OutOfRange {
            what: "enthalpy [kJ/kg]",
            value: h,
            min: bound(low),
            max: bound(high),
        });
    }

    let root = bisect(
        "pressure from (h, s)",
        |ln_p| Ok::<_, FluidError>(isentrope_at(table, ln_p.exp(), s, config)?.residual(h)),
        a,
        b,
        config,
    )?;
    let state = match isentrope_at(table, root.x.exp(), s, config)? {
        Crossing::State(state) => state,
        _ => {
            return Err(FluidError::OutOfRange {
                what: "entropy [kJ/(kg·K)]",
                value: s,
                min: f64::NAN,
                max: f64::NAN,
            });
        }
    };
    check_consistency("enthalpy [kJ/kg]", h, state.enthalpy())?;
    Ok(state)
}

fn check_consistency(what: &'static str, expected: f64, actual: f64) -> FluidResult<()> {
    if relative_error(actual, expected) > CONSISTENCY_REL_TOL {
        warn!(what, expected, actual, "resolved state failed consistency check");
        return Err(FluidError::PhysicalConsistency {
            what,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::FluidKind;
    use crate::registry::FluidRegistry;

    fn handle(kind: FluidKind) -> FluidHandle {
        FluidRegistry::global().handle(kind).unwrap()
    }

    #[test]
    fn pair_labels() {
        assert_eq!(PropertyPair::PressureEnthalpy.label(), "P&h");
        assert_eq!(PropertyPair::TemperatureVolume.first_label(), "Temperature [°C]");
        assert_eq!(PropertyPair::PressureQuality.second_label(), "Quality [-]");
    }

    #[test]
    fn branch_selection_around_critical_point() {
        let limits = SaturationLimits {
            t_min_k: 200.0,
            p_min_kpa: 10.0,
            t_max_k: 300.0,
            p_max_kpa: 7000.0,
            t_crit_k: 300.0,
            p_crit_kpa: 7000.0,
        };
        let l = Some(&limits);
        assert_eq!(branch_at(l, 250.0, 100.0, Side::Liquid), Branch::Liquid);
        assert_eq!(branch_at(l, 310.0, 100.0, Side::Liquid), Branch::Dense);
        assert_eq!(phase_for(l, Branch::Dense, 300.0, 7000.0), Phase::Supercritical);
        assert_eq!(phase_for(l, Branch::Dense, 250.0, 8000.0), Phase::SubcooledLiquid);
        assert_eq!(phase_for(l, Branch::Dense, 310.0, 100.0), Phase::SuperheatedVapor);
        assert_eq!(phase_for(None, Branch::Dense, 310.0, 100.0), Phase::SinglePhaseGas);
    }

    #[test]
    fn subcooled_and_superheated_water() {
        let water = handle(FluidKind::Water);
        let liquid = resolve(&water, PropertyPair::TemperaturePressure, 25.0, 101.325).unwrap();
        assert_eq!(liquid.phase(), Phase::SubcooledLiquid);
        assert!((liquid.enthalpy() - 104.9).abs() < 0.5);

        let vapor = resolve(&water, PropertyPair::TemperaturePressure, 200.0, 101.325).unwrap();
        assert_eq!(vapor.phase(), Phase::SuperheatedVapor);
        assert!(vapor.quality().is_none());
    }

    #[test]
    fn enthalpy_inside_dome_is_a_mixture() {
        let water = handle(FluidKind::Water);
        let sat = saturation_at_pressure(&water, 101.325).unwrap();
        let h = sat.h_f + 0.4 * sat.h_fg();
        let state = resolve(&water, PropertyPair::PressureEnthalpy, 101.325, h).unwrap();
        assert_eq!(state.phase(), Phase::SaturatedMixture);
        assert!((state.quality().unwrap() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn dome_boundary_resolves_to_quality_bounds() {
        let water = handle(FluidKind::Water);
        let sat = saturation_at_pressure(&water, 500.0).unwrap();
        let f = resolve(&water, PropertyPair::PressureEnthalpy, 500.0, sat.h_f).unwrap();
        let g = resolve(&water, PropertyPair::PressureEntropy, 500.0, sat.s_g).unwrap();
        assert_eq!(f.quality(), Some(0.0));
        assert_eq!(g.quality(), Some(1.0));
    }

    #[test]
    fn quality_pairs_need_phase_change() {
        let air = handle(FluidKind::Air);
        let err = resolve(&air, PropertyPair::PressureQuality, 100.0, 0.5).unwrap_err();
        assert!(matches!(err, FluidError::InvalidPropertyPair { .. }));
        assert!(saturation_at_temperature(&air, 20.0).is_err());
    }

    #[test]
    fn isotherm_volume_solve() {
        let co2 = handle(FluidKind::CO2);
        let reference = resolve(&co2, PropertyPair::TemperaturePressure, 40.0, 5_000.0).unwrap();
        let back = resolve(
            &co2,
            PropertyPair::TemperatureVolume,
            40.0,
            reference.specific_volume(),
        )
        .unwrap();
        assert!(relative_error(back.pressure_kpa(), 5_000.0) < 1e-6);
    }

    #[test]
    fn enthalpy_entropy_pair_inverts_both_phases() {
        let water = handle(FluidKind::Water);
        for (pair, a, b) in [
            (PropertyPair::TemperaturePressure, 400.0, 3_000.0),
            (PropertyPair::PressureQuality, 50.0, 0.9),
            (PropertyPair::TemperaturePressure, 60.0, 1_000.0),
        ] {
            let reference = resolve(&water, pair, a, b).unwrap();
            let back = resolve(
                &water,
                PropertyPair::EnthalpyEntropy,
                reference.enthalpy(),
                reference.entropy(),
            )
            .unwrap();
            assert_eq!(back.phase(), reference.phase());
            assert!(relative_error(back.pressure_kpa(), reference.pressure_kpa()) < 1e-6);
            assert!((back.temperature_c() - reference.temperature_c()).abs() < 1e-4);
        }
    }

    #[test]
    fn enthalpy_entropy_outside_envelope() {
        let air = handle(FluidKind::Air);
        let reference = resolve(&air, PropertyPair::TemperaturePressure, 25.0, 100.0).unwrap();
        let err = resolve(
            &air,
            PropertyPair::EnthalpyEntropy,
            reference.enthalpy() + 5.0e4,
            reference.entropy(),
        )
        .unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }

    #[test]
    fn enthalpy_beyond_envelope_is_out_of_range() {
        let air = handle(FluidKind::Air);
        let err = resolve(&air, PropertyPair::PressureEnthalpy, 100.0, 1.0e5).unwrap_err();
        assert!(matches!(err, FluidError::OutOfRange { .. }));
    }
}
