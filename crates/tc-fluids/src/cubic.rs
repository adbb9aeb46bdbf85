//! Peng–Robinson cubic equation of state for the refrigerants.
//!
//! Real-fluid properties are the ideal-gas contribution (from a cp0
//! polynomial) plus the Peng–Robinson departure functions. Saturation comes
//! from equal liquid and vapour fugacities and is tabulated once at load;
//! enthalpy and entropy are shifted to the IIR reference (h = 200 kJ/kg,
//! s = 1 kJ/kg·K for saturated liquid at 0 °C).

use crate::error::{FluidError, FluidResult};
use crate::ideal_gas::CpPolynomial;
use crate::kind::FluidKind;
use crate::model::{Branch, FluidModel, SaturationLimits, validation};
use crate::range::{ValidRange, check_bounds};
use crate::saturation::SaturationCurve;
use crate::state::PhaseProps;
use std::f64::consts::{PI, SQRT_2};
use tc_core::numeric::{SolveConfig, bisect, lerp};
use tc_core::units::{KELVIN_OFFSET, R_UNIVERSAL, STANDARD_PRESSURE_KPA};
use tracing::debug;

const OMEGA_A: f64 = 0.457_24;
const OMEGA_B: f64 = 0.077_80;

/// Critical compressibility factor of the Peng–Robinson equation.
const CRITICAL_COMPRESSIBILITY: f64 = 0.3074;

/// Saturation grid stops this fraction below Tc; closer to the critical point
/// the saturation pressure is interpolated towards (Tc, Pc).
const NEAR_CRITICAL_FRACTION: f64 = 1e-3;

const SATURATION_GRID_POINTS: usize = 60;

/// Two compressibility roots closer than this are one phase.
const DISTINCT_ROOT_TOL: f64 = 1e-9;

/// Relative distance in ln P under which a pressure is taken as a grid node.
const GRID_NODE_TOL: f64 = 1e-9;

const REFERENCE_T_K: f64 = KELVIN_OFFSET;
const REFERENCE_H: f64 = 200.0;
const REFERENCE_S: f64 = 1.0;

/// Critical constants and ideal-gas heat capacity of one fluid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicParameters {
    pub kind: FluidKind,
    /// Critical temperature [K]
    pub t_crit_k: f64,
    /// Critical pressure [kPa]
    pub p_crit_kpa: f64,
    /// Acentric factor
    pub acentric: f64,
    pub cp: CpPolynomial,
    pub range: ValidRange,
}

pub const R134A: CubicParameters = CubicParameters {
    kind: FluidKind::R134a,
    t_crit_k: 374.21,
    p_crit_kpa: 4_059.28,
    acentric: 0.3268,
    cp: CpPolynomial::new([14.6, 0.3085, -2.25e-4, 0.0]),
    range: ValidRange::new(-70.0, 180.0, 1.0, 20_000.0),
};

pub const R22: CubicParameters = CubicParameters {
    kind: FluidKind::R22,
    t_crit_k: 369.295,
    p_crit_kpa: 4_990.0,
    acentric: 0.220_82,
    cp: CpPolynomial::new([9.9, 0.1935, -1.35e-4, 0.0]),
    range: ValidRange::new(-80.0, 180.0, 1.0, 20_000.0),
};

pub const CO2: CubicParameters = CubicParameters {
    kind: FluidKind::CO2,
    t_crit_k: 304.1282,
    p_crit_kpa: 7_377.3,
    acentric: 0.223_94,
    cp: CpPolynomial::new([22.26, 5.981e-2, -3.501e-5, 7.469e-9]),
    range: ValidRange::new(-56.0, 500.0, 1.0, 30_000.0),
};

/// Attraction/co-volume terms at one (T, P).
#[derive(Debug, Clone, Copy)]
struct Coefficients {
    a: f64,
    da_dt: f64,
    big_a: f64,
    big_b: f64,
}

impl Coefficients {
    fn ln_phi(&self, z: f64) -> f64 {
        z - 1.0
            - (z - self.big_b).ln()
            - self.big_a / (2.0 * SQRT_2 * self.big_b) * self.log_term(z)
    }

    fn log_term(&self, z: f64) -> f64 {
        ((z + (1.0 + SQRT_2) * self.big_b) / (z + (1.0 - SQRT_2) * self.big_b)).ln()
    }
}

/// Loaded Peng–Robinson property table.
#[derive(Debug, Clone)]
pub struct CubicTable {
    params: CubicParameters,
    molar_mass: f64,
    a_crit: f64,
    b: f64,
    kappa: f64,
    curve: SaturationCurve,
    anchor_t_k: f64,
    anchor_p_kpa: f64,
    h_offset: f64,
    s_offset: f64,
    config: SolveConfig,
}

impl CubicTable {
    /// Build the table: EOS constants, saturation grid, reference offsets.
    pub fn load(params: CubicParameters, config: SolveConfig) -> FluidResult<Self> {
        let tc = params.t_crit_k;
        let pc = params.p_crit_kpa;
        let w = params.acentric;
        let mut table = Self {
            params,
            molar_mass: params.kind.molar_mass(),
            a_crit: OMEGA_A * R_UNIVERSAL * R_UNIVERSAL * tc * tc / pc,
            b: OMEGA_B * R_UNIVERSAL * tc / pc,
            kappa: 0.374_64 + 1.542_26 * w - 0.269_92 * w * w,
            curve: SaturationCurve::default(),
            anchor_t_k: tc * (1.0 - NEAR_CRITICAL_FRACTION),
            anchor_p_kpa: pc,
            h_offset: 0.0,
            s_offset: 0.0,
            config,
        };

        let t_min = params.range.t_min_k();
        let t_anchor = table.anchor_t_k;
        let n = SATURATION_GRID_POINTS;
        let grid_t = |i: usize| {
            if i + 1 >= n {
                t_anchor
            } else {
                t_min + (t_anchor - t_min) * i as f64 / (n - 1) as f64
            }
        };

        let mut points = Vec::with_capacity(n);
        for i in 0..n {
            let t = grid_t(i);
            let p = table.solve_saturation(t, None)?;
            points.push((t, p));
        }
        table.anchor_p_kpa = points.last().map_or(pc, |&(_, p)| p);
        table.curve = SaturationCurve::new(points)?;

        let p_ref = table.saturation_pressure(REFERENCE_T_K)?;
        let raw = table.raw_point(REFERENCE_T_K, p_ref, Branch::Liquid)?;
        table.h_offset = REFERENCE_H - raw.h;
        table.s_offset = REFERENCE_S - raw.s;

        debug!(
            fluid = params.kind.key(),
            grid_points = n,
            p_sat_min_kpa = table.curve.points().first().map_or(f64::NAN, |&(_, p)| p),
            "loaded Peng-Robinson table"
        );
        Ok(table)
    }

    pub fn parameters(&self) -> &CubicParameters {
        &self.params
    }

    pub fn curve(&self) -> &SaturationCurve {
        &self.curve
    }

    fn coefficients(&self, t_k: f64, p_kpa: f64) -> Coefficients {
        let tc = self.params.t_crit_k;
        let m = 1.0 + self.kappa * (1.0 - (t_k / tc).sqrt());
        let a = self.a_crit * m * m;
        let da_dt = -self.a_crit * self.kappa * m / (t_k * tc).sqrt();
        let rt = R_UNIVERSAL * t_k;
        Coefficients {
            a,
            da_dt,
            big_a: a * p_kpa / (rt * rt),
            big_b: self.b * p_kpa / rt,
        }
    }

    /// Compressibility roots above the co-volume, ascending.
    fn compressibilities(&self, c: &Coefficients) -> FluidResult<Vec<f64>> {
        let (a, b) = (c.big_a, c.big_b);
        let c2 = -(1.0 - b);
        let c1 = a - 3.0 * b * b - 2.0 * b;
        let c0 = -(a * b - b * b - b * b * b);

        let mut roots: Vec<f64> = cubic_roots(c2, c1, c0)
            .into_iter()
            .map(|z| polish_root(z, c2, c1, c0))
            .filter(|z| z.is_finite() && *z > b)
            .collect();
        roots.sort_by(f64::total_cmp);
        roots.dedup_by(|x, y| (*x - *y).abs() < 1e-10);

        if roots.is_empty() {
            return Err(FluidError::NonFinite {
                what: "compressibility factor above co-volume",
                value: b,
            });
        }
        Ok(roots)
    }

    fn select_root(&self, roots: &[f64], c: &Coefficients, branch: Branch) -> f64 {
        match branch {
            Branch::Liquid => roots[0],
            Branch::Vapor => roots[roots.len() - 1],
            Branch::Dense => roots
                .iter()
                .copied()
                .min_by(|x, y| c.ln_phi(*x).total_cmp(&c.ln_phi(*y)))
                .unwrap_or(roots[0]),
        }
    }

    /// Properties before the reference shift.
    fn raw_point(&self, t_k: f64, p_kpa: f64, branch: Branch) -> FluidResult<PhaseProps> {
        let c = self.coefficients(t_k, p_kpa);
        let roots = self.compressibilities(&c)?;
        let z = self.select_root(&roots, &c, branch);

        let rt = R_UNIVERSAL * t_k;
        let log_term = c.log_term(z);
        let h_dep = rt * (z - 1.0) + (t_k * c.da_dt - c.a) / (2.0 * SQRT_2 * self.b) * log_term;
        let s_dep =
            R_UNIVERSAL * (z - c.big_b).ln() + c.da_dt / (2.0 * SQRT_2 * self.b) * log_term;

        let cp = &self.params.cp;
        let h_ig = cp.enthalpy_change(REFERENCE_T_K, t_k);
        let s_ig = cp.entropy_change(REFERENCE_T_K, t_k)
            - R_UNIVERSAL * (p_kpa / STANDARD_PRESSURE_KPA).ln();

        Ok(PhaseProps {
            h: (h_ig + h_dep) / self.molar_mass,
            s: (s_ig + s_dep) / self.molar_mass,
            v: z * rt / (p_kpa * self.molar_mass),
        })
    }

    fn wilson_pressure(&self, t_k: f64) -> f64 {
        let p = &self.params;
        p.p_crit_kpa * (5.373 * (1.0 + p.acentric) * (1.0 - p.t_crit_k / t_k)).exp()
    }

    /// Bisection in ln P on ln φL − ln φV, which is positive where the vapour
    /// is stable and negative where the liquid is.
    ///
    /// Outside the three-root window the single root is classified by its molar
    /// volume against the critical volume, so the sign stays defined over the
    /// whole bracket. `hint` narrows the bracket to a factor of two around an
    /// interpolated pressure.
    fn solve_saturation(&self, t_k: f64, hint: Option<f64>) -> FluidResult<f64> {
        let params = &self.params;
        let v_crit = CRITICAL_COMPRESSIBILITY * R_UNIVERSAL * params.t_crit_k / params.p_crit_kpa;
        let (lower, upper) = match hint {
            Some(p) => (0.5 * p, (2.0 * p).min(params.p_crit_kpa)),
            None => (1e-3 * self.wilson_pressure(t_k), params.p_crit_kpa),
        };

        let residual = |ln_p: f64| -> FluidResult<f64> {
            let p = ln_p.exp();
            let c = self.coefficients(t_k, p);
            let roots = self.compressibilities(&c)?;
            let z_l = roots[0];
            let z_v = roots[roots.len() - 1];
            if z_v - z_l < DISTINCT_ROOT_TOL {
                let v = z_l * R_UNIVERSAL * t_k / p;
                return Ok(if v < v_crit { -1.0 } else { 1.0 });
            }
            Ok(c.ln_phi(z_l) - c.ln_phi(z_v))
        };

        let root = bisect(
            "saturation pressure",
            residual,
            lower.ln(),
            upper.ln(),
            &self.config,
        )?;
        Ok(root.x.exp())
    }

    fn near_critical_pressure(&self, t_k: f64) -> f64 {
        let tc = self.params.t_crit_k;
        let pc = self.params.p_crit_kpa;
        lerp(
            1.0 / t_k,
            1.0 / self.anchor_t_k,
            self.anchor_p_kpa.ln(),
            1.0 / tc,
            pc.ln(),
        )
        .exp()
    }

    fn near_critical_temperature(&self, p_kpa: f64) -> f64 {
        let tc = self.params.t_crit_k;
        let pc = self.params.p_crit_kpa;
        1.0 / lerp(
            p_kpa.ln(),
            self.anchor_p_kpa.ln(),
            1.0 / self.anchor_t_k,
            pc.ln(),
            1.0 / tc,
        )
    }
}

impl FluidModel for CubicTable {
    fn kind(&self) -> FluidKind {
        self.params.kind
    }

    fn name(&self) -> &str {
        "Peng-Robinson"
    }

    fn valid_range(&self) -> ValidRange {
        self.params.range
    }

    fn saturation_limits(&self) -> Option<SaturationLimits> {
        let &(t_min_k, p_min_kpa) = self.curve.points().first()?;
        Some(SaturationLimits {
            t_min_k,
            p_min_kpa,
            t_max_k: self.params.t_crit_k,
            p_max_kpa: self.params.p_crit_kpa,
            t_crit_k: self.params.t_crit_k,
            p_crit_kpa: self.params.p_crit_kpa,
        })
    }

    fn point(&self, t_k: f64, p_kpa: f64, branch: Branch) -> FluidResult<PhaseProps> {
        validation::validate_tp(t_k, p_kpa)?;
        let raw = self.raw_point(t_k, p_kpa, branch)?;
        validation::validate_props(PhaseProps {
            h: raw.h + self.h_offset,
            s: raw.s + self.s_offset,
            v: raw.v,
        })
    }

    fn saturation_pressure(&self, t_k: f64) -> FluidResult<f64> {
        check_bounds(
            "saturation temperature [K]",
            t_k,
            self.params.range.t_min_k(),
            self.params.t_crit_k,
        )?;
        if t_k >= self.anchor_t_k {
            return Ok(self.near_critical_pressure(t_k));
        }
        self.solve_saturation(t_k, self.curve.pressure_hint(t_k))
    }

    fn saturation_temperature(&self, p_kpa: f64) -> FluidResult<f64> {
        let points = self.curve.points();
        let p_min = points.first().map_or(f64::NAN, |&(_, p)| p);
        check_bounds(
            "saturation pressure [kPa]",
            p_kpa,
            p_min,
            self.params.p_crit_kpa,
        )?;
        if p_kpa >= self.anchor_p_kpa {
            return Ok(self.near_critical_temperature(p_kpa));
        }

        let i = self
            .curve
            .pressure_interval(p_kpa)
            .ok_or(FluidError::OutOfRange {
                what: "saturation pressure [kPa]",
                value: p_kpa,
                min: p_min,
                max: self.params.p_crit_kpa,
            })?;
        let ln_p = p_kpa.ln();
        for &(t, p) in &points[i..=i + 1] {
            if (p.ln() - ln_p).abs() < GRID_NODE_TOL {
                return Ok(t);
            }
        }

        // Widen by one node each side so grid round-off cannot lose the sign change.
        let lower = points[i.saturating_sub(1)].0;
        let upper = points[(i + 2).min(points.len() - 1)].0;
        let root = bisect(
            "saturation temperature",
            |t| Ok::<_, FluidError>(self.saturation_pressure(t)?.ln() - ln_p),
            lower,
            upper,
            &self.config,
        )?;
        Ok(root.x)
    }
}

/// Real roots of z³ + c2·z² + c1·z + c0.
fn cubic_roots(c2: f64, c1: f64, c0: f64) -> Vec<f64> {
    let shift = c2 / 3.0;
    let p = c1 - c2 * c2 / 3.0;
    let q = 2.0 * c2 * c2 * c2 / 27.0 - c2 * c1 / 3.0 + c0;
    let disc = q * q / 4.0 + p * p * p / 27.0;

    if disc > 0.0 {
        let sq = disc.sqrt();
        let y = (-q / 2.0 + sq).cbrt() + (-q / 2.0 - sq).cbrt();
        vec![y - shift]
    } else if p == 0.0 {
        vec![-shift]
    } else {
        let m = 2.0 * (-p / 3.0).sqrt();
        let theta = ((3.0 * q / (p * m)).clamp(-1.0, 1.0)).acos() / 3.0;
        (0..3)
            .map(|k| m * (theta - 2.0 * PI * f64::from(k) / 3.0).cos() - shift)
            .collect()
    }
}

fn polish_root(mut z: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    for _ in 0..3 {
        let f = ((z + c2) * z + c1) * z + c0;
        let df = (3.0 * z + 2.0 * c2) * z + c1;
        if df == 0.0 {
            break;
        }
        z -= f / df;
    }
    z
}
