//! Water and steam from the IAPWS-IF97 industrial formulation.
//!
//! Region 1 covers compressed liquid, region 2 vapour (including vapour above
//! the critical temperature), region 4 the saturation line. The envelope caps
//! pressure at 16.5 MPa so every admissible state stays clear of region 3.

use crate::error::{FluidError, FluidResult};
use crate::kind::FluidKind;
use crate::model::{Branch, FluidModel, SaturationLimits, validation};
use crate::range::{ValidRange, check_bounds};
use crate::state::PhaseProps;
use tracing::debug;

/// Specific gas constant of water [kJ/(kg·K)].
const R_WATER: f64 = 0.461_526;

pub const T_CRIT_K: f64 = 647.096;
pub const P_CRIT_KPA: f64 = 22_064.0;
pub const T_TRIPLE_K: f64 = 273.16;
pub const P_TRIPLE_KPA: f64 = 0.611_657;

/// Upper temperature limit of region 1 [K].
const REGION1_T_MAX_K: f64 = 623.15;

pub const WATER_RANGE: ValidRange = ValidRange::new(0.01, 800.0, P_TRIPLE_KPA, 16_500.0);

const REGION1_I: [i32; 34] = [
    0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 8, 8, 21, 23, 29,
    30, 31, 32,
];
const REGION1_J: [i32; 34] = [
    -2, -1, 0, 1, 2, 3, 4, 5, -9, -7, -1, 0, 1, 3, -3, 0, 1, 3, 17, -4, 0, 6, -5, -2, 10, -8, -11,
    -6, -29, -31, -38, -39, -40, -41,
];
const REGION1_N: [f64; 34] = [
    0.146_329_712_131_67,
    -0.845_481_871_691_14,
    -3.756_360_367_204,
    3.385_516_916_838_5,
    -0.957_919_633_878_72,
    0.157_720_385_132_28,
    -0.016_616_417_199_501,
    8.121_462_998_356_8e-4,
    2.831_908_012_380_4e-4,
    -6.070_630_156_587_4e-4,
    -0.018_990_068_218_419,
    -0.032_529_748_770_505,
    -0.021_841_717_175_414,
    -5.283_835_796_993e-5,
    -4.718_432_107_326_7e-4,
    -3.000_178_079_302_6e-4,
    4.766_139_390_698_7e-5,
    -4.414_184_533_084_6e-6,
    -7.269_499_629_759_4e-16,
    -3.167_964_484_505_4e-5,
    -2.827_079_798_531_2e-6,
    -8.520_512_812_010_3e-10,
    -2.242_528_190_8e-6,
    -6.517_122_289_560_1e-7,
    -1.434_172_993_792_4e-13,
    -4.051_699_686_011_7e-7,
    -1.273_430_174_164_1e-9,
    -1.742_487_123_063_4e-10,
    -6.876_213_129_553_1e-19,
    1.447_830_782_852_1e-20,
    2.633_578_166_279_5e-23,
    -1.194_762_264_007_1e-23,
    1.822_809_458_140_4e-24,
    -9.353_708_729_245_8e-26,
];
const REGION2_J0: [i32; 9] = [0, 1, -5, -4, -3, -2, -1, 2, 3];
const REGION2_N0: [f64; 9] = [
    -9.692_768_650_021_7,
    10.086_655_968_018,
    -0.005_608_791_128_302,
    0.071_452_738_081_455,
    -0.407_104_982_239_28,
    1.424_081_917_144_4,
    -4.383_951_131_945,
    -0.284_086_324_607_72,
    0.021_268_463_753_307,
];
const REGION2_IR: [i32; 43] = [
    1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 4, 4, 4, 5, 6, 6, 6, 7, 7, 7, 8, 8, 9, 10, 10, 10,
    16, 16, 18, 20, 20, 20, 21, 22, 23, 24, 24, 24,
];
const REGION2_JR: [i32; 43] = [
    0, 1, 2, 3, 6, 1, 2, 4, 7, 36, 0, 1, 3, 6, 35, 1, 2, 3, 7, 3, 16, 35, 0, 11, 25, 8, 36, 13, 4,
    10, 14, 29, 50, 57, 20, 35, 48, 21, 53, 39, 26, 40, 58,
];
const REGION2_NR: [f64; 43] = [
    -1.773_174_247_321_3e-3,
    -0.017_834_862_292_358,
    -0.045_996_013_696_365,
    -0.057_581_259_083_432,
    -0.050_325_278_727_93,
    -3.303_264_167_020_3e-5,
    -1.894_898_751_631_5e-4,
    -3.939_277_724_335_5e-3,
    -0.043_797_295_650_573,
    -2.667_454_791_408_7e-5,
    2.048_173_769_230_9e-8,
    4.387_066_728_443_5e-7,
    -3.227_767_723_857e-5,
    -1.503_392_454_214_8e-3,
    -0.040_668_253_562_649,
    -7.884_730_955_936_7e-10,
    1.279_071_785_228_5e-8,
    4.822_537_271_850_7e-7,
    2.292_207_633_766_1e-6,
    -1.671_476_645_106_1e-11,
    -2.117_147_232_135_5e-3,
    -23.895_741_934_104,
    -5.905_956_432_427e-18,
    -1.262_180_889_910_1e-6,
    -0.038_946_842_435_739,
    1.125_621_136_045_9e-11,
    -8.231_134_089_799_8,
    1.980_971_280_208_8e-8,
    1.040_696_521_017_4e-19,
    -1.023_474_709_592_9e-13,
    -1.001_817_937_951_1e-9,
    -8.088_290_864_698_5e-11,
    0.106_930_318_794_09,
    -0.336_622_505_741_71,
    8.918_584_535_542_1e-25,
    3.062_931_687_623_2e-13,
    -4.200_246_769_820_8e-6,
    -5.905_602_968_563_9e-26,
    3.782_694_761_345_7e-6,
    -1.276_860_893_468_1e-15,
    7.308_761_059_506_1e-29,
    5.541_471_535_077_8e-17,
    -9.436_970_724_121e-7,
];

fn region1(t_k: f64, p_kpa: f64) -> PhaseProps {
    let pi = p_kpa / 1000.0 / 16.53;
    let tau = 1386.0 / t_k;
    let (mut g, mut g_pi, mut g_tau) = (0.0, 0.0, 0.0);
    for k in 0..REGION1_N.len() {
        let n = REGION1_N[k];
        let i = REGION1_I[k];
        let j = REGION1_J[k];
        let a = 7.1 - pi;
        let b = tau - 1.222;
        g += n * a.powi(i) * b.powi(j);
        g_pi -= n * f64::from(i) * a.powi(i - 1) * b.powi(j);
        g_tau += n * a.powi(i) * f64::from(j) * b.powi(j - 1);
    }
    PhaseProps {
        h: R_WATER * t_k * tau * g_tau,
        s: R_WATER * (tau * g_tau - g),
        v: R_WATER * t_k / p_kpa * pi * g_pi,
    }
}

fn region2(t_k: f64, p_kpa: f64) -> PhaseProps {
    let pi = p_kpa / 1000.0;
    let tau = 540.0 / t_k;

    let mut g0 = pi.ln();
    let mut g0_tau = 0.0;
    for k in 0..REGION2_N0.len() {
        let j = REGION2_J0[k];
        g0 += REGION2_N0[k] * tau.powi(j);
        g0_tau += REGION2_N0[k] * f64::from(j) * tau.powi(j - 1);
    }
    let g0_pi = 1.0 / pi;

    let (mut gr, mut gr_pi, mut gr_tau) = (0.0, 0.0, 0.0);
    for k in 0..REGION2_NR.len() {
        let n = REGION2_NR[k];
        let i = REGION2_IR[k];
        let j = REGION2_JR[k];
        let b = tau - 0.5;
        gr += n * pi.powi(i) * b.powi(j);
        gr_pi += n * f64::from(i) * pi.powi(i - 1) * b.powi(j);
        gr_tau += n * pi.powi(i) * f64::from(j) * b.powi(j - 1);
    }

    PhaseProps {
        h: R_WATER * t_k * tau * (g0_tau + gr_tau),
        s: R_WATER * (tau * (g0_tau + gr_tau) - (g0 + gr)),
        v: R_WATER * t_k / p_kpa * pi * (g0_pi + gr_pi),
    }
}

/// Region 4 saturation pressure [kPa] at `t_k`.
fn region4_pressure(t_k: f64) -> FluidResult<f64> {
    let theta = t_k - 0.238_555_575_678_49 / (t_k - 650.175_348_447_98);
    let a = theta * theta + 1_167.052_145_276_7 * theta - 724_213.167_032_06;
    let b = -17.073_846_940_092 * theta * theta + 12_020.824_702_47 * theta - 3_232_555.032_233_3;
    let c = 14.915_108_613_53 * theta * theta - 4_823.265_736_159_1 * theta + 405_113.405_420_57;
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return Err(FluidError::NonFinite {
            what: "saturation pressure discriminant",
            value: disc,
        });
    }
    let p_mpa = (2.0 * c / (-b + disc.sqrt())).powi(4);
    finite("saturation pressure", p_mpa * 1000.0)
}

/// Region 4 saturation temperature [K] at `p_kpa`.
fn region4_temperature(p_kpa: f64) -> FluidResult<f64> {
    let beta = (p_kpa / 1000.0).powf(0.25);
    let e = beta * beta - 17.073_846_940_092 * beta + 14.915_108_613_53;
    let f = 1_167.052_145_276_7 * beta * beta + 12_020.824_702_47 * beta - 4_823.265_736_159_1;
    let g = -724_213.167_032_06 * beta * beta - 3_232_555.032_233_3 * beta + 405_113.405_420_57;
    let d = 2.0 * g / (-f - (f * f - 4.0 * e * g).sqrt());
    let n10 = 650.175_348_447_98;
    let disc = (n10 + d) * (n10 + d) - 4.0 * (-0.238_555_575_678_49 + n10 * d);
    finite("saturation temperature", (n10 + d - disc.sqrt()) / 2.0)
}

fn finite(what: &'static str, value: f64) -> FluidResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FluidError::NonFinite { what, value })
    }
}

/// IF97 steam table.
#[derive(Debug, Clone)]
pub struct SteamTable {
    limits: SaturationLimits,
}

impl SteamTable {
    pub fn load() -> FluidResult<Self> {
        let t_max_k = region4_temperature(WATER_RANGE.p_max_kpa)?;
        let limits = SaturationLimits {
            t_min_k: T_TRIPLE_K,
            p_min_kpa: P_TRIPLE_KPA,
            t_max_k,
            p_max_kpa: WATER_RANGE.p_max_kpa,
            t_crit_k: T_CRIT_K,
            p_crit_kpa: P_CRIT_KPA,
        };
        debug!(
            fluid = "water",
            t_sat_max_k = t_max_k,
            "loaded IF97 steam table"
        );
        Ok(Self { limits })
    }
}

impl FluidModel for SteamTable {
    fn kind(&self) -> FluidKind {
        FluidKind::Water
    }

    fn name(&self) -> &str {
        "IAPWS-IF97"
    }

    fn valid_range(&self) -> ValidRange {
        WATER_RANGE
    }

    fn saturation_limits(&self) -> Option<SaturationLimits> {
        Some(self.limits)
    }

    fn point(&self, t_k: f64, p_kpa: f64, branch: Branch) -> FluidResult<PhaseProps> {
        validation::validate_tp(t_k, p_kpa)?;
        let props = match branch {
            Branch::Liquid => {
                check_bounds("region 1 temperature [K]", t_k, 273.15, REGION1_T_MAX_K)?;
                region1(t_k, p_kpa)
            }
            Branch::Vapor | Branch::Dense => region2(t_k, p_kpa),
        };
        validation::validate_props(props)
    }

    fn saturation_pressure(&self, t_k: f64) -> FluidResult<f64> {
        check_bounds("saturation temperature [K]", t_k, 273.15, T_CRIT_K)?;
        region4_pressure(t_k)
    }

    fn saturation_temperature(&self, p_kpa: f64) -> FluidResult<f64> {
        check_bounds("saturation pressure [kPa]", p_kpa, P_TRIPLE_KPA, P_CRIT_KPA)?;
        region4_temperature(p_kpa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(a: f64, b: f64) -> f64 {
        ((a - b) / b).abs()
    }

    // Verification values published with the IF97 release.
    #[test]
    fn region1_reference_points() {
        let p = region1(300.0, 3_000.0);
        assert!(rel(p.v, 0.100_215_168e-2) < 1e-8);
        assert!(rel(p.h, 0.115_331_273e3) < 1e-8);
        assert!(rel(p.s, 0.392_294_792) < 1e-8);

        let p = region1(500.0, 3_000.0);
        assert!(rel(p.h, 0.975_542_239e3) < 1e-8);
        assert!(rel(p.s, 0.258_041_912e1) < 1e-8);
    }

    #[test]
    fn region2_reference_points() {
        let p = region2(300.0, 3.5);
        assert!(rel(p.v, 0.394_913_866e2) < 1e-8);
        assert!(rel(p.h, 0.254_991_145e4) < 1e-8);
        assert!(rel(p.s, 0.852_238_967e1) < 1e-8);

        let p = region2(700.0, 3.5);
        assert!(rel(p.h, 0.333_568_375e4) < 1e-8);
        assert!(rel(p.s, 0.101_749_996e2) < 1e-8);
    }

    #[test]
    fn region4_reference_points() {
        assert!(rel(region4_pressure(300.0).unwrap(), 0.353_658_941e1) < 1e-8);
        assert!(rel(region4_pressure(500.0).unwrap(), 0.263_889_776e4) < 1e-8);
        assert!(rel(region4_temperature(100.0).unwrap(), 0.372_755_919e3) < 1e-8);
        assert!(rel(region4_temperature(1_000.0).unwrap(), 0.453_035_632e3) < 1e-8);
    }

    #[test]
    fn normal_boiling_point() {
        let table = SteamTable::load().unwrap();
        let t = table.saturation_temperature(101.325).unwrap();
        assert!((t - 373.124).abs() < 0.01);
    }

    #[test]
    fn saturation_limits_stay_below_region3() {
        let table = SteamTable::load().unwrap();
        let limits = table.saturation_limits().unwrap();
        assert!(limits.t_max_k < REGION1_T_MAX_K);
        assert!(limits.p_max_kpa < P_CRIT_KPA);
    }

    #[test]
    fn liquid_branch_rejects_region3_temperatures() {
        let table = SteamTable::load().unwrap();
        assert!(matches!(
            table.point(640.0, 16_000.0, Branch::Liquid),
            Err(FluidError::OutOfRange { .. })
        ));
    }
}
