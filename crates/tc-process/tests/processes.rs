//! End-to-end process scenarios and second-law properties.

use proptest::prelude::*;
use tc_core::numeric::relative_error;
use tc_core::units::to_kelvin;
use tc_fluids::{
    FluidHandle, Phase, PropertyPair, PropertyTable, ThermodynamicState, resolve, resolve_fluid,
};
use tc_process::{
    ENTROPY_ABS_TOL, IsochoricTarget, ProcessEngine, ProcessError, ProcessKind, ProcessSpec,
};

fn handle(name: &str) -> FluidHandle {
    resolve_fluid(name).unwrap()
}

fn tp(handle: &FluidHandle, t_c: f64, p_kpa: f64) -> ThermodynamicState {
    resolve(handle, PropertyPair::TemperaturePressure, t_c, p_kpa).unwrap()
}

#[test]
fn air_compression_100_to_800_kpa_at_85_percent() {
    let air = handle("air");
    let inlet = tp(&air, 25.0, 100.0);
    let result = ProcessEngine::new()
        .run(&air, &inlet, &ProcessSpec::isentropic(800.0, 0.85))
        .unwrap();
    let ideal = result.ideal.unwrap();

    let table = match air.table() {
        PropertyTable::Air(table) => table,
        _ => unreachable!("air resolves to the ideal-gas table"),
    };
    let (t1, t2) = (inlet.temperature_k(), ideal.temperature_k());

    // Constant-gamma estimate with gamma taken at the mean temperature.
    let gamma = table.gamma(0.5 * (t1 + t2));
    let t_formula = t1 * 8.0_f64.powf((gamma - 1.0) / gamma);
    assert!(
        relative_error(t2, t_formula) < 0.01,
        "T_ideal = {t2} K, formula = {t_formula} K"
    );

    // Variable cp: the integral of cp/T over the isentrope equals R ln(P2/P1).
    let steps = 400;
    let dt = (t2 - t1) / steps as f64;
    let integral: f64 = (0..steps)
        .map(|i| {
            let t = t1 + (i as f64 + 0.5) * dt;
            table.cp(t) / t * dt
        })
        .sum();
    let expected = table.gas_constant() * 8.0_f64.ln();
    assert!(
        relative_error(integral, expected) < 1e-4,
        "cp/T integral = {integral}, R ln 8 = {expected}"
    );
    assert!((ideal.entropy() - inlet.entropy()).abs() < ENTROPY_ABS_TOL);

    let dh_ideal = ideal.enthalpy() - inlet.enthalpy();
    let expected_h = inlet.enthalpy() + dh_ideal / 0.85;
    assert!((result.outlet.enthalpy() - expected_h).abs() < 1e-6);
    assert!(result.outlet.enthalpy() > ideal.enthalpy());
    assert!(result.outlet.entropy() > ideal.entropy());
    assert!(result.outlet.temperature_k() > ideal.temperature_k());
    assert_eq!(result.outlet.phase(), Phase::SinglePhaseGas);
    assert!((result.work - (expected_h - inlet.enthalpy())).abs() < 1e-6);
    assert_eq!(result.heat, 0.0);
}

#[test]
fn air_polytropic_compression_lies_between_isothermal_and_isentropic() {
    let air = handle("air");
    let inlet = tp(&air, 25.0, 100.0);
    let result = ProcessEngine::new()
        .run(&air, &inlet, &ProcessSpec::polytropic(800.0, 1.3))
        .unwrap();
    let ideal = result.ideal.unwrap();
    assert_eq!(result.kind, ProcessKind::Polytropic);
    assert!(result.outlet.temperature_k() > inlet.temperature_k());
    assert!(result.outlet.temperature_k() < ideal.temperature_k());
    // Cooled during compression.
    assert!(result.heat < 0.0);
    assert!(result.work > 0.0);
    assert!((result.work + result.heat - result.enthalpy_change()).abs() < 1e-9);
}

#[test]
fn steam_turbine_expansion() {
    let water = handle("water");
    let inlet = tp(&water, 400.0, 3000.0);
    assert!((inlet.enthalpy() - 3230.9).abs() < 2.0);
    assert!((inlet.entropy() - 6.9235).abs() < 0.005);

    let result = ProcessEngine::new()
        .run(&water, &inlet, &ProcessSpec::isentropic(10.0, 0.85))
        .unwrap();
    let ideal = result.ideal.unwrap();
    assert_eq!(ideal.phase(), Phase::SaturatedMixture);
    let x_s = ideal.quality().unwrap();
    assert!((x_s - 0.836).abs() < 0.005, "x_s = {x_s}");

    let x = result.outlet.quality().unwrap();
    assert!(x > x_s);
    assert!((x - 0.901).abs() < 0.005, "x = {x}");
    assert!(relative_error(-result.work, 0.85 * 1039.0) < 0.01);
    assert!(result.outlet.entropy() > ideal.entropy());

    // The outlet is recoverable from its (h, s) alone.
    let back = resolve(
        &water,
        PropertyPair::EnthalpyEntropy,
        result.outlet.enthalpy(),
        result.outlet.entropy(),
    )
    .unwrap();
    assert_eq!(back.phase(), Phase::SaturatedMixture);
    assert!(relative_error(back.pressure_kpa(), 10.0) < 1e-6);
    assert!((back.quality().unwrap() - x).abs() < 1e-6);
}

#[test]
fn rigid_tank_of_wet_steam() {
    let water = handle("water");
    let inlet = resolve(&water, PropertyPair::PressureQuality, 100.0, 0.5).unwrap();
    let result = ProcessEngine::new()
        .run(
            &water,
            &inlet,
            &ProcessSpec::isochoric(IsochoricTarget::Pressure(200.0)),
        )
        .unwrap();
    assert_eq!(result.outlet.phase(), Phase::SaturatedMixture);
    assert!(result.outlet.quality().unwrap() > inlet.quality().unwrap());
    assert!((result.outlet.temperature_c() - 120.2).abs() < 0.5);
    assert!(relative_error(result.outlet.specific_volume(), inlet.specific_volume()) < 1e-9);
    assert!(result.heat > 0.0);
    assert_eq!(result.work, 0.0);
}

#[test]
fn refrigerant_expansion_valve() {
    let r22 = handle("r-22");
    let inlet = resolve(&r22, PropertyPair::TemperatureQuality, 35.0, 0.0).unwrap();
    let result = ProcessEngine::new()
        .run(&r22, &inlet, &ProcessSpec::throttling(300.0))
        .unwrap();
    assert_eq!(result.outlet.phase(), Phase::SaturatedMixture);
    assert!(result.entropy_generation() > 0.0);
    assert!(result.temperature_change() < 0.0);
    assert_eq!(result.work, 0.0);
    assert_eq!(result.heat, 0.0);
}

#[test]
fn isentropic_efficiency_one_is_reversible() {
    let co2 = handle("co2");
    let inlet = tp(&co2, 40.0, 3000.0);
    let result = ProcessEngine::new()
        .run(&co2, &inlet, &ProcessSpec::isentropic(9000.0, 1.0))
        .unwrap();
    assert!(result.entropy_generation().abs() < ENTROPY_ABS_TOL);
    assert_eq!(result.outlet.phase(), Phase::Supercritical);
}

#[test]
fn invalid_specs_fail_before_evaluation() {
    let air = handle("air");
    let inlet = tp(&air, 25.0, 100.0);
    let engine = ProcessEngine::new();
    for spec in [
        ProcessSpec::isentropic(800.0, 0.0),
        ProcessSpec::isentropic(800.0, 1.1),
        ProcessSpec::polytropic(800.0, 0.0),
        ProcessSpec::throttling(-1.0),
    ] {
        let err = engine.run(&air, &inlet, &spec).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidSpec { .. }), "{spec:?}");
        assert!(err.is_recoverable());
    }
}

fn throttle_entropy(
    fluid: &str,
    t_c: f64,
    p_kpa: f64,
    fraction: f64,
) -> Result<(), TestCaseError> {
    let handle = handle(fluid);
    let inlet = tp(&handle, t_c, p_kpa);
    let result = ProcessEngine::new()
        .run(&handle, &inlet, &ProcessSpec::throttling(p_kpa * fraction))
        .map_err(|e| TestCaseError::fail(format!("{fluid} at ({t_c}, {p_kpa}): {e}")))?;
    prop_assert!(
        result.outlet.entropy() > result.inlet.entropy(),
        "{fluid}: s_in = {}, s_out = {}",
        result.inlet.entropy(),
        result.outlet.entropy()
    );
    prop_assert!((result.outlet.enthalpy() - inlet.enthalpy()).abs() < 1e-3);
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn throttling_air_raises_entropy(
        t in -50.0_f64..1000.0,
        ln_p in 50.0_f64.ln()..15_000_f64.ln(),
        fraction in 0.05_f64..0.95,
    ) {
        throttle_entropy("air", t, ln_p.exp(), fraction)?;
    }

    #[test]
    fn throttling_water_raises_entropy(
        t in 20.0_f64..700.0,
        ln_p in 20.0_f64.ln()..16_000_f64.ln(),
        fraction in 0.05_f64..0.95,
    ) {
        throttle_entropy("water", t, ln_p.exp(), fraction)?;
    }

    #[test]
    fn throttling_r134a_raises_entropy(
        t in -20.0_f64..80.0,
        ln_p in 100.0_f64.ln()..3_000_f64.ln(),
        fraction in 0.1_f64..0.9,
    ) {
        throttle_entropy("r134a", t, ln_p.exp(), fraction)?;
    }

    #[test]
    fn real_compression_generates_entropy(
        t in 0.0_f64..200.0,
        p_in in 100.0_f64..500.0,
        ratio in 1.5_f64..8.0,
        eta in 0.5_f64..0.99,
    ) {
        let air = handle("air");
        let inlet = tp(&air, t, p_in);
        let spec = ProcessSpec::isentropic(p_in * ratio, eta);
        let result = ProcessEngine::new().run(&air, &inlet, &spec).unwrap();
        let ideal = result.ideal.unwrap();
        prop_assert!(result.outlet.entropy() > ideal.entropy());
        prop_assert!(result.work > ideal.enthalpy() - inlet.enthalpy());
    }

    #[test]
    fn real_expansion_generates_entropy(
        t in 150.0_f64..400.0,
        p_in in 400.0_f64..4_000.0,
        ratio in 1.5_f64..8.0,
        eta in 0.5_f64..0.99,
    ) {
        let air = handle("air");
        let inlet = tp(&air, t, p_in);
        let spec = ProcessSpec::isentropic(p_in / ratio, eta);
        let result = ProcessEngine::new().run(&air, &inlet, &spec).unwrap();
        let ideal = result.ideal.unwrap();
        prop_assert!(result.outlet.entropy() > ideal.entropy());
        prop_assert!(result.outlet.temperature_k() > ideal.temperature_k());
        prop_assert!(result.outlet.temperature_k() < to_kelvin(t));
    }
}
