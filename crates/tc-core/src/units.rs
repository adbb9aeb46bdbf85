// tc-core/src/units.rs
//
// The public units contract is fixed: °C, kPa, kJ/kg, kJ/kg·K, m³/kg.
// These helpers bridge that contract to uom quantities for callers that want
// typed values.

use uom::si::f64::{Pressure as UomPressure, ThermodynamicTemperature as UomThermodynamicTemperature};

// Public canonical unit types (SI, f64)
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

/// Molar gas constant [kJ/(kmol·K)].
pub const R_UNIVERSAL: f64 = 8.314_462_618;

/// Standard atmosphere [kPa].
pub const STANDARD_PRESSURE_KPA: f64 = 101.325;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn degc(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::degree_celsius;
    Temperature::new::<degree_celsius>(v)
}

#[inline]
pub fn to_kelvin(t_c: f64) -> f64 {
    t_c + KELVIN_OFFSET
}

#[inline]
pub fn to_celsius(t_k: f64) -> f64 {
    t_k - KELVIN_OFFSET
}

/// Read a uom pressure back in the contract unit.
#[inline]
pub fn in_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

/// Read a uom temperature back in the contract unit.
#[inline]
pub fn in_degc(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::degree_celsius;
    t.get::<degree_celsius>()
}
