//! tc-fluids: fluid property calculations for thermocalc.
//!
//! Provides:
//! - The closed set of working fluids ([`FluidKind`]) and a case-insensitive catalog
//! - Per-fluid property tables: IAPWS-IF97 water, ideal-gas air, Peng–Robinson refrigerants
//! - A [`FluidRegistry`] that loads each table at most once and hands out shared handles
//! - The state resolver: two independent properties to a full [`ThermodynamicState`]
//! - Saturation queries and parallel property sweeps
//!
//! All public values use one fixed unit contract: temperature °C, pressure kPa,
//! enthalpy kJ/kg, entropy kJ/(kg·K), specific volume m³/kg, quality in [0, 1].
//!
//! # Example
//!
//! ```no_run
//! use tc_fluids::{PropertyPair, resolve, resolve_fluid};
//!
//! let water = resolve_fluid("water").unwrap();
//! let state = resolve(&water, PropertyPair::TemperaturePressure, 25.0, 101.325).unwrap();
//! println!("h = {:.2} kJ/kg ({})", state.enthalpy(), state.phase());
//! ```

pub mod catalog;
pub mod cubic;
pub mod error;
pub mod ideal_gas;
pub mod kind;
pub mod model;
pub mod range;
pub mod registry;
pub mod resolver;
pub mod saturation;
pub mod state;
pub mod sweeps;
pub mod table;
pub mod water;

/// Relative tolerance for a resolved state against the correlation it came from.
pub const CONSISTENCY_REL_TOL: f64 = 1e-3;

/// Relative tolerance for re-deriving an input pair from a resolved state.
pub const ROUND_TRIP_REL_TOL: f64 = 5e-3;

// Re-exports for ergonomics
pub use catalog::{FluidCatalogEntry, catalog, filter_catalog};
pub use error::{FluidError, FluidResult};
pub use kind::FluidKind;
pub use model::{Branch, FluidModel, SaturationLimits};
pub use range::ValidRange;
pub use registry::{FluidHandle, FluidRegistry, resolve_fluid, valid_range};
pub use resolver::{
    PropertyPair, resolve, resolve_with, saturation_at_pressure, saturation_at_temperature,
};
pub use saturation::{SaturationCurve, SaturationPoint};
pub use state::{Phase, PhaseProps, ThermodynamicState};
pub use sweeps::{
    SweepDefinition, SweepResult, SweepType, isobar_sweep, isotherm_sweep, saturation_dome,
};
pub use table::PropertyTable;
