//! tc-process: thermodynamic processes applied to resolved fluid states.
//!
//! Supported laws:
//! - Isentropic compression/expansion with an isentropic efficiency
//! - Isobaric heating/cooling to a target temperature or enthalpy
//! - Isochoric heating/cooling to a target temperature or pressure
//! - Throttling (isenthalpic, entropy must rise)
//! - Polytropic P·vⁿ = const
//!
//! Each run yields a [`ProcessResult`] with inlet, outlet, the isentropic
//! reference where one exists, and specific work and heat.
//!
//! # Example
//!
//! ```no_run
//! use tc_fluids::{PropertyPair, resolve, resolve_fluid};
//! use tc_process::{ProcessEngine, ProcessSpec};
//!
//! let air = resolve_fluid("air").unwrap();
//! let inlet = resolve(&air, PropertyPair::TemperaturePressure, 25.0, 100.0).unwrap();
//! let result = ProcessEngine::new()
//!     .run(&air, &inlet, &ProcessSpec::isentropic(800.0, 0.85))
//!     .unwrap();
//! println!("{}", result.summary());
//! ```

pub mod engine;
pub mod error;
mod isentropic;
mod isobaric;
mod isochoric;
pub mod polytropic;
pub mod process_spec;
pub mod result;
mod throttling;

/// Absolute entropy tolerance [kJ/(kg·K)] for the isentropic and throttling checks.
pub const ENTROPY_ABS_TOL: f64 = 1e-6;

// Re-exports
pub use engine::ProcessEngine;
pub use error::{EngineResult, ProcessError};
pub use polytropic::{ISOTHERMAL_EXPONENT_TOL, outlet_volume, polytropic_work};
pub use process_spec::{Direction, IsobaricTarget, IsochoricTarget, ProcessKind, ProcessSpec};
pub use result::ProcessResult;
