//! tc-core: stable foundation for thermocalc.
//!
//! Contains:
//! - units (uom SI types + constructors in the calculator's unit contract)
//! - numeric (Real + tolerances + float helpers + bounded root bracketing)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{CoreError, CoreResult};
pub use numeric::*;
pub use units::*;
