//! The closed set of working fluids.

use crate::catalog;
use crate::error::FluidError;
use std::fmt;

/// Working fluids supported by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FluidKind {
    /// Water and steam (H₂O)
    Water,
    /// Dry air (ideal gas)
    Air,
    /// Refrigerant R-134a (1,1,1,2-tetrafluoroethane)
    R134a,
    /// Refrigerant R-22 (chlorodifluoromethane)
    R22,
    /// Carbon dioxide (CO₂, R-744)
    CO2,
}

impl FluidKind {
    pub const COUNT: usize = 5;

    pub const ALL: [FluidKind; Self::COUNT] = [
        FluidKind::Water,
        FluidKind::Air,
        FluidKind::R134a,
        FluidKind::R22,
        FluidKind::CO2,
    ];

    /// Stable slot index, used by the registry cache.
    pub fn index(&self) -> usize {
        match self {
            FluidKind::Water => 0,
            FluidKind::Air => 1,
            FluidKind::R134a => 2,
            FluidKind::R22 => 3,
            FluidKind::CO2 => 4,
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            FluidKind::Water => "water",
            FluidKind::Air => "air",
            FluidKind::R134a => "r134a",
            FluidKind::R22 => "r22",
            FluidKind::CO2 => "co2",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FluidKind::Water => "Water",
            FluidKind::Air => "Air",
            FluidKind::R134a => "R-134a",
            FluidKind::R22 => "R-22",
            FluidKind::CO2 => "CO2",
        }
    }

    /// Molar mass [kg/kmol].
    pub fn molar_mass(&self) -> f64 {
        match self {
            FluidKind::Water => 18.015_268,
            FluidKind::Air => 28.97,
            FluidKind::R134a => 102.03,
            FluidKind::R22 => 86.468,
            FluidKind::CO2 => 44.0098,
        }
    }

    /// Whether the fluid has a liquid-vapour saturation curve.
    pub fn has_phase_change(&self) -> bool {
        !matches!(self, FluidKind::Air)
    }
}

impl fmt::Display for FluidKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for FluidKind {
    type Err = FluidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        catalog::lookup(s).ok_or_else(|| FluidError::FluidNotFound {
            name: s.trim().to_string(),
        })
    }
}
