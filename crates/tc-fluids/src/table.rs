//! Per-fluid property tables behind one closed enum.
//!
//! The fluid set is fixed, so dispatch is an explicit `match` over the variant
//! rather than a trait object.

use crate::cubic::{self, CubicTable};
use crate::error::FluidResult;
use crate::ideal_gas::{self, IdealGasTable};
use crate::kind::FluidKind;
use crate::model::{Branch, FluidModel, SaturationLimits};
use crate::range::ValidRange;
use crate::state::PhaseProps;
use crate::water::SteamTable;
use tc_core::numeric::SolveConfig;

/// Loaded, read-only property source of one fluid.
#[derive(Debug, Clone)]
pub enum PropertyTable {
    Water(SteamTable),
    Air(IdealGasTable),
    R134a(CubicTable),
    R22(CubicTable),
    CO2(CubicTable),
}

impl PropertyTable {
    /// Build the table for `kind`. This is the expensive step the registry
    /// runs at most once per fluid.
    pub fn load(kind: FluidKind) -> FluidResult<Self> {
        let config = SolveConfig::default();
        Ok(match kind {
            FluidKind::Water => PropertyTable::Water(SteamTable::load()?),
            FluidKind::Air => PropertyTable::Air(IdealGasTable::load(ideal_gas::AIR)?),
            FluidKind::R134a => PropertyTable::R134a(CubicTable::load(cubic::R134A, config)?),
            FluidKind::R22 => PropertyTable::R22(CubicTable::load(cubic::R22, config)?),
            FluidKind::CO2 => PropertyTable::CO2(CubicTable::load(cubic::CO2, config)?),
        })
    }
}

impl FluidModel for PropertyTable {
    fn kind(&self) -> FluidKind {
        match self {
            PropertyTable::Water(t) => t.kind(),
            PropertyTable::Air(t) => t.kind(),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => t.kind(),
        }
    }

    fn name(&self) -> &str {
        match self {
            PropertyTable::Water(t) => t.name(),
            PropertyTable::Air(t) => t.name(),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => t.name(),
        }
    }

    fn valid_range(&self) -> ValidRange {
        match self {
            PropertyTable::Water(t) => t.valid_range(),
            PropertyTable::Air(t) => t.valid_range(),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => {
                t.valid_range()
            }
        }
    }

    fn saturation_limits(&self) -> Option<SaturationLimits> {
        match self {
            PropertyTable::Water(t) => t.saturation_limits(),
            PropertyTable::Air(t) => t.saturation_limits(),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => {
                t.saturation_limits()
            }
        }
    }

    fn point(&self, t_k: f64, p_kpa: f64, branch: Branch) -> FluidResult<PhaseProps> {
        match self {
            PropertyTable::Water(t) => t.point(t_k, p_kpa, branch),
            PropertyTable::Air(t) => t.point(t_k, p_kpa, branch),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => {
                t.point(t_k, p_kpa, branch)
            }
        }
    }

    fn saturation_pressure(&self, t_k: f64) -> FluidResult<f64> {
        match self {
            PropertyTable::Water(t) => t.saturation_pressure(t_k),
            PropertyTable::Air(t) => t.saturation_pressure(t_k),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => {
                t.saturation_pressure(t_k)
            }
        }
    }

    fn saturation_temperature(&self, p_kpa: f64) -> FluidResult<f64> {
        match self {
            PropertyTable::Water(t) => t.saturation_temperature(p_kpa),
            PropertyTable::Air(t) => t.saturation_temperature(p_kpa),
            PropertyTable::R134a(t) | PropertyTable::R22(t) | PropertyTable::CO2(t) => {
                t.saturation_temperature(p_kpa)
            }
        }
    }
}
