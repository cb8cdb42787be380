//! # Combustion and Gas-Cleaning Technologies
//!
//! Closed enumerations for the furnace/boiler design, the flue-gas
//! desulfurization method, and the dust collection equipment, each with
//! the per-variant data the methodology assigns:
//!
//! - [`CombustionTechnology`] carries the table-2.1 ash carryover
//!   fraction aвин per fuel.
//! - [`DustFilterType`] carries the typical collection efficiency ηзу.
//! - [`DesulfurizationTechnology`] is descriptive only; no surviving
//!   revision of the methodology feeds it into a formula.

use serde::{Deserialize, Serialize};

use crate::fuel::FuelType;

/// Furnace/boiler design, as classified by table 2.1 of the methodology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CombustionTechnology {
    /// Pulverized firing, dry (solid) ash removal
    DryAshRemoval,
    /// Pulverized firing, open furnace with liquid ash removal
    LiquidAshOpen,
    /// Pulverized firing, semi-open furnace with liquid ash removal
    LiquidAshSemiOpen,
    /// Two-chamber furnace, vertical pre-chamber
    TwoChamberVertical,
    /// Two-chamber furnace, horizontal cyclone pre-chamber
    TwoChamberHorizontal,
    /// Circulating fluidized bed
    CirculatingFluidized,
    /// Bubbling (stationary) fluidized bed
    BubblingFluidized,
    /// Fixed bed (grate firing)
    FixedBed,
}

impl CombustionTechnology {
    /// All combustion technologies for UI selection
    pub const ALL: [CombustionTechnology; 8] = [
        CombustionTechnology::DryAshRemoval,
        CombustionTechnology::LiquidAshOpen,
        CombustionTechnology::LiquidAshSemiOpen,
        CombustionTechnology::TwoChamberVertical,
        CombustionTechnology::TwoChamberHorizontal,
        CombustionTechnology::CirculatingFluidized,
        CombustionTechnology::BubblingFluidized,
        CombustionTechnology::FixedBed,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            CombustionTechnology::DryAshRemoval => "Pulverized firing, dry ash removal",
            CombustionTechnology::LiquidAshOpen => {
                "Pulverized firing, open furnace, liquid ash removal"
            }
            CombustionTechnology::LiquidAshSemiOpen => {
                "Pulverized firing, semi-open furnace, liquid ash removal"
            }
            CombustionTechnology::TwoChamberVertical => "Two-chamber furnace, vertical pre-chamber",
            CombustionTechnology::TwoChamberHorizontal => {
                "Two-chamber furnace, horizontal cyclone pre-chamber"
            }
            CombustionTechnology::CirculatingFluidized => "Circulating fluidized bed",
            CombustionTechnology::BubblingFluidized => "Bubbling fluidized bed",
            CombustionTechnology::FixedBed => "Fixed bed (grate firing)",
        }
    }

    /// Ash carryover fraction aвин per table 2.1 of the methodology.
    ///
    /// Returns `None` where the table has no entry (natural gas); the
    /// calculator defaults missing entries to 1.0.
    pub fn ash_carryover(&self, fuel: FuelType) -> Option<f64> {
        match fuel {
            FuelType::Coal => Some(match self {
                CombustionTechnology::DryAshRemoval => 0.95,
                CombustionTechnology::LiquidAshOpen => 0.80,
                CombustionTechnology::LiquidAshSemiOpen => 0.70,
                CombustionTechnology::TwoChamberVertical => 0.55,
                CombustionTechnology::TwoChamberHorizontal => 0.30,
                CombustionTechnology::CirculatingFluidized => 0.50,
                CombustionTechnology::BubblingFluidized => 0.20,
                CombustionTechnology::FixedBed => 0.15,
            }),
            // The fuel-oil column of table 2.1 is 1.00 for every design
            FuelType::FuelOil => Some(1.00),
            FuelType::Gas => None,
        }
    }
}

impl std::fmt::Display for CombustionTechnology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Flue-gas desulfurization method.
///
/// Carried on the input and echoed in reports for documentation; the
/// particulate formulas do not use it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DesulfurizationTechnology {
    /// No desulfurization
    #[default]
    None,
    /// Wet limestone scrubbing
    WetLimestone,
    /// Wet lime scrubbing
    WetLime,
    /// Magnesium oxide scrubbing
    MagnesiumOxide,
    /// Dual-alkali process
    DualAlkali,
    /// Seawater scrubbing
    Seawater,
    /// Spray-dry absorber
    SprayDryAbsorber,
    /// Dry sorbent injection
    DrySorbentInjection,
    /// Circulating fluidized bed absorber
    CirculatingFluidBedAbsorber,
    /// Ammonia scrubbing
    AmmoniaScrubbing,
}

impl DesulfurizationTechnology {
    /// All desulfurization technologies for UI selection
    pub const ALL: [DesulfurizationTechnology; 10] = [
        DesulfurizationTechnology::None,
        DesulfurizationTechnology::WetLimestone,
        DesulfurizationTechnology::WetLime,
        DesulfurizationTechnology::MagnesiumOxide,
        DesulfurizationTechnology::DualAlkali,
        DesulfurizationTechnology::Seawater,
        DesulfurizationTechnology::SprayDryAbsorber,
        DesulfurizationTechnology::DrySorbentInjection,
        DesulfurizationTechnology::CirculatingFluidBedAbsorber,
        DesulfurizationTechnology::AmmoniaScrubbing,
    ];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DesulfurizationTechnology::None => "None",
            DesulfurizationTechnology::WetLimestone => "Wet limestone scrubbing",
            DesulfurizationTechnology::WetLime => "Wet lime scrubbing",
            DesulfurizationTechnology::MagnesiumOxide => "Magnesium oxide scrubbing",
            DesulfurizationTechnology::DualAlkali => "Dual-alkali process",
            DesulfurizationTechnology::Seawater => "Seawater scrubbing",
            DesulfurizationTechnology::SprayDryAbsorber => "Spray-dry absorber",
            DesulfurizationTechnology::DrySorbentInjection => "Dry sorbent injection",
            DesulfurizationTechnology::CirculatingFluidBedAbsorber => {
                "Circulating fluidized bed absorber"
            }
            DesulfurizationTechnology::AmmoniaScrubbing => "Ammonia scrubbing",
        }
    }
}

impl std::fmt::Display for DesulfurizationTechnology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Dust collection equipment with its typical collection efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DustFilterType {
    /// No cleaning: ηзу = 0
    #[default]
    None,
    /// Electrostatic precipitator: ηзу = 0.985
    Electrostatic,
    /// Bag filter: ηзу = 0.995
    BagFilter,
    /// Cyclone: ηзу = 0.85
    Cyclone,
    /// Multicyclone battery: ηзу = 0.92
    Multicyclone,
    /// Wet scrubber: ηзу = 0.96
    WetScrubber,
}

impl DustFilterType {
    /// All filter types for UI selection
    pub const ALL: [DustFilterType; 6] = [
        DustFilterType::None,
        DustFilterType::Electrostatic,
        DustFilterType::BagFilter,
        DustFilterType::Cyclone,
        DustFilterType::Multicyclone,
        DustFilterType::WetScrubber,
    ];

    /// Typical collection efficiency ηзу for this equipment
    pub fn typical_efficiency(&self) -> f64 {
        match self {
            DustFilterType::None => 0.0,
            DustFilterType::Electrostatic => 0.985,
            DustFilterType::BagFilter => 0.995,
            DustFilterType::Cyclone => 0.85,
            DustFilterType::Multicyclone => 0.92,
            DustFilterType::WetScrubber => 0.96,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            DustFilterType::None => "No filter",
            DustFilterType::Electrostatic => "Electrostatic precipitator",
            DustFilterType::BagFilter => "Bag filter",
            DustFilterType::Cyclone => "Cyclone",
            DustFilterType::Multicyclone => "Multicyclone",
            DustFilterType::WetScrubber => "Wet scrubber",
        }
    }
}

impl std::fmt::Display for DustFilterType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How the dust-collection efficiency ηзу is obtained.
///
/// The upstream methodology is ambiguous about whether a user-entered
/// efficiency may override the filter-type table, so the two sources are
/// separate modes and the caller picks one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value")]
pub enum DustCollection {
    /// Use the typical efficiency of the installed equipment
    Filter(DustFilterType),
    /// Use a measured/contracted efficiency in [0, 1]
    Measured(f64),
}

impl DustCollection {
    /// Resolve the efficiency ηзу for the calculation
    pub fn efficiency(&self) -> f64 {
        match self {
            DustCollection::Filter(filter) => filter.typical_efficiency(),
            DustCollection::Measured(eta) => *eta,
        }
    }

    /// Human-readable description of the efficiency source
    pub fn describe(&self) -> String {
        match self {
            DustCollection::Filter(filter) => filter.display_name().to_string(),
            DustCollection::Measured(eta) => format!("Measured efficiency ({:.3})", eta),
        }
    }
}

impl Default for DustCollection {
    fn default() -> Self {
        DustCollection::Filter(DustFilterType::None)
    }
}
