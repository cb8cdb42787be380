//! # Fuel Types and Reference Characteristics
//!
//! Fuel classification for the emission methodology, plus reference fuel
//! characteristics from appendix A of the methodology (tables A.1, A.3,
//! A.4). The reference values are a convenience for front ends that want
//! to prefill the fuel parameter fields; the calculator itself only reads
//! what the caller puts into [`crate::calculator::InputData`].

use serde::{Deserialize, Serialize};

/// Fuel burned in the furnace/boiler.
///
/// Consumption and heating-value units differ by fuel: solid and liquid
/// fuels are metered in tonnes with Qr in MJ/kg, natural gas in thousands
/// of cubic meters with Qr in MJ/m³.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FuelType {
    /// Hard coal
    Coal,
    /// Heavy fuel oil (mazut)
    FuelOil,
    /// Natural gas
    Gas,
}

impl FuelType {
    /// All fuel types for UI selection
    pub const ALL: [FuelType; 3] = [FuelType::Coal, FuelType::FuelOil, FuelType::Gas];

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            FuelType::Coal => "Coal",
            FuelType::FuelOil => "Fuel oil",
            FuelType::Gas => "Natural gas",
        }
    }

    /// Unit the fuel consumption rate B is metered in
    pub fn consumption_unit(&self) -> &'static str {
        match self {
            FuelType::Coal | FuelType::FuelOil => "t",
            FuelType::Gas => "thousand m³",
        }
    }

    /// Unit of the lower heating value Qr
    pub fn heating_value_unit(&self) -> &'static str {
        match self {
            FuelType::Coal | FuelType::FuelOil => "MJ/kg",
            FuelType::Gas => "MJ/m³",
        }
    }

    /// Reference characteristics from appendix A of the methodology
    pub fn reference_characteristics(&self) -> FuelCharacteristics {
        match self {
            // Table A.1: Donetsk gas coal, as-received basis
            FuelType::Coal => FuelCharacteristics {
                ash_content: 25.20,
                lower_heating_value: 20.47,
                sulfur_content: 2.85,
                combustibles_in_ash: 1.5,
            },
            // Table A.3: high-sulfur grade 40 fuel oil
            FuelType::FuelOil => FuelCharacteristics {
                ash_content: 0.15,
                lower_heating_value: 39.48,
                sulfur_content: 2.50,
                combustibles_in_ash: 0.0,
            },
            // Table A.4: Urengoy-Uzhhorod natural gas
            FuelType::Gas => FuelCharacteristics {
                ash_content: 0.0,
                lower_heating_value: 33.08,
                sulfur_content: 0.0,
                combustibles_in_ash: 0.0,
            },
        }
    }
}

impl std::fmt::Display for FuelType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Reference fuel characteristics for one fuel.
///
/// Intended for prefilling input fields; all values can be overridden by
/// the caller with lab data for the actual fuel batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelCharacteristics {
    /// Ar - ash content by mass, %
    pub ash_content: f64,
    /// Qr - lower heating value, MJ/kg (MJ/m³ for gas)
    pub lower_heating_value: f64,
    /// Sr - sulfur content by mass, %
    pub sulfur_content: f64,
    /// Гвин - combustibles in the emitted ash, %
    pub combustibles_in_ash: f64,
}
