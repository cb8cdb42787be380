//! # emis_core - Particulate Emission Calculation Engine
//!
//! `emis_core` computes regulatory solid-particulate emission estimates
//! for industrial fuel combustion, per formulas (2.1)-(2.3) of the
//! governing methodology. All inputs and outputs are JSON-serializable
//! value objects.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: one pure function takes the input and returns the result
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Self-Explaining**: every result carries its derivation text
//!
//! ## Quick Start
//!
//! ```rust
//! use emis_core::calculator::{calculate, InputData};
//! use emis_core::fuel::FuelType;
//! use emis_core::technology::{
//!     CombustionTechnology, DesulfurizationTechnology, DustCollection, DustFilterType,
//! };
//!
//! let input = InputData {
//!     combustion_technology: CombustionTechnology::DryAshRemoval,
//!     desulfurization_technology: DesulfurizationTechnology::None,
//!     fuel_type: FuelType::Coal,
//!     fuel_consumption: 150_000.0,
//!     ash_content: 25.0,
//!     lower_heating_value: 24.0,
//!     combustibles_in_ash: 5.0,
//!     sulfur_content: 2.5,
//!     ash_carryover_override: None,
//!     dust_collection: DustCollection::Filter(DustFilterType::Electrostatic),
//!     mechanical_incomplete_combustion: 0.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! println!("kтв = {} g/GJ", result.emission_factor);
//! println!("E = {} t", result.total_emission);
//! ```
//!
//! ## Modules
//!
//! - [`calculator`] - the emission calculation and its value objects
//! - [`fuel`] - fuel types and reference characteristics
//! - [`technology`] - combustion/cleaning technology enumerations and tables
//! - [`pdf`] - PDF report rendering
//! - [`errors`] - structured error types

pub mod calculator;
pub mod errors;
pub mod fuel;
pub mod pdf;
pub mod technology;

// Re-export commonly used types at crate root for convenience
pub use calculator::{calculate, CalculationResult, InputData};
pub use errors::{CalcError, CalcResult};
pub use fuel::{FuelCharacteristics, FuelType};
pub use technology::{
    CombustionTechnology, DesulfurizationTechnology, DustCollection, DustFilterType,
};
