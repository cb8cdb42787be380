//! # Particulate Emission Calculator
//!
//! Gross solid-particulate emission for industrial fuel combustion, per
//! formulas (2.1)-(2.3) of the regulatory methodology:
//!
//! ```text
//! kтв(before) = (10⁶ / Qr) × aвин × (Ar / (100 − Гвин)) × (1 − q4 / QC)   (2.3)
//! kтв         = kтв(before) × (1 − ηзу)                                   (2.2)
//! E           = 10⁻⁶ × kтв × B × Qr                                       (2.1)
//! ```
//!
//! `calculate` is a pure function over immutable value objects: no state,
//! no I/O, deterministic. Degenerate inputs (non-positive heating value,
//! combustibles-in-ash at or above 100 %, negative consumption) are
//! rejected as [`CalcError::InvalidInput`] before the formulas run.
//!
//! ## Example
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
//!     dust_collection: DustCollection::Filter(DustFilterType::None),
//!     mechanical_incomplete_combustion: 0.0,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!((result.emission_factor_before - 10416.67).abs() < 0.01);
//! assert!((result.total_emission - 37500.0).abs() < 0.01);
//! ```

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::fuel::FuelType;
use crate::technology::{CombustionTechnology, DesulfurizationTechnology, DustCollection};

/// Heat of combustion of carbon to CO2, MJ/kg. Fixed constant of
/// formula (2.3).
const QC_MJ_PER_KG: f64 = 32.68;

/// Input parameters for one emission calculation.
///
/// An immutable value object built by the caller (UI, CLI) and handed to
/// [`calculate`]. Percentages are 0-100, fractions are 0-1.
///
/// ## JSON Example
///
/// ```json
/// {
///   "combustion_technology": "DryAshRemoval",
///   "desulfurization_technology": "None",
///   "fuel_type": "Coal",
///   "fuel_consumption": 150000.0,
///   "ash_content": 25.0,
///   "lower_heating_value": 24.0,
///   "combustibles_in_ash": 5.0,
///   "sulfur_content": 2.5,
///   "ash_carryover_override": null,
///   "dust_collection": { "mode": "Filter", "value": "Electrostatic" },
///   "mechanical_incomplete_combustion": 0.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputData {
    /// Furnace/boiler design (selects the table-2.1 ash carryover row)
    pub combustion_technology: CombustionTechnology,

    /// Flue-gas desulfurization method, descriptive only
    pub desulfurization_technology: DesulfurizationTechnology,

    /// Fuel burned
    pub fuel_type: FuelType,

    /// B - fuel consumption over the reporting period, in the fuel's
    /// native unit (tonnes, or thousand m³ for gas)
    pub fuel_consumption: f64,

    /// Ar - ash content by mass, %
    pub ash_content: f64,

    /// Qr - lower heating value, MJ/kg (MJ/m³ for gas)
    pub lower_heating_value: f64,

    /// Гвин - combustibles in the emitted ash, %. Must be below 100.
    pub combustibles_in_ash: f64,

    /// Sr - sulfur content by mass, %, descriptive only
    pub sulfur_content: f64,

    /// aвин - explicit ash carryover fraction in [0, 1]; `None` means
    /// use the table-2.1 value for the combustion technology
    pub ash_carryover_override: Option<f64>,

    /// ηзу source: installed equipment or a measured value
    pub dust_collection: DustCollection,

    /// q4 - mechanical incomplete combustion loss, %
    pub mechanical_incomplete_combustion: f64,
}

impl InputData {
    /// Validate input parameters.
    ///
    /// Rejects the degenerate inputs that would otherwise propagate
    /// NaN/infinity through the formulas.
    pub fn validate(&self) -> CalcResult<()> {
        if self.lower_heating_value <= 0.0 {
            return Err(CalcError::invalid_input(
                "lower_heating_value",
                self.lower_heating_value.to_string(),
                "Lower heating value must be positive",
            ));
        }
        if self.combustibles_in_ash >= 100.0 {
            return Err(CalcError::invalid_input(
                "combustibles_in_ash",
                self.combustibles_in_ash.to_string(),
                "Combustibles in ash must be below 100 %",
            ));
        }
        if self.fuel_consumption < 0.0 {
            return Err(CalcError::invalid_input(
                "fuel_consumption",
                self.fuel_consumption.to_string(),
                "Fuel consumption cannot be negative",
            ));
        }
        if let Some(a) = self.ash_carryover_override {
            if !(0.0..=1.0).contains(&a) {
                return Err(CalcError::invalid_input(
                    "ash_carryover_override",
                    a.to_string(),
                    "Ash carryover fraction must be within [0, 1]",
                ));
            }
        }
        if let DustCollection::Measured(eta) = self.dust_collection {
            if !(0.0..=1.0).contains(&eta) {
                return Err(CalcError::invalid_input(
                    "dust_collection",
                    eta.to_string(),
                    "Measured collection efficiency must be within [0, 1]",
                ));
            }
        }
        Ok(())
    }

    /// Resolve the ash carryover fraction aвин: explicit override if
    /// present, else the table-2.1 value, else 1.0.
    pub fn resolve_ash_carryover(&self) -> f64 {
        self.ash_carryover_override.unwrap_or_else(|| {
            self.combustion_technology
                .ash_carryover(self.fuel_type)
                .unwrap_or(1.0)
        })
    }
}

/// Results of one emission calculation.
///
/// An immutable value object; consumers (results screen, PDF report)
/// only read fields and never recompute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// Echo of the request
    pub input: InputData,

    /// aвин actually used (0 for natural gas)
    pub ash_carryover: f64,

    /// ηзу actually used (0 for natural gas)
    pub dust_removal_efficiency: f64,

    /// kтв before cleaning, g/GJ, rounded to 2 decimals
    pub emission_factor_before: f64,

    /// kтв after cleaning, g/GJ, rounded to 2 decimals
    pub emission_factor: f64,

    /// E - gross emission over the reporting period, tonnes, rounded to
    /// 2 decimals
    pub total_emission: f64,

    /// Derivation of formulas (2.3) and (2.2), for display/export
    pub emission_factor_derivation: String,

    /// Derivation of formula (2.1), for display/export
    pub total_emission_derivation: String,
}

/// Round to 2 decimal places, the precision the report carries.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Calculate the gross solid-particulate emission.
///
/// # Arguments
///
/// * `input` - furnace, fuel and gas-cleaning parameters
///
/// # Returns
///
/// * `Ok(CalculationResult)` - intermediate and final figures plus the
///   derivation text
/// * `Err(CalcError)` - structured error for degenerate input
pub fn calculate(input: &InputData) -> CalcResult<CalculationResult> {
    input.validate()?;

    // Natural gas is not assessed for particulates under this methodology
    if input.fuel_type == FuelType::Gas {
        return Ok(CalculationResult {
            input: input.clone(),
            ash_carryover: 0.0,
            dust_removal_efficiency: 0.0,
            emission_factor_before: 0.0,
            emission_factor: 0.0,
            total_emission: 0.0,
            emission_factor_derivation:
                "For natural gas: kтв = 0 g/GJ (no solid particulates are formed)".to_string(),
            total_emission_derivation:
                "For natural gas: Eтв = 0 t (no solid particulates are formed)".to_string(),
        });
    }

    let ash_carryover = input.resolve_ash_carryover();
    let eta = input.dust_collection.efficiency();

    // Formula (2.3)
    let k_before = (1_000_000.0 / input.lower_heating_value)
        * ash_carryover
        * (input.ash_content / (100.0 - input.combustibles_in_ash))
        * (1.0 - input.mechanical_incomplete_combustion / QC_MJ_PER_KG);

    // Formula (2.2)
    let k_after = k_before * (1.0 - eta);

    // Formula (2.1)
    let total_emission = 1e-6 * k_after * input.fuel_consumption * input.lower_heating_value;

    let emission_factor_derivation =
        build_emission_factor_derivation(input, ash_carryover, eta, k_before, k_after);
    let total_emission_derivation = build_total_emission_derivation(input, k_after, total_emission);

    Ok(CalculationResult {
        input: input.clone(),
        ash_carryover,
        dust_removal_efficiency: eta,
        emission_factor_before: round2(k_before),
        emission_factor: round2(k_after),
        total_emission: round2(total_emission),
        emission_factor_derivation,
        total_emission_derivation,
    })
}

/// Derivation text for formulas (2.3) and (2.2): inputs, substitution,
/// pre- and post-cleaning emission factors.
fn build_emission_factor_derivation(
    input: &InputData,
    ash_carryover: f64,
    eta: f64,
    k_before: f64,
    k_after: f64,
) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Formula (2.3): emission factor before cleaning");
    let _ = writeln!(s);
    let _ = writeln!(
        s,
        "kтв(before) = (10⁶ / Qr) × aвин × (Ar / (100 − Гвин)) × (1 − q4 / QC)"
    );
    let _ = writeln!(s, "where QC = {QC_MJ_PER_KG} MJ/kg");
    let _ = writeln!(s);
    let _ = writeln!(s, "Inputs:");
    let _ = writeln!(
        s,
        "  Qr = {:.2} {}",
        input.lower_heating_value,
        input.fuel_type.heating_value_unit()
    );
    let _ = writeln!(s, "  Ar = {:.2} %", input.ash_content);
    let _ = writeln!(s, "  aвин = {:.2} (ash carryover fraction)", ash_carryover);
    let _ = writeln!(s, "  Гвин = {:.2} %", input.combustibles_in_ash);
    let _ = writeln!(
        s,
        "  q4 = {:.2} % (mechanical incomplete combustion loss)",
        input.mechanical_incomplete_combustion
    );
    let _ = writeln!(
        s,
        "  Dust collection: {}",
        input.dust_collection.describe()
    );
    let _ = writeln!(s, "  ηзу = {:.3} (collection efficiency)", eta);
    let _ = writeln!(s);
    let _ = writeln!(s, "Substitution:");
    let _ = writeln!(
        s,
        "  kтв(before) = (10⁶ / {:.2}) × {:.2} × ({:.2} / (100 − {:.2})) × (1 − {:.2} / {})",
        input.lower_heating_value,
        ash_carryover,
        input.ash_content,
        input.combustibles_in_ash,
        input.mechanical_incomplete_combustion,
        QC_MJ_PER_KG
    );
    let _ = writeln!(s, "  kтв(before cleaning) = {:.2} g/GJ", k_before);
    let _ = writeln!(s);
    let _ = writeln!(s, "Formula (2.2): emission factor after cleaning");
    let _ = writeln!(s, "  kтв = kтв(before) × (1 − ηзу)");
    let _ = writeln!(s, "  kтв = {:.2} × (1 − {:.3})", k_before, eta);
    let _ = writeln!(s, "  kтв(after cleaning) = {:.2} g/GJ", k_after);
    s
}

/// Derivation text for formula (2.1): the gross emission.
fn build_total_emission_derivation(input: &InputData, k_after: f64, total_emission: f64) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "Formula (2.1): gross emission");
    let _ = writeln!(s);
    let _ = writeln!(s, "E = 10⁻⁶ × kтв × B × Qr");
    let _ = writeln!(s);
    let _ = writeln!(s, "Inputs:");
    let _ = writeln!(s, "  kтв = {:.2} g/GJ", k_after);
    let _ = writeln!(
        s,
        "  B = {:.2} {}",
        input.fuel_consumption,
        input.fuel_type.consumption_unit()
    );
    let _ = writeln!(
        s,
        "  Qr = {:.2} {}",
        input.lower_heating_value,
        input.fuel_type.heating_value_unit()
    );
    let _ = writeln!(s);
    let _ = writeln!(s, "Substitution:");
    let _ = writeln!(
        s,
        "  E = 10⁻⁶ × {:.2} × {:.2} × {:.2}",
        k_after, input.fuel_consumption, input.lower_heating_value
    );
    let _ = writeln!(s, "  E = {:.2} t", total_emission);
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::technology::DustFilterType;

    /// Control example: dry ash removal, coal, no cleaning
    fn control_input() -> InputData {
        InputData {
            combustion_technology: CombustionTechnology::DryAshRemoval,
            desulfurization_technology: DesulfurizationTechnology::None,
            fuel_type: FuelType::Coal,
            fuel_consumption: 150_000.0,
            ash_content: 25.0,
            lower_heating_value: 24.0,
            combustibles_in_ash: 5.0,
            sulfur_content: 2.5,
            ash_carryover_override: None,
            dust_collection: DustCollection::Filter(DustFilterType::None),
            mechanical_incomplete_combustion: 0.0,
        }
    }

    #[test]
    fn test_control_example() {
        let result = calculate(&control_input()).unwrap();

        // aвин from table 2.1 for (dry ash removal, coal)
        assert_eq!(result.ash_carryover, 0.95);
        assert_eq!(result.dust_removal_efficiency, 0.0);

        // kтв(before) = (10⁶/24) × 0.95 × (25/95) × 1 = 10416.67 g/GJ
        assert!((result.emission_factor_before - 10416.67).abs() < 0.01);
        // No cleaning: kтв = kтв(before)
        assert_eq!(result.emission_factor, result.emission_factor_before);
        // E = 10⁻⁶ × 10416.67 × 150000 × 24 = 37500 t
        assert!((result.total_emission - 37_500.0).abs() < 0.01);
    }

    #[test]
    fn test_gas_short_circuit() {
        let input = InputData {
            fuel_type: FuelType::Gas,
            // Junk particulate parameters must not leak into the result
            ash_content: 99.0,
            combustibles_in_ash: 50.0,
            dust_collection: DustCollection::Filter(DustFilterType::Electrostatic),
            ..control_input()
        };
        let result = calculate(&input).unwrap();

        assert_eq!(result.ash_carryover, 0.0);
        assert_eq!(result.dust_removal_efficiency, 0.0);
        assert_eq!(result.emission_factor_before, 0.0);
        assert_eq!(result.emission_factor, 0.0);
        assert_eq!(result.total_emission, 0.0);
        assert!(result.emission_factor_derivation.contains("natural gas"));
        assert!(result.total_emission_derivation.contains("natural gas"));
    }

    #[test]
    fn test_carryover_override() {
        let input = InputData {
            ash_carryover_override: Some(0.5),
            ..control_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.ash_carryover, 0.5);

        // kтв scales linearly in aвин
        let baseline = calculate(&control_input()).unwrap();
        let expected = baseline.emission_factor_before / 0.95 * 0.5;
        assert!((result.emission_factor_before - expected).abs() < 0.02);
    }

    #[test]
    fn test_carryover_table_fallback() {
        let input = InputData {
            combustion_technology: CombustionTechnology::FixedBed,
            ..control_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.ash_carryover, 0.15);
    }

    #[test]
    fn test_fuel_oil_carryover() {
        let input = InputData {
            fuel_type: FuelType::FuelOil,
            ash_content: 0.15,
            lower_heating_value: 39.48,
            combustibles_in_ash: 0.0,
            ..control_input()
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.ash_carryover, 1.0);
    }

    #[test]
    fn test_cleaning_relation() {
        let input = InputData {
            dust_collection: DustCollection::Filter(DustFilterType::Electrostatic),
            ..control_input()
        };
        let result = calculate(&input).unwrap();

        assert_eq!(result.dust_removal_efficiency, 0.985);
        // kтв = kтв(before) × (1 − ηзу), within rounding
        let expected = result.emission_factor_before * (1.0 - 0.985);
        assert!((result.emission_factor - expected).abs() < 0.02);
        assert!(result.emission_factor < result.emission_factor_before);
    }

    #[test]
    fn test_measured_efficiency_mode() {
        let input = InputData {
            dust_collection: DustCollection::Measured(0.5),
            ..control_input()
        };
        let result = calculate(&input).unwrap();

        assert_eq!(result.dust_removal_efficiency, 0.5);
        let expected = result.emission_factor_before * 0.5;
        assert!((result.emission_factor - expected).abs() < 0.02);
    }

    #[test]
    fn test_total_emission_relation() {
        let input = InputData {
            dust_collection: DustCollection::Filter(DustFilterType::Cyclone),
            mechanical_incomplete_combustion: 1.2,
            ..control_input()
        };
        let result = calculate(&input).unwrap();

        // E = 10⁻⁶ × kтв × B × Qr, within rounding of kтв
        let expected = 1e-6 * result.emission_factor * 150_000.0 * 24.0;
        assert!((result.total_emission - expected).abs() < 0.5);
    }

    #[test]
    fn test_q4_reduces_factor() {
        let with_q4 = calculate(&InputData {
            mechanical_incomplete_combustion: 3.0,
            ..control_input()
        })
        .unwrap();
        let without_q4 = calculate(&control_input()).unwrap();

        assert!(with_q4.emission_factor_before < without_q4.emission_factor_before);
        // Factor (1 − 3.0/32.68)
        let expected = without_q4.emission_factor_before * (1.0 - 3.0 / 32.68);
        assert!((with_q4.emission_factor_before - expected).abs() < 0.02);
    }

    #[test]
    fn test_idempotence() {
        let input = control_input();
        let first = calculate(&input).unwrap();
        let second = calculate(&input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_nonpositive_heating_value() {
        for qr in [0.0, -24.0] {
            let input = InputData {
                lower_heating_value: qr,
                ..control_input()
            };
            let err = calculate(&input).unwrap_err();
            assert_eq!(err.error_code(), "INVALID_INPUT");
        }
    }

    #[test]
    fn test_rejects_combustibles_at_hundred() {
        let input = InputData {
            combustibles_in_ash: 100.0,
            ..control_input()
        };
        let err = calculate(&input).unwrap_err();
        assert!(err.to_string().contains("combustibles_in_ash"));
    }

    #[test]
    fn test_rejects_negative_consumption() {
        let input = InputData {
            fuel_consumption: -1.0,
            ..control_input()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_fractions() {
        let input = InputData {
            ash_carryover_override: Some(1.5),
            ..control_input()
        };
        assert!(calculate(&input).is_err());

        let input = InputData {
            dust_collection: DustCollection::Measured(-0.1),
            ..control_input()
        };
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_derivation_text_content() {
        let input = InputData {
            dust_collection: DustCollection::Filter(DustFilterType::Electrostatic),
            ..control_input()
        };
        let result = calculate(&input).unwrap();

        let factor = &result.emission_factor_derivation;
        assert!(factor.contains("Formula (2.3)"));
        assert!(factor.contains("Formula (2.2)"));
        assert!(factor.contains("Qr = 24.00 MJ/kg"));
        assert!(factor.contains("aвин = 0.95"));
        assert!(factor.contains("Electrostatic precipitator"));
        assert!(factor.contains("ηзу = 0.985"));

        let total = &result.total_emission_derivation;
        assert!(total.contains("Formula (2.1)"));
        assert!(total.contains("B = 150000.00 t"));
        assert!(total.contains(&format!("E = {:.2} t", result.total_emission)));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let input = control_input();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: InputData = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);

        let result = calculate(&input).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("emission_factor_before"));
        assert!(json.contains("total_emission"));
        let roundtrip: CalculationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }
}
