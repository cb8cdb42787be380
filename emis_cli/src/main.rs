//! # EmiFuel CLI
//!
//! Terminal front end for the emission calculation engine. Prompts for
//! the furnace and fuel parameters (prefilled from the reference fuel
//! tables), prints the derivation and the resulting figures, and can
//! write the PDF report with `--pdf <path>`.

use std::io::{self, BufRead, Write};

use emis_core::calculator::{calculate, InputData};
use emis_core::fuel::FuelType;
use emis_core::pdf::render_report_pdf;
use emis_core::technology::{
    CombustionTechnology, DesulfurizationTechnology, DustCollection, DustFilterType,
};
use emis_core::CalcError;

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{} [{}]: ", prompt, default);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn prompt_choice(prompt: &str, options: &[&str], default: usize) -> usize {
    println!("{}", prompt);
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    print!("Select [{}]: ", default + 1);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    match input.trim().parse::<usize>() {
        Ok(n) if (1..=options.len()).contains(&n) => n - 1,
        _ => default,
    }
}

fn main() {
    println!("EmiFuel CLI - Particulate Emission Calculator");
    println!("=============================================");
    println!();

    let pdf_path = pdf_path_from_args();

    let fuel_names: Vec<&str> = FuelType::ALL.iter().map(|f| f.display_name()).collect();
    let fuel_type = FuelType::ALL[prompt_choice("Fuel type:", &fuel_names, 0)];

    let tech_names: Vec<&str> = CombustionTechnology::ALL
        .iter()
        .map(|t| t.display_name())
        .collect();
    let combustion_technology =
        CombustionTechnology::ALL[prompt_choice("Combustion technology:", &tech_names, 0)];

    let desulf_names: Vec<&str> = DesulfurizationTechnology::ALL
        .iter()
        .map(|t| t.display_name())
        .collect();
    let desulfurization_technology =
        DesulfurizationTechnology::ALL[prompt_choice("Desulfurization technology:", &desulf_names, 0)];

    let filter_names: Vec<&str> = DustFilterType::ALL
        .iter()
        .map(|t| t.display_name())
        .collect();
    // Gas carries no particulates, so no filter is preselected for it
    let default_filter = if fuel_type == FuelType::Gas { 0 } else { 1 };
    let dust_filter =
        DustFilterType::ALL[prompt_choice("Dust filter:", &filter_names, default_filter)];

    // Reference characteristics prefill the fuel parameters
    let reference = fuel_type.reference_characteristics();

    println!();
    let fuel_consumption = prompt_f64(
        &format!("Fuel consumption B ({})", fuel_type.consumption_unit()),
        150_000.0,
    );
    let ash_content = prompt_f64("Ash content Ar (%)", reference.ash_content);
    let lower_heating_value = prompt_f64(
        &format!("Lower heating value Qr ({})", fuel_type.heating_value_unit()),
        reference.lower_heating_value,
    );
    let combustibles_in_ash =
        prompt_f64("Combustibles in ash (%)", reference.combustibles_in_ash);
    let sulfur_content = prompt_f64("Sulfur content Sr (%)", reference.sulfur_content);
    let q4 = prompt_f64("Mechanical incomplete combustion q4 (%)", 0.0);

    let input = InputData {
        combustion_technology,
        desulfurization_technology,
        fuel_type,
        fuel_consumption,
        ash_content,
        lower_heating_value,
        combustibles_in_ash,
        sulfur_content,
        ash_carryover_override: None,
        dust_collection: DustCollection::Filter(dust_filter),
        mechanical_incomplete_combustion: q4,
    };

    match calculate(&input) {
        Ok(result) => {
            println!();
            println!("═════════════════════════════════════════");
            println!("  EMISSION CALCULATION RESULTS");
            println!("═════════════════════════════════════════");
            println!();
            println!("{}", result.emission_factor_derivation);
            println!("{}", result.total_emission_derivation);
            println!("═════════════════════════════════════════");
            println!("  kтв(before) = {:.2} g/GJ", result.emission_factor_before);
            println!("  kтв(after)  = {:.2} g/GJ", result.emission_factor);
            println!("  E           = {:.2} t", result.total_emission);
            println!("═════════════════════════════════════════");

            println!();
            println!("JSON Output (for API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }

            if let Some(path) = pdf_path {
                match render_report_pdf(&result, "EmiFuel CLI", "Unnamed facility")
                    .and_then(|bytes| {
                        std::fs::write(&path, bytes).map_err(|e| {
                            CalcError::file_error("write", path.as_str(), e.to_string())
                        })
                    }) {
                    Ok(()) => println!("Report written to {}", path),
                    Err(e) => eprintln!("Report export failed: {}", e),
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            std::process::exit(1);
        }
    }
}

/// Read `--pdf <path>` from the command line, if present.
fn pdf_path_from_args() -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    args.iter()
        .position(|a| a == "--pdf")
        .and_then(|i| args.get(i + 1))
        .cloned()
}
