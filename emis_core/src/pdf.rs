//! # PDF Report Module
//!
//! Renders an emission calculation into a PDF report using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Result fields are injected via string replacement before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! The renderer only reads [`CalculationResult`] fields; it never
//! recomputes anything.
//!
//! ## Example
//!
//! ```rust,no_run
//! use emis_core::calculator::{calculate, InputData};
//! use emis_core::fuel::FuelType;
//! use emis_core::pdf::render_report_pdf;
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
//! let pdf_bytes = render_report_pdf(&result, "Jane Engineer", "Unit 3 boiler house").unwrap();
//! std::fs::write("emission_report.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use once_cell::sync::Lazy;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculator::CalculationResult;
use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// Fonts bundled with typst-assets; loaded once per process.
static FONTS: Lazy<Vec<Font>> = Lazy::new(|| {
    let mut fonts = Vec::new();
    for font_bytes in typst_assets::fonts() {
        let buffer = Bytes::new(font_bytes.to_vec());
        for font in Font::iter(buffer) {
            fonts.push(font);
        }
    }
    fonts
});

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(FontBook::from_fonts(FONTS.iter())),
            library: LazyHash::new(Library::default()),
        }
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Utc::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

/// Typst template for the emission calculation report
const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[EmiFuel Emission Calculations]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{FACILITY}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt)
#show raw: set text(size: 9pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 18pt, weight: "bold")[Solid Particulate Emission Report]
    #v(4pt)
    #text(size: 14pt)[{{FACILITY}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Report Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Prepared by:], [{{PREPARED_BY}}],
      [Facility:], [{{FACILITY}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Methodology Reference*
    #v(4pt)
    Emission factors per formulas (2.1)-(2.3) of the regulatory
    methodology for stationary fuel combustion sources.
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Input Parameters

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  table.header([*Parameter*], [*Value*]),
  [Combustion technology], [{{COMBUSTION_TECH}}],
  [Desulfurization technology], [{{DESULFURIZATION_TECH}}],
  [Fuel type], [{{FUEL_TYPE}}],
  [Fuel consumption B], [{{FUEL_CONSUMPTION}} {{CONSUMPTION_UNIT}}],
  [Ash content A#super[r]], [{{ASH_CONTENT}} %],
  [Lower heating value Q#super[r]], [{{HEATING_VALUE}} {{HEATING_UNIT}}],
  [Combustibles in ash], [{{COMBUSTIBLES}} %],
  [Sulfur content S#super[r]], [{{SULFUR}} %],
  [Mechanical incomplete combustion q#sub[4]], [{{Q4}} %],
  [Dust collection], [{{DUST_COLLECTION}}],
)

#v(12pt)

== Results

#table(
  columns: (1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right, left),
  table.header([*Quantity*], [*Value*], [*Unit*]),
  [Ash carryover fraction], [{{ASH_CARRYOVER}}], [],
  [Dust removal efficiency], [{{EFFICIENCY}}], [],
  [Emission factor before cleaning], [{{FACTOR_BEFORE}}], [g/GJ],
  [Emission factor after cleaning], [{{FACTOR_AFTER}}], [g/GJ],
  [Gross emission E], [{{TOTAL_EMISSION}}], [t],
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Derivation

```
{{FACTOR_DERIVATION}}
```

```
{{TOTAL_DERIVATION}}
```

#v(24pt)
#text(size: 9pt, fill: gray)[
  Generated by EmiFuel \
  Figures should be verified against the current edition of the methodology.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render an emission calculation to PDF.
///
/// # Arguments
///
/// * `result` - the calculation to report
/// * `prepared_by` - name of the person preparing the report
/// * `facility` - name of the combustion facility
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(CalcError)` - if Typst compilation or PDF encoding fails
pub fn render_report_pdf(
    result: &CalculationResult,
    prepared_by: &str,
    facility: &str,
) -> CalcResult<Vec<u8>> {
    let input = &result.input;

    let source = REPORT_TEMPLATE
        .replace("{{PREPARED_BY}}", &escape_typst(prepared_by))
        .replace("{{FACILITY}}", &escape_typst(facility))
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace(
            "{{COMBUSTION_TECH}}",
            input.combustion_technology.display_name(),
        )
        .replace(
            "{{DESULFURIZATION_TECH}}",
            input.desulfurization_technology.display_name(),
        )
        .replace("{{FUEL_TYPE}}", input.fuel_type.display_name())
        .replace(
            "{{FUEL_CONSUMPTION}}",
            &format!("{:.2}", input.fuel_consumption),
        )
        .replace("{{CONSUMPTION_UNIT}}", input.fuel_type.consumption_unit())
        .replace("{{ASH_CONTENT}}", &format!("{:.2}", input.ash_content))
        .replace(
            "{{HEATING_VALUE}}",
            &format!("{:.2}", input.lower_heating_value),
        )
        .replace("{{HEATING_UNIT}}", input.fuel_type.heating_value_unit())
        .replace(
            "{{COMBUSTIBLES}}",
            &format!("{:.2}", input.combustibles_in_ash),
        )
        .replace("{{SULFUR}}", &format!("{:.2}", input.sulfur_content))
        .replace(
            "{{Q4}}",
            &format!("{:.2}", input.mechanical_incomplete_combustion),
        )
        .replace(
            "{{DUST_COLLECTION}}",
            &escape_typst(&input.dust_collection.describe()),
        )
        .replace("{{ASH_CARRYOVER}}", &format!("{:.2}", result.ash_carryover))
        .replace(
            "{{EFFICIENCY}}",
            &format!("{:.3}", result.dust_removal_efficiency),
        )
        .replace(
            "{{FACTOR_BEFORE}}",
            &format!("{:.2}", result.emission_factor_before),
        )
        .replace("{{FACTOR_AFTER}}", &format!("{:.2}", result.emission_factor))
        .replace(
            "{{TOTAL_EMISSION}}",
            &format!("{:.2}", result.total_emission),
        )
        .replace(
            "{{FACTOR_DERIVATION}}",
            result.emission_factor_derivation.trim_end(),
        )
        .replace(
            "{{TOTAL_DERIVATION}}",
            result.total_emission_derivation.trim_end(),
        );

    let world = PdfWorld::new(source);

    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{calculate, InputData};
    use crate::fuel::FuelType;
    use crate::technology::{
        CombustionTechnology, DesulfurizationTechnology, DustCollection, DustFilterType,
    };

    fn test_result() -> CalculationResult {
        let input = InputData {
            combustion_technology: CombustionTechnology::DryAshRemoval,
            desulfurization_technology: DesulfurizationTechnology::WetLimestone,
            fuel_type: FuelType::Coal,
            fuel_consumption: 150_000.0,
            ash_content: 25.0,
            lower_heating_value: 24.0,
            combustibles_in_ash: 5.0,
            sulfur_content: 2.5,
            ash_carryover_override: None,
            dust_collection: DustCollection::Filter(DustFilterType::Electrostatic),
            mechanical_incomplete_combustion: 0.5,
        };
        calculate(&input).unwrap()
    }

    #[test]
    fn test_pdf_generation() {
        let result = test_result();
        let pdf = render_report_pdf(&result, "Test Engineer", "Unit 3 boiler house");

        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        // Should be a reasonable size (at least 1KB)
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_escape_typst() {
        assert_eq!(escape_typst("Unit #3"), "Unit \\#3");
        assert_eq!(escape_typst("plain"), "plain");
        assert_eq!(escape_typst("a*b_c"), "a\\*b\\_c");
    }
}
