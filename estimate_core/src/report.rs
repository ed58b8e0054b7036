//! # Report Generation Module
//!
//! Renders client-facing estimate reports to PDF using Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Estimate data is injected via string replacement before compilation
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! Branding comes from the rate book: site name, report header line and
//! the accent color set in the admin panel.
//!
//! ## Example
//!
//! ```rust,no_run
//! use estimate_core::calculators::{BuildingInput, EstimateItem, EstimateMode};
//! use estimate_core::estimate::Estimate;
//! use estimate_core::report::render_estimate_pdf;
//! use estimate_core::settings::{LocationTier, QualityTier, Settings};
//!
//! let settings = Settings::default();
//! let mut estimate = Estimate::new("Hamza Khan", "Ahmed Builders", "DHA Phase 6");
//! estimate.add_item(EstimateItem::Building(BuildingInput {
//!     label: "5 marla house".to_string(),
//!     footprint_sqft: 1361.25,
//!     floors: 2,
//!     location: LocationTier::Urban,
//!     quality: QualityTier::Premium,
//!     mode: EstimateMode::Itemized,
//! }));
//!
//! let pdf_bytes = render_estimate_pdf(&estimate, &settings).unwrap();
//! std::fs::write("estimate.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Utc;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculators::EstimateOutput;
use crate::errors::{EstimateError, EstimateResult};
use crate::estimate::{Estimate, EstimateSummary};
use crate::settings::Settings;
use crate::units::Rupees;

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct ReportWorld {
    /// The main source document
    main: Source,
    /// Font book
    book: LazyHash<FontBook>,
    /// Available fonts
    fonts: Vec<Font>,
    /// Library (standard functions)
    library: LazyHash<Library>,
}

impl ReportWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        ReportWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    fn load_fonts() -> Vec<Font> {
        // Bundled fonts from typst-assets cover text and math
        let mut fonts = Vec::new();
        for font_bytes in typst_assets::fonts() {
            let buffer = Bytes::new(font_bytes.to_vec());
            for font in Font::iter(buffer) {
                fonts.push(font);
            }
        }
        fonts
    }
}

impl World for ReportWorld {
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
        self.fonts.get(index).cloned()
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
// Report Template
// ============================================================================

/// Typst template for the report frame: branding header, client block,
/// summary table and grand total. Item sections are appended after it.
const REPORT_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 1in, bottom: 1in, left: 1in, right: 1in),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{SITE_NAME}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[{{CLIENT}}]],
      align(center)[#text(size: 9pt)[Page #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(size: 11pt)

// Title Block
#align(center)[
  #block(width: 100%, fill: rgb("{{BRAND_COLOR}}").lighten(85%), inset: 14pt, radius: 4pt)[
    #text(size: 20pt, weight: "bold", fill: rgb("{{BRAND_COLOR}}"))[{{SITE_NAME}}]
    #v(4pt)
    #text(size: 14pt)[{{REPORT_HEADER}}]
  ]
]

#v(12pt)

#grid(
  columns: (1fr, 1fr),
  gutter: 20pt,
  [
    *Client Information*
    #v(4pt)
    #table(
      columns: (auto, 1fr),
      stroke: none,
      row-gutter: 4pt,
      [Client:], [{{CLIENT}}],
      [Site:], [{{SITE}}],
      [Prepared by:], [{{PREPARED_BY}}],
      [Date:], [{{DATE}}],
    )
  ],
  [
    *Basis of Estimate*
    #v(4pt)
    Rates and multipliers from the {{SITE_NAME}} rate book,
    last updated {{RATES_DATE}}. All figures in Pakistani rupees.
  ]
)

#v(16pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

== Estimate Summary

#table(
  columns: (auto, 1fr, auto, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, left, left, right),
  table.header([*No.*], [*Item*], [*Tool*], [*Cost*]),
{{SUMMARY_ROWS}}
)

#v(8pt)

#align(right)[
  #block(fill: rgb("{{BRAND_COLOR}}").lighten(85%), inset: 12pt, radius: 4pt)[
    #text(size: 14pt, weight: "bold")[Grand Total: {{GRAND_TOTAL}}]
  ]
]
"##;

/// Closing note appended after the item sections.
const REPORT_FOOTNOTE: &str = r##"
#v(24pt)
#line(length: 100%, stroke: 0.5pt)
#v(8pt)

#text(size: 9pt, fill: gray)[
  Generated by {{SITE_NAME}} \
  Figures are planning estimates from standard thumb rules; confirm
  quantities with your contractor before purchase.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render an estimate document to PDF.
///
/// Every item is evaluated against the rate book, so the report always
/// reflects current prices.
///
/// # Arguments
///
/// * `estimate` - The estimate document to render
/// * `settings` - Rate book supplying prices and branding
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - PDF file as bytes
/// * `Err(EstimateError)` - If evaluation or rendering fails
pub fn render_estimate_pdf(
    estimate: &Estimate,
    settings: &Settings,
) -> EstimateResult<Vec<u8>> {
    if estimate.items.is_empty() {
        return Err(EstimateError::invalid_input(
            "items",
            "empty",
            "Estimate has no items to report",
        ));
    }

    let summary = estimate.evaluate_all(settings)?;

    let mut source = REPORT_TEMPLATE
        .replace("{{SITE_NAME}}", &escape_typst(&settings.branding.site_name))
        .replace("{{BRAND_COLOR}}", &settings.branding.brand_color)
        .replace(
            "{{REPORT_HEADER}}",
            &escape_typst(&settings.branding.report_header),
        )
        .replace("{{CLIENT}}", &escape_typst(&estimate.meta.client))
        .replace("{{SITE}}", &escape_typst(&estimate.meta.site))
        .replace(
            "{{PREPARED_BY}}",
            &escape_typst(&estimate.meta.prepared_by),
        )
        .replace("{{DATE}}", &Utc::now().format("%Y-%m-%d").to_string())
        .replace(
            "{{RATES_DATE}}",
            &settings.meta.modified.format("%Y-%m-%d").to_string(),
        )
        .replace("{{SUMMARY_ROWS}}", &build_summary_rows(&summary))
        .replace("{{GRAND_TOTAL}}", &Rupees(summary.total_cost_pkr).formatted());

    for (i, line) in summary.lines.iter().enumerate() {
        source.push_str("\n#v(16pt)\n");
        source.push_str(&format!(
            "== {}. {} ({})\n\n",
            i + 1,
            escape_typst(&line.label),
            line.calc_type
        ));
        source.push_str(&line_detail_table(&line.output));
    }

    source.push_str(
        &REPORT_FOOTNOTE.replace("{{SITE_NAME}}", &escape_typst(&settings.branding.site_name)),
    );

    // Compile the Typst document
    let world = ReportWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::Internal {
            message: format!("Typst compilation failed: {}", error_msgs.join("; ")),
        }
    })?;

    // Render to PDF
    let pdf_bytes = typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        EstimateError::Internal {
            message: format!("PDF rendering failed: {}", error_msgs.join("; ")),
        }
    })?;

    Ok(pdf_bytes)
}

/// Build summary table rows for the cover table
fn build_summary_rows(summary: &EstimateSummary) -> String {
    summary
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let cost = match line.output.cost_pkr() {
                Some(cost) => Rupees(cost).formatted(),
                None => "-".to_string(),
            };
            format!(
                "  [{}], [{}], [{}], [{}],",
                i + 1,
                escape_typst(&line.label),
                line.calc_type,
                cost
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Two-column detail table for one evaluated line
fn line_detail_table(output: &EstimateOutput) -> String {
    let rows: Vec<(String, String)> = match output {
        EstimateOutput::Building(r) => {
            let mut rows = vec![
                ("Covered area".to_string(), format!("{:.0} sqft", r.covered_area_sqft)),
                ("Location factor".to_string(), format!("{:.2}", r.location_factor)),
                ("Quality factor".to_string(), format!("{:.2}", r.quality_factor)),
            ];
            if let Some(b) = &r.breakdown {
                rows.push((
                    "Bricks".to_string(),
                    format!("{:.0} @ {}", b.bricks_qty, Rupees(b.bricks_cost_pkr).formatted()),
                ));
                rows.push((
                    "Cement".to_string(),
                    format!("{:.0} bags @ {}", b.cement_bags, Rupees(b.cement_cost_pkr).formatted()),
                ));
                rows.push((
                    "Steel".to_string(),
                    format!("{:.2} tons @ {}", b.steel_tons, Rupees(b.steel_cost_pkr).formatted()),
                ));
                rows.push((
                    "Sand".to_string(),
                    format!("{:.0} cft @ {}", b.sand_cft, Rupees(b.sand_cost_pkr).formatted()),
                ));
                rows.push((
                    "Labor".to_string(),
                    format!("{:.0} crew-days @ {}", b.labor_days, Rupees(b.labor_cost_pkr).formatted()),
                ));
                rows.push(("Foundation".to_string(), Rupees(b.foundation_cost_pkr).formatted()));
            }
            rows.push((
                "Effective rate".to_string(),
                format!("{} / sqft", Rupees(r.effective_rate_per_sqft).formatted()),
            ));
            rows.push(("Total".to_string(), Rupees(r.total_cost_pkr).formatted()));
            rows
        }
        EstimateOutput::Area(r) => vec![
            ("Square feet".to_string(), format!("{:.2}", r.sqft)),
            ("Square yards".to_string(), format!("{:.2}", r.sqyd)),
            ("Marla".to_string(), format!("{:.2}", r.marla)),
            ("Kanal".to_string(), format!("{:.3}", r.kanal)),
            ("Square meters".to_string(), format!("{:.2}", r.sqm)),
            ("Acres".to_string(), format!("{:.4}", r.acre)),
        ],
        EstimateOutput::Paint(r) => vec![
            ("Paintable area".to_string(), format!("{:.0} sqft", r.paintable_area_sqft)),
            ("Coats".to_string(), r.coats.to_string()),
            ("Paint required".to_string(), format!("{:.1} liters", r.liters_required)),
            ("Paint cost".to_string(), Rupees(r.paint_cost_pkr).formatted()),
        ],
        EstimateOutput::WaterTank(r) => vec![
            ("Volume".to_string(), format!("{:.1} cft", r.volume_cft)),
            ("Capacity".to_string(), format!("{:.0} liters ({:.0} gallons)", r.capacity_liters, r.capacity_gallons)),
            ("Household demand".to_string(), format!("{:.0} liters/day", r.daily_demand_liters)),
            ("Storage".to_string(), format!("{:.1} days", r.days_of_storage)),
            (
                "Recommendation".to_string(),
                if r.meets_recommendation {
                    "Adequate".to_string()
                } else {
                    format!("Undersized; {:.0} liters recommended", r.recommended_liters)
                },
            ),
        ],
        EstimateOutput::Flooring(r) => vec![
            ("Area with wastage".to_string(), format!("{:.0} sqft", r.area_with_wastage_sqft)),
            ("Tiles required".to_string(), r.tiles_required.to_string()),
            ("Material cost".to_string(), Rupees(r.material_cost_pkr).formatted()),
            ("Labor".to_string(), format!("{:.0} crew-days @ {}", r.labor_days, Rupees(r.labor_cost_pkr).formatted())),
            ("Total".to_string(), Rupees(r.total_cost_pkr).formatted()),
        ],
        EstimateOutput::AcCapacity(r) => vec![
            ("Cooling load".to_string(), format!("{:.0} BTU/hr", r.btu_required)),
            ("Load in tons".to_string(), format!("{:.2}", r.tons_required)),
            (
                "Recommended".to_string(),
                format!("{} x {:.2}-ton unit(s)", r.unit_count, r.recommended_size_tons),
            ),
        ],
    };

    let mut table = String::from(
        "#table(\n  columns: (1fr, auto),\n  inset: 8pt,\n  stroke: 0.5pt,\n  align: (left, right),\n",
    );
    for (name, value) in rows {
        table.push_str(&format!("  [{}], [{}],\n", name, escape_typst(&value)));
    }
    table.push_str(")\n");
    table
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
    use crate::calculators::{
        AcCapacityInput, BuildingInput, EstimateItem, EstimateMode, PaintInput,
    };
    use crate::settings::{LocationTier, QualityTier};

    fn sample_estimate() -> Estimate {
        let mut estimate = Estimate::new("Hamza Khan", "Ahmed Builders", "DHA Phase 6");
        estimate.add_item(EstimateItem::Building(BuildingInput {
            label: "5 marla house".to_string(),
            footprint_sqft: 1361.25,
            floors: 2,
            location: LocationTier::Urban,
            quality: QualityTier::Premium,
            mode: EstimateMode::Itemized,
        }));
        estimate.add_item(EstimateItem::Paint(PaintInput {
            label: "Master bedroom".to_string(),
            length_ft: 16.0,
            width_ft: 12.0,
            height_ft: 10.0,
            doors: 1,
            windows: 2,
            include_ceiling: true,
            coats: 2,
            coverage_sqft_per_liter: None,
        }));
        estimate.add_item(EstimateItem::AcCapacity(AcCapacityInput {
            label: "Lounge AC".to_string(),
            area_sqft: 350.0,
            occupants: 4,
            sunny: true,
            kitchen: false,
        }));
        estimate
    }

    #[test]
    fn test_pdf_generation() {
        let pdf = render_estimate_pdf(&sample_estimate(), &Settings::default());
        assert!(pdf.is_ok(), "PDF generation failed: {:?}", pdf.err());

        let pdf_bytes = pdf.unwrap();
        // PDF should start with %PDF
        assert!(pdf_bytes.starts_with(b"%PDF"), "Output is not a valid PDF");
        // Should be a reasonable size (at least 1KB)
        assert!(pdf_bytes.len() > 1000, "PDF seems too small");
    }

    #[test]
    fn test_empty_estimate_rejected() {
        let estimate = Estimate::new("Hamza", "Client", "Site");
        let err = render_estimate_pdf(&estimate, &Settings::default()).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_typst("A*B_C"), "A\\*B\\_C");
        assert_eq!(escape_typst("plain text"), "plain text");
    }

    #[test]
    fn test_summary_rows_mark_costless_lines() {
        let settings = Settings::default();
        let summary = sample_estimate().evaluate_all(&settings).unwrap();
        let rows = build_summary_rows(&summary);
        // The AC sizing line carries no rupee figure
        assert!(rows.contains("[-]"));
        assert!(rows.contains("PKR"));
    }
}
