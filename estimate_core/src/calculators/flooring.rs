//! # Flooring Calculator
//!
//! Tile count and cost for a floor: area plus wastage divided by tile
//! size, material priced from the rate book, labor from crew productivity.
//!
//! ## Assumptions
//!
//! - Default wastage 10% (cutting and breakage)
//! - Default laying productivity 200 sqft per crew-day
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::flooring::{FlooringInput, calculate};
//! use estimate_core::settings::Settings;
//!
//! let input = FlooringInput {
//!     label: "Lounge".to_string(),
//!     area_sqft: 400.0,
//!     tile_length_in: 24.0,
//!     tile_width_in: 24.0,
//!     wastage_pct: 10.0,
//! };
//!
//! let result = calculate(&input, &Settings::default()).unwrap();
//! assert_eq!(result.tiles_required, 110);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::settings::Settings;

/// Default wastage allowance for cutting and breakage (percent)
const DEFAULT_WASTAGE_PCT: f64 = 10.0;

/// Tile laying productivity per crew-day (sqft)
const LABOR_SQFT_PER_DAY: f64 = 200.0;

fn default_wastage() -> f64 {
    DEFAULT_WASTAGE_PCT
}

/// Input parameters for the flooring calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Lounge",
///   "area_sqft": 400.0,
///   "tile_length_in": 24.0,
///   "tile_width_in": 24.0,
///   "wastage_pct": 10.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlooringInput {
    /// User label for this floor (e.g., "Lounge")
    pub label: String,

    /// Floor area in square feet
    pub area_sqft: f64,

    /// Tile length in inches
    pub tile_length_in: f64,

    /// Tile width in inches
    pub tile_width_in: f64,

    /// Wastage allowance in percent (default 10)
    #[serde(default = "default_wastage")]
    pub wastage_pct: f64,
}

impl FlooringInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.area_sqft <= 0.0 {
            return Err(EstimateError::invalid_input(
                "area_sqft",
                self.area_sqft.to_string(),
                "Area must be positive",
            ));
        }
        for (field, value) in [
            ("tile_length_in", self.tile_length_in),
            ("tile_width_in", self.tile_width_in),
        ] {
            if value <= 0.0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Tile dimension must be positive",
                ));
            }
        }
        if self.wastage_pct < 0.0 {
            return Err(EstimateError::invalid_input(
                "wastage_pct",
                self.wastage_pct.to_string(),
                "Wastage must be non-negative",
            ));
        }
        Ok(())
    }

    /// Area of one tile in square feet
    pub fn tile_area_sqft(&self) -> f64 {
        (self.tile_length_in / 12.0) * (self.tile_width_in / 12.0)
    }

    /// Floor area including the wastage allowance
    pub fn area_with_wastage_sqft(&self) -> f64 {
        self.area_sqft * (1.0 + self.wastage_pct / 100.0)
    }
}

/// Results from the flooring calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "area_with_wastage_sqft": 440.0,
///   "tile_area_sqft": 4.0,
///   "tiles_required": 110,
///   "material_cost_pkr": 110000.0,
///   "labor_days": 2.0,
///   "labor_cost_pkr": 3000.0,
///   "total_cost_pkr": 113000.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlooringResult {
    /// Floor area including wastage (sqft)
    pub area_with_wastage_sqft: f64,

    /// Area of one tile (sqft)
    pub tile_area_sqft: f64,

    /// Whole tiles to order
    pub tiles_required: u64,

    /// Tile supply cost at the configured rate (PKR)
    pub material_cost_pkr: f64,

    /// Crew-days to lay the floor
    pub labor_days: f64,

    /// Labor cost at the configured day rate (PKR)
    pub labor_cost_pkr: f64,

    /// Material plus labor (PKR)
    pub total_cost_pkr: f64,
}

/// Calculate tile count and flooring cost.
///
/// # Arguments
///
/// * `input` - Floor area, tile size, wastage
/// * `settings` - Rate book supplying tile and labor rates
pub fn calculate(input: &FlooringInput, settings: &Settings) -> EstimateResult<FlooringResult> {
    input.validate()?;

    let tile_area = input.tile_area_sqft();
    let covered = input.area_with_wastage_sqft();

    let tiles_required = (covered / tile_area).ceil() as u64;
    let material_cost_pkr = covered * settings.pricing.tile_price_per_sqft;

    let labor_days = (input.area_sqft / LABOR_SQFT_PER_DAY).ceil();
    let labor_cost_pkr = labor_days * settings.pricing.labor_cost_per_day;

    Ok(FlooringResult {
        area_with_wastage_sqft: covered,
        tile_area_sqft: tile_area,
        tiles_required,
        material_cost_pkr,
        labor_days,
        labor_cost_pkr,
        total_cost_pkr: material_cost_pkr + labor_cost_pkr,
    })
}
