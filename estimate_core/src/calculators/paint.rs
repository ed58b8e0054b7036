//! # Paint Quantity Calculator
//!
//! Estimates paint quantity and cost for a room: wall area minus standard
//! door/window deductions, optional ceiling, multiplied by coats and
//! divided by coverage.
//!
//! ## Assumptions
//!
//! - Standard door deduction 21 sqft (3' x 7'), window 15 sqft (3' x 5')
//! - Coverage is per coat; default 100 sqft per liter
//! - Deductions never drive the paintable area below zero
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::paint::{PaintInput, calculate};
//! use estimate_core::settings::Settings;
//!
//! let input = PaintInput {
//!     label: "Bedroom".to_string(),
//!     length_ft: 16.0,
//!     width_ft: 12.0,
//!     height_ft: 10.0,
//!     doors: 1,
//!     windows: 2,
//!     include_ceiling: true,
//!     coats: 2,
//!     coverage_sqft_per_liter: None,
//! };
//!
//! let result = calculate(&input, &Settings::default()).unwrap();
//! assert!(result.liters_required > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::settings::Settings;

/// Standard deduction for one door opening (3' x 7')
const DOOR_AREA_SQFT: f64 = 21.0;

/// Standard deduction for one window opening (3' x 5')
const WINDOW_AREA_SQFT: f64 = 15.0;

/// Default coverage per liter per coat
const DEFAULT_COVERAGE_SQFT_PER_LITER: f64 = 100.0;

fn default_coats() -> u32 {
    2
}

/// Input parameters for the paint calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bedroom",
///   "length_ft": 16.0,
///   "width_ft": 12.0,
///   "height_ft": 10.0,
///   "doors": 1,
///   "windows": 2,
///   "include_ceiling": true,
///   "coats": 2
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintInput {
    /// User label for this room (e.g., "Bedroom", "Lounge")
    pub label: String,

    /// Room length in feet
    pub length_ft: f64,

    /// Room width in feet
    pub width_ft: f64,

    /// Wall height in feet
    pub height_ft: f64,

    /// Number of door openings to deduct
    #[serde(default)]
    pub doors: u32,

    /// Number of window openings to deduct
    #[serde(default)]
    pub windows: u32,

    /// Paint the ceiling as well
    #[serde(default)]
    pub include_ceiling: bool,

    /// Number of coats (default 2)
    #[serde(default = "default_coats")]
    pub coats: u32,

    /// Coverage override in sqft per liter per coat
    #[serde(default)]
    pub coverage_sqft_per_liter: Option<f64>,
}

impl PaintInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        for (field, value) in [
            ("length_ft", self.length_ft),
            ("width_ft", self.width_ft),
            ("height_ft", self.height_ft),
        ] {
            if value <= 0.0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be positive",
                ));
            }
        }
        if self.coats == 0 {
            return Err(EstimateError::invalid_input(
                "coats",
                self.coats.to_string(),
                "At least one coat is required",
            ));
        }
        if let Some(coverage) = self.coverage_sqft_per_liter {
            if coverage <= 0.0 {
                return Err(EstimateError::invalid_input(
                    "coverage_sqft_per_liter",
                    coverage.to_string(),
                    "Coverage must be positive",
                ));
            }
        }
        Ok(())
    }

    /// Gross wall area: 2(L + W) x H
    pub fn wall_area_sqft(&self) -> f64 {
        2.0 * (self.length_ft + self.width_ft) * self.height_ft
    }

    /// Total opening deduction for doors and windows
    pub fn deduction_sqft(&self) -> f64 {
        f64::from(self.doors) * DOOR_AREA_SQFT + f64::from(self.windows) * WINDOW_AREA_SQFT
    }
}

/// Results from the paint calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "wall_area_sqft": 560.0,
///   "deduction_sqft": 51.0,
///   "paintable_area_sqft": 701.0,
///   "coats": 2,
///   "coverage_sqft_per_liter": 100.0,
///   "liters_required": 14.1,
///   "paint_cost_pkr": 11280.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaintResult {
    /// Gross wall area before deductions (sqft)
    pub wall_area_sqft: f64,

    /// Door/window deduction (sqft)
    pub deduction_sqft: f64,

    /// Area actually painted, including the ceiling when selected (sqft)
    pub paintable_area_sqft: f64,

    /// Number of coats applied
    pub coats: u32,

    /// Coverage used (sqft per liter per coat)
    pub coverage_sqft_per_liter: f64,

    /// Liters of paint required, rounded up to the next 0.1 L
    pub liters_required: f64,

    /// Paint cost at the configured price per liter (PKR)
    pub paint_cost_pkr: f64,
}

/// Calculate paint quantity and cost for a room.
///
/// # Arguments
///
/// * `input` - Room geometry, openings, coats
/// * `settings` - Rate book supplying the paint price per liter
pub fn calculate(input: &PaintInput, settings: &Settings) -> EstimateResult<PaintResult> {
    input.validate()?;

    let wall_area = input.wall_area_sqft();
    let deduction = input.deduction_sqft();

    // Openings larger than the walls clamp to zero rather than go negative
    let mut paintable = (wall_area - deduction).max(0.0);
    if input.include_ceiling {
        paintable += input.length_ft * input.width_ft;
    }

    let coverage = input
        .coverage_sqft_per_liter
        .unwrap_or(DEFAULT_COVERAGE_SQFT_PER_LITER);

    let liters_raw = paintable * f64::from(input.coats) / coverage;
    // Paint is sold in tenths of a liter at smallest; round up
    let liters_required = (liters_raw * 10.0).ceil() / 10.0;

    let paint_cost_pkr = liters_required * settings.pricing.paint_price_per_liter;

    Ok(PaintResult {
        wall_area_sqft: wall_area,
        deduction_sqft: deduction,
        paintable_area_sqft: paintable,
        coats: input.coats,
        coverage_sqft_per_liter: coverage,
        liters_required,
        paint_cost_pkr,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> PaintInput {
        PaintInput {
            label: "Bedroom".to_string(),
            length_ft: 16.0,
            width_ft: 12.0,
            height_ft: 10.0,
            doors: 1,
            windows: 2,
            include_ceiling: false,
            coats: 2,
            coverage_sqft_per_liter: None,
        }
    }

    #[test]
    fn test_wall_area_and_deductions() {
        let room = test_room();
        // 2 * (16 + 12) * 10 = 560
        assert_eq!(room.wall_area_sqft(), 560.0);
        // 1 door + 2 windows = 21 + 30 = 51
        assert_eq!(room.deduction_sqft(), 51.0);
    }

    #[test]
    fn test_liters_and_cost() {
        let settings = Settings::default();
        let result = calculate(&test_room(), &settings).unwrap();

        // Paintable 509 sqft, 2 coats at 100 sqft/L = 10.18 L -> 10.2 L
        assert_eq!(result.paintable_area_sqft, 509.0);
        assert!((result.liters_required - 10.2).abs() < 1e-9);
        assert!(
            (result.paint_cost_pkr - 10.2 * settings.pricing.paint_price_per_liter).abs() < 1e-6
        );
    }

    #[test]
    fn test_ceiling_adds_floor_area() {
        let settings = Settings::default();
        let mut room = test_room();
        let without = calculate(&room, &settings).unwrap();
        room.include_ceiling = true;
        let with = calculate(&room, &settings).unwrap();
        assert_eq!(
            with.paintable_area_sqft - without.paintable_area_sqft,
            16.0 * 12.0
        );
    }

    #[test]
    fn test_doubling_area_doubles_liters() {
        let settings = Settings::default();
        let small = PaintInput {
            doors: 0,
            windows: 0,
            ..test_room()
        };
        let big = PaintInput {
            height_ft: 20.0,
            ..small.clone()
        };

        let small_result = calculate(&small, &settings).unwrap();
        let big_result = calculate(&big, &settings).unwrap();
        assert!((big_result.paintable_area_sqft - 2.0 * small_result.paintable_area_sqft).abs() < 1e-9);
        assert!((big_result.liters_required - 2.0 * small_result.liters_required).abs() < 0.11);
    }

    #[test]
    fn test_excess_openings_clamp_to_zero() {
        let settings = Settings::default();
        let closet = PaintInput {
            label: "Closet".to_string(),
            length_ft: 2.0,
            width_ft: 2.0,
            height_ft: 3.0,
            doors: 3,
            windows: 2,
            include_ceiling: false,
            coats: 2,
            coverage_sqft_per_liter: None,
        };
        let result = calculate(&closet, &settings).unwrap();
        assert_eq!(result.paintable_area_sqft, 0.0);
        assert_eq!(result.liters_required, 0.0);
        assert_eq!(result.paint_cost_pkr, 0.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let settings = Settings::default();

        let mut zero_height = test_room();
        zero_height.height_ft = 0.0;
        assert!(calculate(&zero_height, &settings).is_err());

        let mut no_coats = test_room();
        no_coats.coats = 0;
        assert!(calculate(&no_coats, &settings).is_err());

        let mut bad_coverage = test_room();
        bad_coverage.coverage_sqft_per_liter = Some(-10.0);
        assert!(calculate(&bad_coverage, &settings).is_err());
    }

    #[test]
    fn test_serialization_defaults() {
        let input: PaintInput = serde_json::from_str(
            r#"{ "label": "Room", "length_ft": 10.0, "width_ft": 10.0, "height_ft": 9.0 }"#,
        )
        .unwrap();
        assert_eq!(input.coats, 2);
        assert_eq!(input.doors, 0);
        assert!(!input.include_ceiling);
    }
}
