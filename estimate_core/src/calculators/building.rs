//! # Building Cost Estimator
//!
//! The general construction cost calculator, in two modes:
//!
//! - **Quick**: covered area x base rate x location x quality. The
//!   number a client wants on the phone.
//! - **Itemized**: quantity takeoff from per-sqft thumb rules (bricks,
//!   cement, steel, sand), labor from crew productivity, foundation on
//!   the ground-floor footprint, all scaled by the same multipliers.
//!
//! Thumb-rule quantities are gray-structure figures for standard brick
//! and RCC construction.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::building::{BuildingInput, EstimateMode, calculate};
//! use estimate_core::settings::{LocationTier, QualityTier, Settings};
//!
//! let input = BuildingInput {
//!     label: "5 marla house".to_string(),
//!     footprint_sqft: 1361.25,
//!     floors: 2,
//!     location: LocationTier::Urban,
//!     quality: QualityTier::Premium,
//!     mode: EstimateMode::Quick,
//! };
//!
//! let result = calculate(&input, &Settings::default()).unwrap();
//! assert!(result.total_cost_pkr > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::settings::{LocationTier, QualityTier, Settings};

/// Bricks per sqft of covered area
const BRICKS_PER_SQFT: f64 = 55.0;

/// Cement bags (50 kg) per sqft of covered area
const CEMENT_BAGS_PER_SQFT: f64 = 0.40;

/// Steel tonnage per sqft of covered area (3.5 kg)
const STEEL_TONS_PER_SQFT: f64 = 0.0035;

/// Sand per sqft of covered area (cft)
const SAND_CFT_PER_SQFT: f64 = 1.8;

/// Covered area one crew completes per day (sqft)
const LABOR_SQFT_PER_CREW_DAY: f64 = 12.0;

fn default_floors() -> u32 {
    1
}

/// Estimation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EstimateMode {
    /// Rate-based single figure
    Quick,
    /// Full quantity takeoff
    Itemized,
}

/// Input parameters for the building cost estimator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "5 marla house",
///   "footprint_sqft": 1361.25,
///   "floors": 2,
///   "location": "urban",
///   "quality": "premium",
///   "mode": "itemized"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingInput {
    /// User label for this estimate (e.g., "5 marla house")
    pub label: String,

    /// Ground-floor footprint in square feet
    pub footprint_sqft: f64,

    /// Number of floors including the ground floor (default 1)
    #[serde(default = "default_floors")]
    pub floors: u32,

    /// Site location tier
    pub location: LocationTier,

    /// Finishing quality tier
    pub quality: QualityTier,

    /// Quick rate-based figure or full takeoff
    pub mode: EstimateMode,
}

impl BuildingInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.footprint_sqft <= 0.0 {
            return Err(EstimateError::invalid_input(
                "footprint_sqft",
                self.footprint_sqft.to_string(),
                "Footprint must be positive",
            ));
        }
        if self.floors == 0 {
            return Err(EstimateError::invalid_input(
                "floors",
                self.floors.to_string(),
                "At least one floor is required",
            ));
        }
        if self.floors > 10 {
            return Err(EstimateError::invalid_input(
                "floors",
                self.floors.to_string(),
                "More than 10 floors is outside residential thumb rules",
            ));
        }
        Ok(())
    }

    /// Total covered area across all floors (sqft)
    pub fn covered_area_sqft(&self) -> f64 {
        self.footprint_sqft * f64::from(self.floors)
    }
}

/// Material quantities and costs from the itemized takeoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemizedBreakdown {
    pub bricks_qty: f64,
    pub bricks_cost_pkr: f64,
    pub cement_bags: f64,
    pub cement_cost_pkr: f64,
    pub steel_tons: f64,
    pub steel_cost_pkr: f64,
    pub sand_cft: f64,
    pub sand_cost_pkr: f64,

    /// Sum of the material lines above (PKR)
    pub materials_cost_pkr: f64,

    /// Crew-days for the gray structure
    pub labor_days: f64,
    pub labor_cost_pkr: f64,

    /// Foundation cost on the ground-floor footprint (PKR)
    pub foundation_cost_pkr: f64,

    /// Materials + labor + foundation before multipliers (PKR)
    pub subtotal_pkr: f64,
}

/// Results from the building cost estimation.
///
/// ## JSON Example (quick mode)
///
/// ```json
/// {
///   "mode": "quick",
///   "covered_area_sqft": 2722.5,
///   "location_factor": 1.2,
///   "quality_factor": 1.3,
///   "breakdown": null,
///   "total_cost_pkr": 10618500.0,
///   "effective_rate_per_sqft": 3900.0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingResult {
    /// Mode the estimate was produced in
    pub mode: EstimateMode,

    /// Total covered area (sqft)
    pub covered_area_sqft: f64,

    /// Location multiplier applied
    pub location_factor: f64,

    /// Quality multiplier applied
    pub quality_factor: f64,

    /// Takeoff detail; present in itemized mode only
    pub breakdown: Option<ItemizedBreakdown>,

    /// Final figure after multipliers (PKR)
    pub total_cost_pkr: f64,

    /// total / covered area (PKR per sqft)
    pub effective_rate_per_sqft: f64,
}

/// Estimate construction cost for a building.
///
/// This is a pure function over the input and the rate book.
///
/// # Arguments
///
/// * `input` - Footprint, floors, tiers, mode
/// * `settings` - Rate book supplying prices, labor and multipliers
///
/// # Returns
///
/// * `Ok(BuildingResult)` - Totals and, in itemized mode, the takeoff
/// * `Err(EstimateError)` - Structured error if inputs are invalid
pub fn calculate(input: &BuildingInput, settings: &Settings) -> EstimateResult<BuildingResult> {
    input.validate()?;

    let covered = input.covered_area_sqft();
    let location_factor = input.location.factor(&settings.assumptions);
    let quality_factor = input.quality.factor(&settings.assumptions);
    let multiplier = location_factor * quality_factor;

    let (breakdown, total_cost_pkr) = match input.mode {
        EstimateMode::Quick => {
            let base = covered * settings.pricing.price_per_sqft;
            (None, base * multiplier)
        }
        EstimateMode::Itemized => {
            let pricing = &settings.pricing;

            let bricks_qty = covered * BRICKS_PER_SQFT;
            let bricks_cost_pkr = bricks_qty * pricing.brick_price;

            let cement_bags = covered * CEMENT_BAGS_PER_SQFT;
            let cement_cost_pkr = cement_bags * pricing.cement_price_per_bag;

            let steel_tons = covered * STEEL_TONS_PER_SQFT;
            let steel_cost_pkr = steel_tons * pricing.steel_price_per_ton;

            let sand_cft = covered * SAND_CFT_PER_SQFT;
            let sand_cost_pkr = sand_cft * pricing.sand_price_per_cft;

            let materials_cost_pkr =
                bricks_cost_pkr + cement_cost_pkr + steel_cost_pkr + sand_cost_pkr;

            let labor_days = covered / LABOR_SQFT_PER_CREW_DAY;
            let labor_cost_pkr = labor_days * pricing.labor_cost_per_day;

            let foundation_cost_pkr =
                input.footprint_sqft * settings.assumptions.foundation_cost_per_sqft;

            let subtotal_pkr = materials_cost_pkr + labor_cost_pkr + foundation_cost_pkr;
            let total = subtotal_pkr * multiplier;

            (
                Some(ItemizedBreakdown {
                    bricks_qty,
                    bricks_cost_pkr,
                    cement_bags,
                    cement_cost_pkr,
                    steel_tons,
                    steel_cost_pkr,
                    sand_cft,
                    sand_cost_pkr,
                    materials_cost_pkr,
                    labor_days,
                    labor_cost_pkr,
                    foundation_cost_pkr,
                    subtotal_pkr,
                }),
                total,
            )
        }
    };

    Ok(BuildingResult {
        mode: input.mode,
        covered_area_sqft: covered,
        location_factor,
        quality_factor,
        breakdown,
        total_cost_pkr,
        effective_rate_per_sqft: total_cost_pkr / covered,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_house() -> BuildingInput {
        BuildingInput {
            label: "5 marla house".to_string(),
            footprint_sqft: 1000.0,
            floors: 1,
            location: LocationTier::Suburban,
            quality: QualityTier::Standard,
            mode: EstimateMode::Quick,
        }
    }

    #[test]
    fn test_quick_mode_base_case() {
        let settings = Settings::default();
        let result = calculate(&test_house(), &settings).unwrap();

        // Suburban standard has factor 1.0 each: 1000 * 2500 = 2,500,000
        assert_eq!(result.total_cost_pkr, 2_500_000.0);
        assert_eq!(result.effective_rate_per_sqft, 2500.0);
        assert!(result.breakdown.is_none());
    }

    #[test]
    fn test_factors_scale_quick_total() {
        let settings = Settings::default();
        let mut house = test_house();
        house.location = LocationTier::Urban;
        house.quality = QualityTier::Luxury;
        let result = calculate(&house, &settings).unwrap();

        // 2,500,000 * 1.2 * 1.6
        assert!((result.total_cost_pkr - 4_800_000.0).abs() < 1.0);
        assert_eq!(result.location_factor, 1.2);
        assert_eq!(result.quality_factor, 1.6);
    }

    #[test]
    fn test_doubling_area_doubles_quick_total() {
        let settings = Settings::default();
        let small = calculate(&test_house(), &settings).unwrap();

        let mut double = test_house();
        double.footprint_sqft = 2000.0;
        let big = calculate(&double, &settings).unwrap();

        assert!((big.total_cost_pkr - 2.0 * small.total_cost_pkr).abs() < 1e-6);
    }

    #[test]
    fn test_itemized_takeoff_quantities() {
        let settings = Settings::default();
        let mut house = test_house();
        house.mode = EstimateMode::Itemized;
        let result = calculate(&house, &settings).unwrap();
        let breakdown = result.breakdown.expect("itemized mode carries a breakdown");

        assert_eq!(breakdown.bricks_qty, 55_000.0);
        assert_eq!(breakdown.cement_bags, 400.0);
        assert!((breakdown.steel_tons - 3.5).abs() < 1e-9);
        assert_eq!(breakdown.sand_cft, 1800.0);

        let expected_materials = 55_000.0 * 15.0 // bricks
            + 400.0 * 1250.0 // cement
            + 3.5 * 265_000.0 // steel
            + 1800.0 * 90.0; // sand
        assert!((breakdown.materials_cost_pkr - expected_materials).abs() < 1e-6);
    }

    #[test]
    fn test_itemized_labor_and_foundation() {
        let settings = Settings::default();
        let mut house = test_house();
        house.mode = EstimateMode::Itemized;
        let result = calculate(&house, &settings).unwrap();
        let breakdown = result.breakdown.unwrap();

        // 1000 / 12 crew-days at 1500/day
        assert!((breakdown.labor_days - 1000.0 / 12.0).abs() < 1e-9);
        assert!(
            (breakdown.labor_cost_pkr - breakdown.labor_days * 1500.0).abs() < 1e-6
        );
        // Foundation on the footprint at 500/sqft
        assert_eq!(breakdown.foundation_cost_pkr, 500_000.0);

        let expected_subtotal = breakdown.materials_cost_pkr
            + breakdown.labor_cost_pkr
            + breakdown.foundation_cost_pkr;
        assert!((breakdown.subtotal_pkr - expected_subtotal).abs() < 1e-6);
        assert!((result.total_cost_pkr - expected_subtotal).abs() < 1e-6);
    }

    #[test]
    fn test_second_floor_skips_foundation() {
        let settings = Settings::default();
        let mut single = test_house();
        single.mode = EstimateMode::Itemized;
        let mut double = single.clone();
        double.floors = 2;

        let one = calculate(&single, &settings).unwrap();
        let two = calculate(&double, &settings).unwrap();

        let one_breakdown = one.breakdown.unwrap();
        let two_breakdown = two.breakdown.unwrap();

        // Materials and labor double, foundation does not
        assert!(
            (two_breakdown.materials_cost_pkr - 2.0 * one_breakdown.materials_cost_pkr).abs()
                < 1e-6
        );
        assert_eq!(
            two_breakdown.foundation_cost_pkr,
            one_breakdown.foundation_cost_pkr
        );
        assert!(two.total_cost_pkr > one.total_cost_pkr);
        // Per-sqft rate drops when the foundation amortizes over two floors
        assert!(two.effective_rate_per_sqft < one.effective_rate_per_sqft);
    }

    #[test]
    fn test_monotonic_in_factors() {
        let mut settings = Settings::default();
        settings.assumptions.location_factors.urban = 1.5;

        let mut rural = test_house();
        rural.location = LocationTier::Rural;
        let mut urban = test_house();
        urban.location = LocationTier::Urban;

        let low = calculate(&rural, &settings).unwrap();
        let high = calculate(&urban, &settings).unwrap();
        assert!(high.total_cost_pkr > low.total_cost_pkr);
    }

    #[test]
    fn test_invalid_inputs() {
        let settings = Settings::default();

        let mut no_footprint = test_house();
        no_footprint.footprint_sqft = -10.0;
        assert!(calculate(&no_footprint, &settings).is_err());

        let mut no_floors = test_house();
        no_floors.floors = 0;
        assert!(calculate(&no_floors, &settings).is_err());

        let mut tower = test_house();
        tower.floors = 30;
        assert!(calculate(&tower, &settings).is_err());
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut house = test_house();
        house.mode = EstimateMode::Itemized;
        let json = serde_json::to_string_pretty(&house).unwrap();
        assert!(json.contains("\"mode\": \"itemized\""));
        assert!(json.contains("\"location\": \"suburban\""));

        let roundtrip: BuildingInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.footprint_sqft, house.footprint_sqft);
        assert_eq!(roundtrip.mode, house.mode);
    }
}
