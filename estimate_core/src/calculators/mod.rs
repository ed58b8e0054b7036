//! # Cost Calculators
//!
//! This module contains all estimation tools. Each calculator follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input, ...) -> Result<*Result, EstimateError>` - Pure function
//!
//! Calculators that price anything take the [`Settings`] rate book;
//! pure unit/sizing tools take only their input.
//!
//! ## Available Calculators
//!
//! - [`building`] - General construction cost (quick and itemized)
//! - [`area`] - Plot area unit conversion
//! - [`paint`] - Paint quantity and cost
//! - [`water_tank`] - Tank capacity vs household demand
//! - [`flooring`] - Tile count and flooring cost
//! - [`ac_capacity`] - AC sizing

pub mod ac_capacity;
pub mod area;
pub mod building;
pub mod flooring;
pub mod paint;
pub mod water_tank;

use serde::{Deserialize, Serialize};

use crate::errors::EstimateResult;
use crate::settings::Settings;

// Re-export commonly used types
pub use ac_capacity::{AcCapacityInput, AcCapacityResult};
pub use area::{AreaInput, AreaResult};
pub use building::{BuildingInput, BuildingResult, EstimateMode};
pub use flooring::{FlooringInput, FlooringResult};
pub use paint::{PaintInput, PaintResult};
pub use water_tank::{TankShape, WaterTankInput, WaterTankResult};

/// Enum wrapper for all calculator inputs.
///
/// This allows storing heterogeneous calculations in a single collection
/// (an estimate document) while maintaining type safety and clean
/// serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateItem {
    /// General building cost estimate
    Building(BuildingInput),
    /// Plot area conversion
    Area(AreaInput),
    /// Paint quantity and cost
    Paint(PaintInput),
    /// Water tank capacity
    WaterTank(WaterTankInput),
    /// Tile count and flooring cost
    Flooring(FlooringInput),
    /// AC sizing
    AcCapacity(AcCapacityInput),
}

impl EstimateItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            EstimateItem::Building(i) => &i.label,
            EstimateItem::Area(i) => &i.label,
            EstimateItem::Paint(i) => &i.label,
            EstimateItem::WaterTank(i) => &i.label,
            EstimateItem::Flooring(i) => &i.label,
            EstimateItem::AcCapacity(i) => &i.label,
        }
    }

    /// Get the calculator type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            EstimateItem::Building(_) => "Building",
            EstimateItem::Area(_) => "Area",
            EstimateItem::Paint(_) => "Paint",
            EstimateItem::WaterTank(_) => "Water Tank",
            EstimateItem::Flooring(_) => "Flooring",
            EstimateItem::AcCapacity(_) => "AC Capacity",
        }
    }

    /// Run the matching calculator against the rate book.
    pub fn evaluate(&self, settings: &Settings) -> EstimateResult<EstimateOutput> {
        Ok(match self {
            EstimateItem::Building(input) => {
                EstimateOutput::Building(building::calculate(input, settings)?)
            }
            EstimateItem::Area(input) => EstimateOutput::Area(area::calculate(input)?),
            EstimateItem::Paint(input) => {
                EstimateOutput::Paint(paint::calculate(input, settings)?)
            }
            EstimateItem::WaterTank(input) => {
                EstimateOutput::WaterTank(water_tank::calculate(input)?)
            }
            EstimateItem::Flooring(input) => {
                EstimateOutput::Flooring(flooring::calculate(input, settings)?)
            }
            EstimateItem::AcCapacity(input) => {
                EstimateOutput::AcCapacity(ac_capacity::calculate(input)?)
            }
        })
    }
}

/// Enum wrapper for all calculator results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EstimateOutput {
    Building(BuildingResult),
    Area(AreaResult),
    Paint(PaintResult),
    WaterTank(WaterTankResult),
    Flooring(FlooringResult),
    AcCapacity(AcCapacityResult),
}

impl EstimateOutput {
    /// The rupee cost of this result, for calculators that price anything.
    ///
    /// Sizing and conversion tools (area, water tank, AC) return `None`.
    pub fn cost_pkr(&self) -> Option<f64> {
        match self {
            EstimateOutput::Building(r) => Some(r.total_cost_pkr),
            EstimateOutput::Paint(r) => Some(r.paint_cost_pkr),
            EstimateOutput::Flooring(r) => Some(r.total_cost_pkr),
            EstimateOutput::Area(_)
            | EstimateOutput::WaterTank(_)
            | EstimateOutput::AcCapacity(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{LocationTier, QualityTier};

    #[test]
    fn test_item_dispatch_and_cost() {
        let settings = Settings::default();

        let item = EstimateItem::Building(BuildingInput {
            label: "House".to_string(),
            footprint_sqft: 1000.0,
            floors: 1,
            location: LocationTier::Suburban,
            quality: QualityTier::Standard,
            mode: EstimateMode::Quick,
        });

        assert_eq!(item.label(), "House");
        assert_eq!(item.calc_type(), "Building");

        let output = item.evaluate(&settings).unwrap();
        assert_eq!(output.cost_pkr(), Some(2_500_000.0));
    }

    #[test]
    fn test_sizing_tools_have_no_cost() {
        let settings = Settings::default();
        let item = EstimateItem::Area(AreaInput {
            label: "Plot".to_string(),
            length_ft: Some(30.0),
            width_ft: Some(60.0),
            area_sqft: None,
        });
        let output = item.evaluate(&settings).unwrap();
        assert_eq!(output.cost_pkr(), None);
    }

    #[test]
    fn test_item_serialization_tags() {
        let item = EstimateItem::Paint(PaintInput {
            label: "Room".to_string(),
            length_ft: 10.0,
            width_ft: 10.0,
            height_ft: 9.0,
            doors: 1,
            windows: 1,
            include_ceiling: false,
            coats: 2,
            coverage_sqft_per_liter: None,
        });
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"type\":\"Paint\""));

        let roundtrip: EstimateItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.calc_type(), "Paint");
    }
}
