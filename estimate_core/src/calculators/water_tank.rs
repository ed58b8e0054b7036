//! # Water Tank Capacity Calculator
//!
//! Converts tank geometry into storage capacity and checks it against a
//! household's daily demand.
//!
//! ## Assumptions
//!
//! - Rectangular and cylindrical tanks, inside dimensions in feet
//! - Default demand 150 liters per person per day
//! - Recommended storage covers two days of demand
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::water_tank::{TankShape, WaterTankInput, calculate};
//!
//! let input = WaterTankInput {
//!     label: "Roof tank".to_string(),
//!     shape: TankShape::Rectangular {
//!         length_ft: 6.0,
//!         width_ft: 4.0,
//!         depth_ft: 4.0,
//!     },
//!     household_size: 6,
//!     daily_demand_liters_per_person: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.volume_cft, 96.0);
//! assert!(result.meets_recommendation);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{CubicFt, Gallons, Liters};

/// Default daily water demand per person (liters)
const DEFAULT_DEMAND_LITERS_PER_PERSON: f64 = 150.0;

/// Days of demand a tank should cover
const RECOMMENDED_STORAGE_DAYS: f64 = 2.0;

/// Tank geometry, inside dimensions in feet.
///
/// ## JSON Examples
///
/// ```json
/// { "shape": "rectangular", "length_ft": 6.0, "width_ft": 4.0, "depth_ft": 4.0 }
/// ```
///
/// ```json
/// { "shape": "cylindrical", "diameter_ft": 4.0, "height_ft": 5.0 }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum TankShape {
    Rectangular {
        length_ft: f64,
        width_ft: f64,
        depth_ft: f64,
    },
    Cylindrical {
        diameter_ft: f64,
        height_ft: f64,
    },
}

impl TankShape {
    /// Inside volume in cubic feet.
    pub fn volume_cft(&self) -> f64 {
        match self {
            TankShape::Rectangular {
                length_ft,
                width_ft,
                depth_ft,
            } => length_ft * width_ft * depth_ft,
            TankShape::Cylindrical {
                diameter_ft,
                height_ft,
            } => std::f64::consts::PI * (diameter_ft / 2.0).powi(2) * height_ft,
        }
    }

    fn validate(&self) -> EstimateResult<()> {
        let dims = match self {
            TankShape::Rectangular {
                length_ft,
                width_ft,
                depth_ft,
            } => vec![
                ("length_ft", *length_ft),
                ("width_ft", *width_ft),
                ("depth_ft", *depth_ft),
            ],
            TankShape::Cylindrical {
                diameter_ft,
                height_ft,
            } => vec![("diameter_ft", *diameter_ft), ("height_ft", *height_ft)],
        };
        for (field, value) in dims {
            if value <= 0.0 {
                return Err(EstimateError::invalid_input(
                    field,
                    value.to_string(),
                    "Dimension must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Input parameters for the water tank calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTankInput {
    /// User label for this tank (e.g., "Roof tank")
    pub label: String,

    /// Tank geometry
    pub shape: TankShape,

    /// Number of people the tank serves
    pub household_size: u32,

    /// Demand override in liters per person per day (default 150)
    #[serde(default)]
    pub daily_demand_liters_per_person: Option<f64>,
}

impl WaterTankInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        self.shape.validate()?;
        if self.household_size == 0 {
            return Err(EstimateError::invalid_input(
                "household_size",
                self.household_size.to_string(),
                "Household must have at least one person",
            ));
        }
        if let Some(demand) = self.daily_demand_liters_per_person {
            if demand <= 0.0 {
                return Err(EstimateError::invalid_input(
                    "daily_demand_liters_per_person",
                    demand.to_string(),
                    "Demand must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Results from the water tank calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "volume_cft": 96.0,
///   "capacity_gallons": 598.0,
///   "capacity_liters": 2718.4,
///   "daily_demand_liters": 900.0,
///   "days_of_storage": 3.02,
///   "recommended_liters": 1800.0,
///   "meets_recommendation": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaterTankResult {
    /// Inside volume (cft)
    pub volume_cft: f64,

    /// Capacity in imperial gallons
    pub capacity_gallons: f64,

    /// Capacity in liters
    pub capacity_liters: f64,

    /// Household demand per day (liters)
    pub daily_demand_liters: f64,

    /// How many days the full tank lasts at that demand
    pub days_of_storage: f64,

    /// Recommended minimum capacity for the household (liters)
    pub recommended_liters: f64,

    /// Whether the tank covers the recommended storage days
    pub meets_recommendation: bool,
}

/// Calculate tank capacity and compare it against household demand.
pub fn calculate(input: &WaterTankInput) -> EstimateResult<WaterTankResult> {
    input.validate()?;

    let volume = CubicFt(input.shape.volume_cft());
    let gallons = Gallons::from(volume);
    let liters = Liters::from(volume);

    let demand_per_person = input
        .daily_demand_liters_per_person
        .unwrap_or(DEFAULT_DEMAND_LITERS_PER_PERSON);
    let daily_demand_liters = demand_per_person * f64::from(input.household_size);

    let days_of_storage = liters.0 / daily_demand_liters;
    let recommended_liters = daily_demand_liters * RECOMMENDED_STORAGE_DAYS;

    Ok(WaterTankResult {
        volume_cft: volume.0,
        capacity_gallons: gallons.0,
        capacity_liters: liters.0,
        daily_demand_liters,
        days_of_storage,
        recommended_liters,
        meets_recommendation: liters.0 >= recommended_liters,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_tank() -> WaterTankInput {
        WaterTankInput {
            label: "Roof tank".to_string(),
            shape: TankShape::Rectangular {
                length_ft: 6.0,
                width_ft: 4.0,
                depth_ft: 4.0,
            },
            household_size: 6,
            daily_demand_liters_per_person: None,
        }
    }

    #[test]
    fn test_rectangular_volume() {
        let result = calculate(&test_tank()).unwrap();
        assert_eq!(result.volume_cft, 96.0);
        // 96 cft * 28.3168 L/cft = 2718.4 L
        assert!((result.capacity_liters - 2718.4).abs() < 0.1);
        // 96 cft * 6.22884 gal/cft = 598.0 gal
        assert!((result.capacity_gallons - 598.0).abs() < 0.1);
    }

    #[test]
    fn test_cylindrical_volume() {
        let mut input = test_tank();
        input.shape = TankShape::Cylindrical {
            diameter_ft: 4.0,
            height_ft: 5.0,
        };
        let result = calculate(&input).unwrap();
        // pi * 2^2 * 5 = 62.83 cft
        assert!((result.volume_cft - 62.832).abs() < 0.01);
    }

    #[test]
    fn test_storage_days_and_recommendation() {
        let result = calculate(&test_tank()).unwrap();
        // 6 people * 150 L = 900 L/day
        assert_eq!(result.daily_demand_liters, 900.0);
        assert!((result.days_of_storage - 2718.4 / 900.0).abs() < 0.01);
        assert_eq!(result.recommended_liters, 1800.0);
        assert!(result.meets_recommendation);
    }

    #[test]
    fn test_small_tank_fails_recommendation() {
        let mut input = test_tank();
        input.shape = TankShape::Rectangular {
            length_ft: 3.0,
            width_ft: 2.0,
            depth_ft: 2.0,
        };
        let result = calculate(&input).unwrap();
        // 12 cft = 339.8 L against 1800 L recommended
        assert!(!result.meets_recommendation);
    }

    #[test]
    fn test_demand_override() {
        let mut input = test_tank();
        input.daily_demand_liters_per_person = Some(50.0);
        let result = calculate(&input).unwrap();
        assert_eq!(result.daily_demand_liters, 300.0);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut no_people = test_tank();
        no_people.household_size = 0;
        assert!(calculate(&no_people).is_err());

        let mut flat = test_tank();
        flat.shape = TankShape::Rectangular {
            length_ft: 6.0,
            width_ft: 4.0,
            depth_ft: 0.0,
        };
        assert!(calculate(&flat).is_err());

        let mut bad_demand = test_tank();
        bad_demand.daily_demand_liters_per_person = Some(0.0);
        assert!(calculate(&bad_demand).is_err());
    }

    #[test]
    fn test_shape_serialization() {
        let shape = TankShape::Cylindrical {
            diameter_ft: 4.0,
            height_ft: 5.0,
        };
        let json = serde_json::to_string(&shape).unwrap();
        assert!(json.contains("\"shape\":\"cylindrical\""));

        let roundtrip: TankShape = serde_json::from_str(&json).unwrap();
        assert!((roundtrip.volume_cft() - shape.volume_cft()).abs() < 1e-12);
    }
}
