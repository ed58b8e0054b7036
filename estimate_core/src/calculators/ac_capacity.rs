//! # AC Capacity Calculator
//!
//! Sizes air conditioning for a room from floor area, occupancy and heat
//! gain flags, then maps the load onto the unit sizes actually sold.
//!
//! ## Assumptions
//!
//! - 25 BTU/hr per sqft base load (hot-climate rule of thumb)
//! - +600 BTU/hr per occupant beyond two
//! - +10% for strong sun exposure, +4000 BTU/hr for kitchens
//! - Available unit sizes: 0.75, 1.0, 1.5, 2.0 and 4.0 ton
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::ac_capacity::{AcCapacityInput, calculate};
//!
//! let input = AcCapacityInput {
//!     label: "Master bedroom".to_string(),
//!     area_sqft: 220.0,
//!     occupants: 2,
//!     sunny: false,
//!     kitchen: false,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.recommended_size_tons, 0.75);
//! assert_eq!(result.unit_count, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Btu, Tons};

/// Base cooling load per sqft of floor area (BTU/hr)
const BTU_PER_SQFT: f64 = 25.0;

/// Extra load per occupant beyond the first two (BTU/hr)
const BTU_PER_EXTRA_OCCUPANT: f64 = 600.0;

/// Load multiplier for strong sun exposure
const SUN_EXPOSURE_FACTOR: f64 = 1.10;

/// Extra load for kitchen heat (BTU/hr)
const KITCHEN_BTU: f64 = 4000.0;

/// Unit sizes available in the market (tons)
const UNIT_SIZES_TONS: [f64; 5] = [0.75, 1.0, 1.5, 2.0, 4.0];

fn default_occupants() -> u32 {
    2
}

/// Input parameters for the AC capacity calculator.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Master bedroom",
///   "area_sqft": 220.0,
///   "occupants": 2,
///   "sunny": false,
///   "kitchen": false
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcCapacityInput {
    /// User label for this room (e.g., "Master bedroom")
    pub label: String,

    /// Floor area in square feet
    pub area_sqft: f64,

    /// Regular occupants (default 2)
    #[serde(default = "default_occupants")]
    pub occupants: u32,

    /// Room gets strong afternoon sun or is on the top floor
    #[serde(default)]
    pub sunny: bool,

    /// Room is a kitchen or has an open kitchen
    #[serde(default)]
    pub kitchen: bool,
}

impl AcCapacityInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.area_sqft <= 0.0 {
            return Err(EstimateError::invalid_input(
                "area_sqft",
                self.area_sqft.to_string(),
                "Area must be positive",
            ));
        }
        if self.area_sqft > 10_000.0 {
            return Err(EstimateError::invalid_input(
                "area_sqft",
                self.area_sqft.to_string(),
                "Area exceeds 10,000 sqft - size halls as multiple zones",
            ));
        }
        Ok(())
    }
}

/// Results from the AC capacity calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "btu_required": 5500.0,
///   "tons_required": 0.46,
///   "recommended_size_tons": 0.75,
///   "unit_count": 1
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcCapacityResult {
    /// Total cooling load (BTU/hr)
    pub btu_required: f64,

    /// Load expressed in refrigeration tons
    pub tons_required: f64,

    /// Smallest market unit size covering the load (tons)
    pub recommended_size_tons: f64,

    /// How many units of that size to install
    pub unit_count: u32,
}

/// Calculate the cooling load and recommend a unit size.
pub fn calculate(input: &AcCapacityInput) -> EstimateResult<AcCapacityResult> {
    input.validate()?;

    let mut btu = input.area_sqft * BTU_PER_SQFT;

    if input.occupants > 2 {
        btu += f64::from(input.occupants - 2) * BTU_PER_EXTRA_OCCUPANT;
    }
    if input.sunny {
        btu *= SUN_EXPOSURE_FACTOR;
    }
    if input.kitchen {
        btu += KITCHEN_BTU;
    }

    let tons = Tons::from(Btu(btu));

    let (recommended_size_tons, unit_count) =
        match UNIT_SIZES_TONS.iter().find(|&&size| size >= tons.0) {
            Some(&size) => (size, 1),
            // Load beyond the largest unit: split across 2-ton units
            None => (2.0, (tons.0 / 2.0).ceil() as u32),
        };

    Ok(AcCapacityResult {
        btu_required: btu,
        tons_required: tons.0,
        recommended_size_tons,
        unit_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_room() -> AcCapacityInput {
        AcCapacityInput {
            label: "Master bedroom".to_string(),
            area_sqft: 220.0,
            occupants: 2,
            sunny: false,
            kitchen: false,
        }
    }

    #[test]
    fn test_base_load() {
        let result = calculate(&test_room()).unwrap();
        // 220 * 25 = 5500 BTU
        assert_eq!(result.btu_required, 5500.0);
        assert!((result.tons_required - 5500.0 / 12_000.0).abs() < 1e-9);
        assert_eq!(result.recommended_size_tons, 0.75);
        assert_eq!(result.unit_count, 1);
    }

    #[test]
    fn test_extra_occupants() {
        let mut room = test_room();
        room.occupants = 5;
        let result = calculate(&room).unwrap();
        // 5500 + 3 * 600 = 7300 BTU
        assert_eq!(result.btu_required, 7300.0);
    }

    #[test]
    fn test_sun_and_kitchen_adjustments() {
        let mut room = test_room();
        room.sunny = true;
        let sunny = calculate(&room).unwrap();
        assert!((sunny.btu_required - 5500.0 * 1.10).abs() < 1e-9);

        room.sunny = false;
        room.kitchen = true;
        let kitchen = calculate(&room).unwrap();
        assert_eq!(kitchen.btu_required, 9500.0);
    }

    #[test]
    fn test_unit_size_selection() {
        let mut room = test_room();
        room.area_sqft = 700.0;
        let result = calculate(&room).unwrap();
        // 17500 BTU = 1.46 tons -> 1.5 ton unit
        assert_eq!(result.recommended_size_tons, 1.5);
        assert_eq!(result.unit_count, 1);
    }

    #[test]
    fn test_hall_splits_into_multiple_units() {
        let mut hall = test_room();
        hall.area_sqft = 3000.0;
        let result = calculate(&hall).unwrap();
        // 75000 BTU = 6.25 tons -> 4 x 2-ton units
        assert_eq!(result.recommended_size_tons, 2.0);
        assert_eq!(result.unit_count, 4);
    }

    #[test]
    fn test_monotonic_in_area() {
        let small = calculate(&test_room()).unwrap();
        let mut bigger = test_room();
        bigger.area_sqft = 440.0;
        let big = calculate(&bigger).unwrap();
        assert_eq!(big.btu_required, 2.0 * small.btu_required);
    }

    #[test]
    fn test_invalid_inputs() {
        let mut zero = test_room();
        zero.area_sqft = 0.0;
        assert!(calculate(&zero).is_err());

        let mut huge = test_room();
        huge.area_sqft = 20_000.0;
        assert!(calculate(&huge).is_err());
    }

    #[test]
    fn test_occupants_default_on_deserialize() {
        let input: AcCapacityInput =
            serde_json::from_str(r#"{ "label": "Room", "area_sqft": 150.0 }"#).unwrap();
        assert_eq!(input.occupants, 2);
        assert!(!input.sunny);
    }
}
