//! # Plot Area Converter
//!
//! Converts a plot or room size into every unit Pakistani property deals
//! quote in: square feet, square yards, marla, kanal, square meters, acres.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::area::{AreaInput, calculate};
//!
//! let input = AreaInput {
//!     label: "Corner plot".to_string(),
//!     length_ft: Some(30.0),
//!     width_ft: Some(60.0),
//!     area_sqft: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.sqft, 1800.0);
//! assert!((result.marla - 6.61).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::units::{Acre, Kanal, Marla, SqFt, SqM, SqYd};

/// Input for the area converter.
///
/// Give either `length_ft` + `width_ft` or a direct `area_sqft` figure;
/// dimensions win when both are present.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Corner plot", "length_ft": 30.0, "width_ft": 60.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaInput {
    /// User label for this conversion (e.g., "Corner plot")
    pub label: String,

    /// Plot length in feet
    #[serde(default)]
    pub length_ft: Option<f64>,

    /// Plot width in feet
    #[serde(default)]
    pub width_ft: Option<f64>,

    /// Direct area in square feet (used when dimensions are absent)
    #[serde(default)]
    pub area_sqft: Option<f64>,
}

impl AreaInput {
    /// Validate input parameters.
    pub fn validate(&self) -> EstimateResult<()> {
        match (self.length_ft, self.width_ft, self.area_sqft) {
            (Some(l), Some(w), _) => {
                if l <= 0.0 {
                    return Err(EstimateError::invalid_input(
                        "length_ft",
                        l.to_string(),
                        "Length must be positive",
                    ));
                }
                if w <= 0.0 {
                    return Err(EstimateError::invalid_input(
                        "width_ft",
                        w.to_string(),
                        "Width must be positive",
                    ));
                }
                Ok(())
            }
            (None, None, Some(a)) => {
                if a <= 0.0 {
                    return Err(EstimateError::invalid_input(
                        "area_sqft",
                        a.to_string(),
                        "Area must be positive",
                    ));
                }
                Ok(())
            }
            (Some(_), None, _) => Err(EstimateError::missing_field("width_ft")),
            (None, Some(_), _) => Err(EstimateError::missing_field("length_ft")),
            (None, None, None) => Err(EstimateError::missing_field("area_sqft")),
        }
    }

    /// The area in square feet after resolving the two input forms.
    pub fn resolved_sqft(&self) -> f64 {
        match (self.length_ft, self.width_ft) {
            (Some(l), Some(w)) => l * w,
            _ => self.area_sqft.unwrap_or(0.0),
        }
    }
}

/// The same area expressed in every supported unit.
///
/// ## JSON Example
///
/// ```json
/// {
///   "sqft": 1800.0,
///   "sqyd": 200.0,
///   "marla": 6.61,
///   "kanal": 0.33,
///   "sqm": 167.23,
///   "acre": 0.041
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AreaResult {
    pub sqft: f64,
    pub sqyd: f64,
    pub marla: f64,
    pub kanal: f64,
    pub sqm: f64,
    pub acre: f64,
}

/// Convert an area into all supported units.
pub fn calculate(input: &AreaInput) -> EstimateResult<AreaResult> {
    input.validate()?;

    let sqft = SqFt(input.resolved_sqft());
    Ok(AreaResult {
        sqft: sqft.0,
        sqyd: SqYd::from(sqft).0,
        marla: Marla::from(sqft).0,
        kanal: Kanal::from(sqft).0,
        sqm: SqM::from(sqft).0,
        acre: Acre::from(sqft).0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_resolve() {
        let input = AreaInput {
            label: "Plot".to_string(),
            length_ft: Some(30.0),
            width_ft: Some(60.0),
            area_sqft: None,
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.sqft, 1800.0);
        assert_eq!(result.sqyd, 200.0);
    }

    #[test]
    fn test_direct_area() {
        let input = AreaInput {
            label: "5 marla".to_string(),
            length_ft: None,
            width_ft: None,
            area_sqft: Some(1361.25),
        };
        let result = calculate(&input).unwrap();
        assert!((result.marla - 5.0).abs() < 1e-9);
        assert!((result.kanal - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_dimensions_win_over_direct_area() {
        let input = AreaInput {
            label: "Both".to_string(),
            length_ft: Some(10.0),
            width_ft: Some(10.0),
            area_sqft: Some(5000.0),
        };
        let result = calculate(&input).unwrap();
        assert_eq!(result.sqft, 100.0);
    }

    #[test]
    fn test_missing_and_invalid_inputs() {
        let empty = AreaInput {
            label: "Empty".to_string(),
            length_ft: None,
            width_ft: None,
            area_sqft: None,
        };
        assert_eq!(
            calculate(&empty).unwrap_err().error_code(),
            "MISSING_FIELD"
        );

        let half = AreaInput {
            label: "Half".to_string(),
            length_ft: Some(30.0),
            width_ft: None,
            area_sqft: None,
        };
        assert!(calculate(&half).is_err());

        let negative = AreaInput {
            label: "Negative".to_string(),
            length_ft: Some(-30.0),
            width_ft: Some(60.0),
            area_sqft: None,
        };
        assert_eq!(
            calculate(&negative).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_acre_conversion() {
        let input = AreaInput {
            label: "One acre".to_string(),
            length_ft: None,
            width_ft: None,
            area_sqft: Some(43_560.0),
        };
        let result = calculate(&input).unwrap();
        assert!((result.acre - 1.0).abs() < 1e-9);
    }
}
