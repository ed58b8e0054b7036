//! # Unit Types
//!
//! Type-safe wrappers for the units used in construction estimation.
//! These provide compile-time safety against unit confusion while
//! remaining lightweight (just f64 wrappers).
//!
//! ## Design Philosophy
//!
//! We use simple newtype wrappers rather than a full units library because:
//! - Cost estimation uses a small, fixed set of units
//! - We want JSON serialization to be clean (just numbers)
//! - Minimal runtime overhead
//!
//! ## Units
//!
//! Tameer works in the units Pakistani construction actually quotes in:
//! - Length: feet (ft), inches (in)
//! - Area: square feet (sqft), square yards, marla, kanal, square meters, acres
//! - Volume: cubic feet (cft), imperial gallons, liters
//! - Cooling: BTU/hr, refrigeration tons
//! - Money: Pakistani rupees (PKR)
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::units::{Marla, SqFt, Rupees};
//!
//! let plot = Marla(5.0);
//! let area: SqFt = plot.into();
//! assert_eq!(area.0, 1361.25);
//!
//! let cost = Rupees(2_500_000.0);
//! assert_eq!(cost.formatted(), "PKR 2,500,000");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Square feet per marla (Punjab standard marla)
pub const SQFT_PER_MARLA: f64 = 272.25;

/// Marla per kanal
pub const MARLA_PER_KANAL: f64 = 20.0;

/// Square feet per square yard
pub const SQFT_PER_SQYD: f64 = 9.0;

/// Square feet per square meter
pub const SQFT_PER_SQM: f64 = 10.7639;

/// Square feet per acre
pub const SQFT_PER_ACRE: f64 = 43_560.0;

/// Imperial gallons per cubic foot
pub const GALLONS_PER_CFT: f64 = 6.228_84;

/// Liters per cubic foot
pub const LITERS_PER_CFT: f64 = 28.3168;

/// BTU/hr per refrigeration ton
pub const BTU_PER_TON: f64 = 12_000.0;

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqFt(pub f64);

/// Area in square yards (gaz)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqYd(pub f64);

/// Area in marla (272.25 sqft, Punjab standard)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marla(pub f64);

/// Area in kanal (20 marla)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kanal(pub f64);

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqM(pub f64);

/// Area in acres
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Acre(pub f64);

impl From<SqFt> for SqYd {
    fn from(sqft: SqFt) -> Self {
        SqYd(sqft.0 / SQFT_PER_SQYD)
    }
}

impl From<SqYd> for SqFt {
    fn from(sqyd: SqYd) -> Self {
        SqFt(sqyd.0 * SQFT_PER_SQYD)
    }
}

impl From<SqFt> for Marla {
    fn from(sqft: SqFt) -> Self {
        Marla(sqft.0 / SQFT_PER_MARLA)
    }
}

impl From<Marla> for SqFt {
    fn from(marla: Marla) -> Self {
        SqFt(marla.0 * SQFT_PER_MARLA)
    }
}

impl From<Marla> for Kanal {
    fn from(marla: Marla) -> Self {
        Kanal(marla.0 / MARLA_PER_KANAL)
    }
}

impl From<Kanal> for Marla {
    fn from(kanal: Kanal) -> Self {
        Marla(kanal.0 * MARLA_PER_KANAL)
    }
}

impl From<SqFt> for Kanal {
    fn from(sqft: SqFt) -> Self {
        Kanal(sqft.0 / (SQFT_PER_MARLA * MARLA_PER_KANAL))
    }
}

impl From<Kanal> for SqFt {
    fn from(kanal: Kanal) -> Self {
        SqFt(kanal.0 * SQFT_PER_MARLA * MARLA_PER_KANAL)
    }
}

impl From<SqFt> for SqM {
    fn from(sqft: SqFt) -> Self {
        SqM(sqft.0 / SQFT_PER_SQM)
    }
}

impl From<SqM> for SqFt {
    fn from(sqm: SqM) -> Self {
        SqFt(sqm.0 * SQFT_PER_SQM)
    }
}

impl From<SqFt> for Acre {
    fn from(sqft: SqFt) -> Self {
        Acre(sqft.0 / SQFT_PER_ACRE)
    }
}

impl From<Acre> for SqFt {
    fn from(acre: Acre) -> Self {
        SqFt(acre.0 * SQFT_PER_ACRE)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicFt(pub f64);

/// Volume in imperial gallons
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gallons(pub f64);

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

impl From<CubicFt> for Gallons {
    fn from(cft: CubicFt) -> Self {
        Gallons(cft.0 * GALLONS_PER_CFT)
    }
}

impl From<Gallons> for CubicFt {
    fn from(gal: Gallons) -> Self {
        CubicFt(gal.0 / GALLONS_PER_CFT)
    }
}

impl From<CubicFt> for Liters {
    fn from(cft: CubicFt) -> Self {
        Liters(cft.0 * LITERS_PER_CFT)
    }
}

impl From<Liters> for CubicFt {
    fn from(l: Liters) -> Self {
        CubicFt(l.0 / LITERS_PER_CFT)
    }
}

// ============================================================================
// Cooling Units
// ============================================================================

/// Cooling load in BTU per hour
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Btu(pub f64);

/// Cooling capacity in refrigeration tons (12,000 BTU/hr each)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tons(pub f64);

impl From<Btu> for Tons {
    fn from(btu: Btu) -> Self {
        Tons(btu.0 / BTU_PER_TON)
    }
}

impl From<Tons> for Btu {
    fn from(tons: Tons) -> Self {
        Btu(tons.0 * BTU_PER_TON)
    }
}

// ============================================================================
// Money
// ============================================================================

/// Money in Pakistani rupees (PKR)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupees(pub f64);

impl Rupees {
    /// Format with a currency prefix and thousands separators,
    /// rounded to the whole rupee (e.g., "PKR 2,500,000").
    pub fn formatted(self) -> String {
        let rounded = self.0.round();
        let negative = rounded < 0.0;
        let digits = format!("{:.0}", rounded.abs());

        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }

        if negative {
            format!("PKR -{}", grouped)
        } else {
            format!("PKR {}", grouped)
        }
    }
}

impl std::fmt::Display for Rupees {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.formatted())
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(SqFt);
impl_arithmetic!(SqYd);
impl_arithmetic!(Marla);
impl_arithmetic!(Kanal);
impl_arithmetic!(SqM);
impl_arithmetic!(Acre);
impl_arithmetic!(CubicFt);
impl_arithmetic!(Gallons);
impl_arithmetic!(Liters);
impl_arithmetic!(Btu);
impl_arithmetic!(Tons);
impl_arithmetic!(Rupees);
