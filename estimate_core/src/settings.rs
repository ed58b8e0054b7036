//! # Settings Data Structures
//!
//! The `Settings` struct is the rate book every calculator prices against:
//! material unit prices, labor cost, location/quality multipliers, branding
//! for reports, and the resource-link library. Settings serialize to `.tmr`
//! (Tameer) files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Settings
//! ├── meta: SettingsMetadata (version, timestamps)
//! ├── branding: Branding (site name, color, logo, report header)
//! ├── pricing: Pricing (per-unit material prices, labor)
//! ├── assumptions: Assumptions (foundation rate, location/quality factors)
//! ├── resources: Vec<Resource> (ordered link library)
//! └── admin: AdminConfig (passcode for the admin gate)
//! ```
//!
//! ## Updates
//!
//! All edits flow through [`Settings::apply`] with partial update structs
//! whose fields are all `Option`. The merge is shallow, one level deeper
//! for the factor tables, and rejects negative numbers before touching any
//! field, so a failed update never leaves the settings half-applied.
//! Applying the same update twice yields the same state as applying it once.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::settings::{Settings, SettingsUpdate, PricingUpdate};
//!
//! let mut settings = Settings::default();
//!
//! let update = SettingsUpdate {
//!     pricing: Some(PricingUpdate {
//!         brick_price: Some(16.5),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! settings.apply(update).unwrap();
//! assert_eq!(settings.pricing.brick_price, 16.5);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{EstimateError, EstimateResult};
use crate::resources::{default_resources, Resource};

/// Current schema version for .tmr files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root settings container.
///
/// This is the top-level struct that gets serialized to `.tmr` files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Settings metadata (version, timestamps)
    pub meta: SettingsMetadata,

    /// Branding shown on reports and in front-ends
    pub branding: Branding,

    /// Per-unit prices all calculators read
    pub pricing: Pricing,

    /// Estimation assumptions (foundation rate, multiplier tables)
    pub assumptions: Assumptions,

    /// Ordered resource-link library
    pub resources: Vec<Resource>,

    /// Admin gate configuration
    pub admin: AdminConfig,
}

impl Settings {
    /// Apply a partial update as a single merge.
    ///
    /// The whole update is validated first; nothing is written if any
    /// carried value is invalid. Merging the same update twice produces
    /// the same state as merging it once.
    pub fn apply(&mut self, update: SettingsUpdate) -> EstimateResult<()> {
        update.validate()?;

        if let Some(branding) = update.branding {
            merge_field(&mut self.branding.site_name, branding.site_name);
            merge_field(&mut self.branding.brand_color, branding.brand_color);
            if branding.logo_url.is_some() {
                self.branding.logo_url = branding.logo_url;
            }
            merge_field(&mut self.branding.report_header, branding.report_header);
        }

        if let Some(pricing) = update.pricing {
            merge_field(&mut self.pricing.price_per_sqft, pricing.price_per_sqft);
            merge_field(
                &mut self.pricing.labor_cost_per_day,
                pricing.labor_cost_per_day,
            );
            merge_field(&mut self.pricing.brick_price, pricing.brick_price);
            merge_field(
                &mut self.pricing.cement_price_per_bag,
                pricing.cement_price_per_bag,
            );
            merge_field(
                &mut self.pricing.steel_price_per_ton,
                pricing.steel_price_per_ton,
            );
            merge_field(
                &mut self.pricing.sand_price_per_cft,
                pricing.sand_price_per_cft,
            );
            merge_field(
                &mut self.pricing.paint_price_per_liter,
                pricing.paint_price_per_liter,
            );
            merge_field(
                &mut self.pricing.tile_price_per_sqft,
                pricing.tile_price_per_sqft,
            );
        }

        if let Some(assumptions) = update.assumptions {
            merge_field(
                &mut self.assumptions.foundation_cost_per_sqft,
                assumptions.foundation_cost_per_sqft,
            );
            if let Some(location) = assumptions.location_factors {
                merge_field(&mut self.assumptions.location_factors.urban, location.urban);
                merge_field(
                    &mut self.assumptions.location_factors.suburban,
                    location.suburban,
                );
                merge_field(&mut self.assumptions.location_factors.rural, location.rural);
            }
            if let Some(quality) = assumptions.quality_factors {
                merge_field(
                    &mut self.assumptions.quality_factors.standard,
                    quality.standard,
                );
                merge_field(
                    &mut self.assumptions.quality_factors.premium,
                    quality.premium,
                );
                merge_field(&mut self.assumptions.quality_factors.luxury, quality.luxury);
            }
        }

        self.touch();
        Ok(())
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Settings {
    fn default() -> Self {
        let now = Utc::now();
        Settings {
            meta: SettingsMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            branding: Branding::default(),
            pricing: Pricing::default(),
            assumptions: Assumptions::default(),
            resources: default_resources(),
            admin: AdminConfig::default(),
        }
    }
}

fn merge_field<T>(target: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *target = v;
    }
}

/// Settings metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the settings document was created
    pub created: DateTime<Utc>,

    /// When the settings were last modified
    pub modified: DateTime<Utc>,
}

/// Branding fields shown on reports and front-ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branding {
    /// Site/company name
    pub site_name: String,

    /// Accent color as a #rrggbb hex string
    pub brand_color: String,

    /// Optional logo location (url or data uri)
    pub logo_url: Option<String>,

    /// Header line printed on estimate reports
    pub report_header: String,
}

impl Default for Branding {
    fn default() -> Self {
        Branding {
            site_name: "Tameer".to_string(),
            brand_color: "#2563eb".to_string(),
            logo_url: None,
            report_header: "Construction Cost Estimate".to_string(),
        }
    }
}

/// Per-unit prices, all in PKR.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pricing {
    /// Base construction rate per sqft of covered area
    pub price_per_sqft: f64,

    /// Labor cost per crew-day
    pub labor_cost_per_day: f64,

    /// Price per brick
    pub brick_price: f64,

    /// Price per 50kg cement bag
    pub cement_price_per_bag: f64,

    /// Price per ton of steel rebar
    pub steel_price_per_ton: f64,

    /// Price per cft of sand
    pub sand_price_per_cft: f64,

    /// Price per liter of paint
    pub paint_price_per_liter: f64,

    /// Tile supply price per sqft
    pub tile_price_per_sqft: f64,
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing {
            price_per_sqft: 2500.0,
            labor_cost_per_day: 1500.0,
            brick_price: 15.0,
            cement_price_per_bag: 1250.0,
            steel_price_per_ton: 265_000.0,
            sand_price_per_cft: 90.0,
            paint_price_per_liter: 800.0,
            tile_price_per_sqft: 250.0,
        }
    }
}

/// Estimation assumptions: foundation rate and the multiplier tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Assumptions {
    /// Foundation cost per sqft of ground-floor footprint
    pub foundation_cost_per_sqft: f64,

    /// Location multipliers
    pub location_factors: LocationFactors,

    /// Quality multipliers
    pub quality_factors: QualityFactors,
}

impl Default for Assumptions {
    fn default() -> Self {
        Assumptions {
            foundation_cost_per_sqft: 500.0,
            location_factors: LocationFactors::default(),
            quality_factors: QualityFactors::default(),
        }
    }
}

/// Cost multipliers by site location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationFactors {
    pub urban: f64,
    pub suburban: f64,
    pub rural: f64,
}

impl Default for LocationFactors {
    fn default() -> Self {
        LocationFactors {
            urban: 1.2,
            suburban: 1.0,
            rural: 0.8,
        }
    }
}

/// Cost multipliers by finishing quality.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QualityFactors {
    pub standard: f64,
    pub premium: f64,
    pub luxury: f64,
}

impl Default for QualityFactors {
    fn default() -> Self {
        QualityFactors {
            standard: 1.0,
            premium: 1.3,
            luxury: 1.6,
        }
    }
}

/// Admin gate configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Passcode required for settings edits
    pub passcode: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        AdminConfig {
            passcode: "tameer-admin".to_string(),
        }
    }
}

// ============================================================================
// Tiers
// ============================================================================

/// Site location tier for the cost multiplier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationTier {
    Urban,
    Suburban,
    Rural,
}

impl LocationTier {
    /// All location tiers for UI selection
    pub const ALL: [LocationTier; 3] = [
        LocationTier::Urban,
        LocationTier::Suburban,
        LocationTier::Rural,
    ];

    /// Lookup the multiplier from the settings table
    pub fn factor(&self, assumptions: &Assumptions) -> f64 {
        match self {
            LocationTier::Urban => assumptions.location_factors.urban,
            LocationTier::Suburban => assumptions.location_factors.suburban,
            LocationTier::Rural => assumptions.location_factors.rural,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.to_lowercase().trim() {
            "urban" | "city" => Ok(LocationTier::Urban),
            "suburban" | "suburb" => Ok(LocationTier::Suburban),
            "rural" | "village" => Ok(LocationTier::Rural),
            _ => Err(EstimateError::unknown_tier(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            LocationTier::Urban => "Urban",
            LocationTier::Suburban => "Suburban",
            LocationTier::Rural => "Rural",
        }
    }
}

impl std::fmt::Display for LocationTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Finishing quality tier for the cost multiplier lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Standard,
    Premium,
    Luxury,
}

impl QualityTier {
    /// All quality tiers for UI selection
    pub const ALL: [QualityTier; 3] = [
        QualityTier::Standard,
        QualityTier::Premium,
        QualityTier::Luxury,
    ];

    /// Lookup the multiplier from the settings table
    pub fn factor(&self, assumptions: &Assumptions) -> f64 {
        match self {
            QualityTier::Standard => assumptions.quality_factors.standard,
            QualityTier::Premium => assumptions.quality_factors.premium,
            QualityTier::Luxury => assumptions.quality_factors.luxury,
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> EstimateResult<Self> {
        match s.to_lowercase().trim() {
            "standard" | "std" | "basic" => Ok(QualityTier::Standard),
            "premium" => Ok(QualityTier::Premium),
            "luxury" | "lux" => Ok(QualityTier::Luxury),
            _ => Err(EstimateError::unknown_tier(s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            QualityTier::Standard => "Standard",
            QualityTier::Premium => "Premium",
            QualityTier::Luxury => "Luxury",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Partial Updates
// ============================================================================

/// Partial settings update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsUpdate {
    pub branding: Option<BrandingUpdate>,
    pub pricing: Option<PricingUpdate>,
    pub assumptions: Option<AssumptionsUpdate>,
}

impl SettingsUpdate {
    /// Validate every carried value before any merge happens.
    pub fn validate(&self) -> EstimateResult<()> {
        if let Some(branding) = &self.branding {
            if let Some(color) = &branding.brand_color {
                validate_hex_color(color)?;
            }
            if let Some(name) = &branding.site_name {
                if name.trim().is_empty() {
                    return Err(EstimateError::invalid_input(
                        "site_name",
                        name.clone(),
                        "Site name must not be empty",
                    ));
                }
            }
        }

        if let Some(pricing) = &self.pricing {
            pricing.validate()?;
        }

        if let Some(assumptions) = &self.assumptions {
            assumptions.validate()?;
        }

        Ok(())
    }
}

/// Partial branding update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandingUpdate {
    pub site_name: Option<String>,
    pub brand_color: Option<String>,
    pub logo_url: Option<String>,
    pub report_header: Option<String>,
}

/// Partial pricing update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingUpdate {
    pub price_per_sqft: Option<f64>,
    pub labor_cost_per_day: Option<f64>,
    pub brick_price: Option<f64>,
    pub cement_price_per_bag: Option<f64>,
    pub steel_price_per_ton: Option<f64>,
    pub sand_price_per_cft: Option<f64>,
    pub paint_price_per_liter: Option<f64>,
    pub tile_price_per_sqft: Option<f64>,
}

impl PricingUpdate {
    fn validate(&self) -> EstimateResult<()> {
        check_non_negative("price_per_sqft", self.price_per_sqft)?;
        check_non_negative("labor_cost_per_day", self.labor_cost_per_day)?;
        check_non_negative("brick_price", self.brick_price)?;
        check_non_negative("cement_price_per_bag", self.cement_price_per_bag)?;
        check_non_negative("steel_price_per_ton", self.steel_price_per_ton)?;
        check_non_negative("sand_price_per_cft", self.sand_price_per_cft)?;
        check_non_negative("paint_price_per_liter", self.paint_price_per_liter)?;
        check_non_negative("tile_price_per_sqft", self.tile_price_per_sqft)?;
        Ok(())
    }
}

/// Partial assumptions update (factor tables merge one level deeper).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionsUpdate {
    pub foundation_cost_per_sqft: Option<f64>,
    pub location_factors: Option<LocationFactorsUpdate>,
    pub quality_factors: Option<QualityFactorsUpdate>,
}

impl AssumptionsUpdate {
    fn validate(&self) -> EstimateResult<()> {
        check_non_negative("foundation_cost_per_sqft", self.foundation_cost_per_sqft)?;
        if let Some(location) = &self.location_factors {
            check_non_negative("location_factors.urban", location.urban)?;
            check_non_negative("location_factors.suburban", location.suburban)?;
            check_non_negative("location_factors.rural", location.rural)?;
        }
        if let Some(quality) = &self.quality_factors {
            check_non_negative("quality_factors.standard", quality.standard)?;
            check_non_negative("quality_factors.premium", quality.premium)?;
            check_non_negative("quality_factors.luxury", quality.luxury)?;
        }
        Ok(())
    }
}

/// Partial location-factor update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationFactorsUpdate {
    pub urban: Option<f64>,
    pub suburban: Option<f64>,
    pub rural: Option<f64>,
}

/// Partial quality-factor update.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityFactorsUpdate {
    pub standard: Option<f64>,
    pub premium: Option<f64>,
    pub luxury: Option<f64>,
}

fn check_non_negative(field: &str, value: Option<f64>) -> EstimateResult<()> {
    if let Some(v) = value {
        if !v.is_finite() || v < 0.0 {
            return Err(EstimateError::invalid_input(
                field,
                v.to_string(),
                "Value must be a non-negative number",
            ));
        }
    }
    Ok(())
}

fn validate_hex_color(color: &str) -> EstimateResult<()> {
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(())
    } else {
        Err(EstimateError::invalid_input(
            "brand_color",
            color,
            "Color must be a #rrggbb hex string",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_factors_match_launch_values() {
        let settings = Settings::default();
        assert_eq!(settings.assumptions.location_factors.urban, 1.2);
        assert_eq!(settings.assumptions.location_factors.suburban, 1.0);
        assert_eq!(settings.assumptions.location_factors.rural, 0.8);
        assert_eq!(settings.assumptions.quality_factors.standard, 1.0);
        assert_eq!(settings.assumptions.quality_factors.premium, 1.3);
        assert_eq!(settings.assumptions.quality_factors.luxury, 1.6);
        assert_eq!(settings.meta.version, SCHEMA_VERSION);
    }

    #[test]
    fn test_settings_serialization() {
        let settings = Settings::default();
        let json = serde_json::to_string_pretty(&settings).unwrap();

        assert!(json.contains("Tameer"));
        assert!(json.contains("price_per_sqft"));

        let roundtrip: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.pricing.brick_price, settings.pricing.brick_price);
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut once = Settings::default();
        let mut twice = once.clone();

        let update = SettingsUpdate {
            pricing: Some(PricingUpdate {
                brick_price: Some(18.0),
                cement_price_per_bag: Some(1400.0),
                ..Default::default()
            }),
            assumptions: Some(AssumptionsUpdate {
                location_factors: Some(LocationFactorsUpdate {
                    urban: Some(1.25),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        once.apply(update.clone()).unwrap();
        twice.apply(update.clone()).unwrap();
        twice.apply(update).unwrap();

        assert_eq!(once.pricing.brick_price, twice.pricing.brick_price);
        assert_eq!(
            once.assumptions.location_factors.urban,
            twice.assumptions.location_factors.urban
        );
        // Untouched fields keep their defaults
        assert_eq!(twice.assumptions.location_factors.rural, 0.8);
        assert_eq!(twice.pricing.steel_price_per_ton, 265_000.0);
    }

    #[test]
    fn test_negative_update_rejected_without_partial_application() {
        let mut settings = Settings::default();
        let before = settings.pricing;

        let update = SettingsUpdate {
            pricing: Some(PricingUpdate {
                brick_price: Some(20.0),
                sand_price_per_cft: Some(-5.0),
                ..Default::default()
            }),
            ..Default::default()
        };

        let err = settings.apply(update).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        // The valid brick price must not have been applied either
        assert_eq!(settings.pricing.brick_price, before.brick_price);
    }

    #[test]
    fn test_bad_brand_color_rejected() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            branding: Some(BrandingUpdate {
                brand_color: Some("blue".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(settings.apply(update).is_err());

        let update = SettingsUpdate {
            branding: Some(BrandingUpdate {
                brand_color: Some("#00ff88".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        settings.apply(update).unwrap();
        assert_eq!(settings.branding.brand_color, "#00ff88");
    }

    #[test]
    fn test_tier_parsing_and_lookup() {
        let assumptions = Assumptions::default();

        let tier = LocationTier::from_str_flexible("Urban").unwrap();
        assert_eq!(tier.factor(&assumptions), 1.2);

        let tier = QualityTier::from_str_flexible("LUX").unwrap();
        assert_eq!(tier.factor(&assumptions), 1.6);

        assert!(LocationTier::from_str_flexible("metro").is_err());
        assert!(QualityTier::from_str_flexible("deluxe").is_err());
    }

    #[test]
    fn test_tier_serialization() {
        let tier = LocationTier::Suburban;
        let json = serde_json::to_string(&tier).unwrap();
        assert_eq!(json, "\"suburban\"");

        let roundtrip: QualityTier = serde_json::from_str("\"premium\"").unwrap();
        assert_eq!(roundtrip, QualityTier::Premium);
    }

    #[test]
    fn test_partial_update_deserializes_from_sparse_json() {
        let update: SettingsUpdate =
            serde_json::from_str(r#"{ "pricing": { "brick_price": 17.0 } }"#).unwrap();
        let mut settings = Settings::default();
        settings.apply(update).unwrap();
        assert_eq!(settings.pricing.brick_price, 17.0);
        assert_eq!(settings.pricing.labor_cost_per_day, 1500.0);
    }
}
