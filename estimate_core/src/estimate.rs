//! # Estimate Documents
//!
//! The `Estimate` struct is the root container for a priced job: client
//! details plus every calculation prepared for them. Estimates serialize
//! to `.tme` files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Estimate
//! ├── meta: EstimateMetadata (version, client, site, timestamps)
//! └── items: HashMap<Uuid, EstimateItem> (all calculations)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::calculators::{AreaInput, EstimateItem};
//! use estimate_core::estimate::Estimate;
//!
//! let mut estimate = Estimate::new("Ahmed Builders", "Hamza Khan", "DHA Phase 6");
//!
//! let id = estimate.add_item(EstimateItem::Area(AreaInput {
//!     label: "Plot".to_string(),
//!     length_ft: Some(30.0),
//!     width_ft: Some(60.0),
//!     area_sqft: None,
//! }));
//! assert!(estimate.items.contains_key(&id));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculators::{EstimateItem, EstimateOutput};
use crate::errors::EstimateResult;
use crate::settings::{Settings, SCHEMA_VERSION};

/// Root estimate container.
///
/// This is the top-level struct that gets serialized to `.tme` files.
/// Items are stored in a flat UUID-keyed map for O(1) lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Estimate {
    /// Estimate metadata (version, client, site, timestamps)
    pub meta: EstimateMetadata,

    /// All calculation items, keyed by UUID
    pub items: HashMap<Uuid, EstimateItem>,
}

impl Estimate {
    /// Create a new empty estimate.
    ///
    /// # Arguments
    ///
    /// * `prepared_by` - Who is preparing the estimate
    /// * `client` - Client name
    /// * `site` - Site/plot address
    pub fn new(
        prepared_by: impl Into<String>,
        client: impl Into<String>,
        site: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Estimate {
            meta: EstimateMetadata {
                version: SCHEMA_VERSION.to_string(),
                prepared_by: prepared_by.into(),
                client: client.into(),
                site: site.into(),
                created: now,
                modified: now,
            },
            items: HashMap::new(),
        }
    }

    /// Add a calculation item to the estimate.
    ///
    /// Returns the UUID assigned to the item.
    pub fn add_item(&mut self, item: EstimateItem) -> Uuid {
        let id = Uuid::new_v4();
        self.items.insert(id, item);
        self.touch();
        id
    }

    /// Remove a calculation item by UUID.
    ///
    /// Returns the removed item if it existed.
    pub fn remove_item(&mut self, id: &Uuid) -> Option<EstimateItem> {
        let item = self.items.remove(id);
        if item.is_some() {
            self.touch();
        }
        item
    }

    /// Get a calculation item by UUID.
    pub fn get_item(&self, id: &Uuid) -> Option<&EstimateItem> {
        self.items.get(id)
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of items in the estimate.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Evaluate every item against the rate book.
    ///
    /// Items are evaluated in label order so output is stable across
    /// runs. The summary total sums the costed calculators; sizing
    /// tools contribute their results without a rupee figure.
    pub fn evaluate_all(&self, settings: &Settings) -> EstimateResult<EstimateSummary> {
        let mut ordered: Vec<(&Uuid, &EstimateItem)> = self.items.iter().collect();
        ordered.sort_by(|a, b| a.1.label().cmp(b.1.label()).then(a.0.cmp(b.0)));

        let mut lines = Vec::with_capacity(ordered.len());
        let mut total_cost_pkr = 0.0;

        for (id, item) in ordered {
            let output = item.evaluate(settings)?;
            if let Some(cost) = output.cost_pkr() {
                total_cost_pkr += cost;
            }
            lines.push(EstimateLine {
                id: *id,
                label: item.label().to_string(),
                calc_type: item.calc_type().to_string(),
                output,
            });
        }

        Ok(EstimateSummary {
            lines,
            total_cost_pkr,
        })
    }
}

impl Default for Estimate {
    fn default() -> Self {
        Estimate::new("", "", "")
    }
}

/// Estimate metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Who prepared the estimate
    pub prepared_by: String,

    /// Client name
    pub client: String,

    /// Site/plot address
    pub site: String,

    /// When the estimate was created
    pub created: DateTime<Utc>,

    /// When the estimate was last modified
    pub modified: DateTime<Utc>,
}

/// One evaluated line of an estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateLine {
    pub id: Uuid,
    pub label: String,
    pub calc_type: String,
    pub output: EstimateOutput,
}

/// Every line evaluated plus the costed total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub lines: Vec<EstimateLine>,

    /// Sum over lines that carry a rupee cost (PKR)
    pub total_cost_pkr: f64,
}
