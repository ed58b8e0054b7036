//! # Resource Library
//!
//! The resource-link library: downloadable checklists, thumb-rule sheets
//! and reference links surfaced to end users and managed from the admin
//! gate. Entries are created and deleted, never edited in place.
//!
//! ## Example
//!
//! ```rust
//! use estimate_core::resources::{add_resource, remove_resource, NewResource, ResourceKind};
//!
//! let mut resources = Vec::new();
//!
//! let id = add_resource(&mut resources, NewResource {
//!     title: "Gray Structure Checklist".to_string(),
//!     description: "Stage-by-stage site checklist".to_string(),
//!     category: "Checklists".to_string(),
//!     url: "https://example.com/gray-structure.pdf".to_string(),
//!     kind: ResourceKind::Pdf,
//! }).unwrap();
//!
//! assert_eq!(resources.len(), 1);
//! remove_resource(&mut resources, id).unwrap();
//! assert!(resources.is_empty());
//! ```

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{EstimateError, EstimateResult};

/// What a resource entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A downloadable PDF document
    Pdf,
    /// A plain web link
    Link,
}

impl ResourceKind {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            ResourceKind::Pdf => "PDF",
            ResourceKind::Link => "Link",
        }
    }
}

/// One entry in the resource library.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Stable id used for removal
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
    pub kind: ResourceKind,
}

/// Fields supplied when adding a resource; the id is assigned on add.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    pub category: String,
    pub url: String,
    pub kind: ResourceKind,
}

impl NewResource {
    /// The add-guard: a resource needs a title and a fetchable url.
    pub fn validate(&self) -> EstimateResult<()> {
        if self.title.trim().is_empty() {
            return Err(EstimateError::resource_invalid("Title must not be empty"));
        }
        if self.url.trim().is_empty() {
            return Err(EstimateError::resource_invalid("URL must not be empty"));
        }
        if !self.url.starts_with("http://") && !self.url.starts_with("https://") {
            return Err(EstimateError::resource_invalid(
                "URL must start with http:// or https://",
            ));
        }
        Ok(())
    }
}

/// Validate and append a new resource, returning its assigned id.
pub fn add_resource(resources: &mut Vec<Resource>, new: NewResource) -> EstimateResult<Uuid> {
    new.validate()?;
    let id = Uuid::new_v4();
    resources.push(Resource {
        id,
        title: new.title,
        description: new.description,
        category: new.category,
        url: new.url,
        kind: new.kind,
    });
    Ok(id)
}

/// Remove a resource by id, returning the removed entry.
pub fn remove_resource(resources: &mut Vec<Resource>, id: Uuid) -> EstimateResult<Resource> {
    let index = resources
        .iter()
        .position(|r| r.id == id)
        .ok_or_else(|| EstimateError::resource_not_found(id.to_string()))?;
    Ok(resources.remove(index))
}

/// Filter resources by category (case-insensitive), preserving order.
pub fn by_category<'a>(resources: &'a [Resource], category: &str) -> Vec<&'a Resource> {
    resources
        .iter()
        .filter(|r| r.category.eq_ignore_ascii_case(category))
        .collect()
}

/// Starter library shipped with fresh settings documents.
static STARTER_LIBRARY: Lazy<Vec<(&str, &str, &str, &str, ResourceKind)>> = Lazy::new(|| {
    vec![
        (
            "Gray Structure Checklist",
            "Stage-by-stage inspection checklist from excavation to roof slab",
            "Checklists",
            "https://tameer.pk/resources/gray-structure-checklist.pdf",
            ResourceKind::Pdf,
        ),
        (
            "Material Thumb Rules",
            "Per-sqft brick, cement, steel and sand quantities used by the estimator",
            "Formulas",
            "https://tameer.pk/resources/material-thumb-rules.pdf",
            ResourceKind::Pdf,
        ),
        (
            "Paint Coverage Guide",
            "Coverage per liter by surface and coat count",
            "Guidelines",
            "https://tameer.pk/resources/paint-coverage-guide.pdf",
            ResourceKind::Pdf,
        ),
    ]
});

/// Build the default resource list for a fresh settings document.
pub fn default_resources() -> Vec<Resource> {
    STARTER_LIBRARY
        .iter()
        .map(|(title, description, category, url, kind)| Resource {
            id: Uuid::new_v4(),
            title: (*title).to_string(),
            description: (*description).to_string(),
            category: (*category).to_string(),
            url: (*url).to_string(),
            kind: *kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewResource {
        NewResource {
            title: "Footing Sizes".to_string(),
            description: "Common footing sizes for single/double storey houses".to_string(),
            category: "Guidelines".to_string(),
            url: "https://example.com/footings.pdf".to_string(),
            kind: ResourceKind::Pdf,
        }
    }

    #[test]
    fn test_add_and_remove_roundtrip() {
        let mut resources = Vec::new();
        let id = add_resource(&mut resources, sample()).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].id, id);

        let removed = remove_resource(&mut resources, id).unwrap();
        assert_eq!(removed.title, "Footing Sizes");
        assert!(resources.is_empty());
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut resources = default_resources();
        let err = remove_resource(&mut resources, Uuid::new_v4()).unwrap_err();
        assert_eq!(err.error_code(), "RESOURCE_NOT_FOUND");
        assert_eq!(resources.len(), default_resources().len());
    }

    #[test]
    fn test_add_guards() {
        let mut resources = Vec::new();

        let mut untitled = sample();
        untitled.title = "   ".to_string();
        assert!(add_resource(&mut resources, untitled).is_err());

        let mut no_url = sample();
        no_url.url = String::new();
        assert!(add_resource(&mut resources, no_url).is_err());

        let mut bad_scheme = sample();
        bad_scheme.url = "ftp://example.com/a.pdf".to_string();
        assert!(add_resource(&mut resources, bad_scheme).is_err());

        assert!(resources.is_empty());
    }

    #[test]
    fn test_category_filter_preserves_order() {
        let mut resources = Vec::new();
        for title in ["A", "B", "C"] {
            let mut r = sample();
            r.title = title.to_string();
            add_resource(&mut resources, r).unwrap();
        }
        let mut other = sample();
        other.category = "Checklists".to_string();
        add_resource(&mut resources, other).unwrap();

        let guidelines = by_category(&resources, "guidelines");
        let titles: Vec<_> = guidelines.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn test_default_library_entries_are_valid() {
        for resource in default_resources() {
            assert!(!resource.title.is_empty());
            assert!(resource.url.starts_with("https://"));
        }
    }

    #[test]
    fn test_resource_serialization() {
        let mut resources = Vec::new();
        add_resource(&mut resources, sample()).unwrap();
        let json = serde_json::to_string(&resources).unwrap();
        assert!(json.contains("\"kind\":\"pdf\""));

        let roundtrip: Vec<Resource> = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip[0].title, resources[0].title);
    }
}
