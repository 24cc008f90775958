//! Types for catalog API requests and responses.

use serde::{Deserialize, Serialize};
use shelf_core::{LookupOutcome, Nutrition, ProductSnapshot};

/// Default public catalog instance (Open Food Facts).
pub const DEFAULT_CATALOG_URL: &str = "https://world.openfoodfacts.org";

/// Configuration for connecting to a product catalog.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog (e.g., "https://world.openfoodfacts.org")
    pub base_url: String,
}

impl CatalogConfig {
    /// Create a config pointing at the given catalog.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_URL)
    }
}

// =============================================================================
// Wire Types
// =============================================================================

/// Top-level catalog response for a product query.
///
/// `status == 1` marks the product as present; `status == 0` as absent.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProductResponse {
    /// Presence marker
    pub status: u8,

    /// Product fields, present only when `status == 1`
    #[serde(default)]
    pub product: Option<WireProduct>,
}

/// Product fields as the catalog reports them.
///
/// Every field is optional on the wire; normalization maps absence to the
/// explicit "unavailable" markers of [`ProductSnapshot`].
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WireProduct {
    #[serde(default)]
    pub product_name: Option<String>,

    #[serde(default)]
    pub brands: Option<String>,

    #[serde(default)]
    pub image_url: Option<String>,

    #[serde(default)]
    pub ingredients_text: Option<String>,

    #[serde(default)]
    pub nutriments: Option<WireNutriments>,
}

/// Per-100g nutrition figures as the catalog reports them.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
pub struct WireNutriments {
    #[serde(default)]
    pub energy_100g: Option<f64>,

    #[serde(default)]
    pub fat_100g: Option<f64>,

    #[serde(default)]
    pub carbohydrates_100g: Option<f64>,

    #[serde(default)]
    pub proteins_100g: Option<f64>,
}

impl ProductResponse {
    /// Map the wire response to a lookup outcome.
    ///
    /// A present marker without product fields is treated as absent rather
    /// than an error: the catalog occasionally flags deleted entries that
    /// way.
    pub fn into_outcome(self) -> LookupOutcome {
        match (self.status, self.product) {
            (1, Some(product)) => LookupOutcome::Found(product.normalize()),
            _ => LookupOutcome::NotFound,
        }
    }
}

impl WireProduct {
    /// Normalize catalog fields into an immutable product snapshot.
    fn normalize(self) -> ProductSnapshot {
        ProductSnapshot {
            name: self.product_name.unwrap_or_default(),
            brand: self.brands.unwrap_or_default(),
            image_url: self.image_url,
            ingredients_text: self.ingredients_text,
            nutrition: self.nutriments.map(|n| Nutrition {
                energy_kcal_100g: n.energy_100g,
                fat_100g: n.fat_100g,
                carbs_100g: n.carbohydrates_100g,
                protein_100g: n.proteins_100g,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_product_normalizes_partial_nutrition() {
        let response: ProductResponse = serde_json::from_value(serde_json::json!({
            "status": 1,
            "product": {
                "product_name": "Test Bar",
                "brands": "Acme",
                "nutriments": { "energy_100g": 250 }
            }
        }))
        .unwrap();

        let outcome = response.into_outcome();
        let snapshot = outcome.snapshot().expect("found");
        assert_eq!(snapshot.name, "Test Bar");
        assert_eq!(snapshot.brand, "Acme");
        assert!(snapshot.image_url.is_none());

        let nutrition = snapshot.nutrition.expect("nutrition record");
        assert_eq!(nutrition.energy_kcal_100g, Some(250.0));
        assert_eq!(nutrition.fat_100g, None);
        assert_eq!(nutrition.carbs_100g, None);
        assert_eq!(nutrition.protein_100g, None);
    }

    #[test]
    fn absent_marker_maps_to_not_found() {
        let response: ProductResponse =
            serde_json::from_value(serde_json::json!({ "status": 0 })).unwrap();
        assert_eq!(response.into_outcome(), LookupOutcome::NotFound);
    }

    #[test]
    fn present_marker_without_product_is_not_found() {
        let response = ProductResponse {
            status: 1,
            product: None,
        };
        assert_eq!(response.into_outcome(), LookupOutcome::NotFound);
    }

    #[test]
    fn default_config_points_at_public_catalog() {
        assert_eq!(CatalogConfig::default().base_url, DEFAULT_CATALOG_URL);
    }
}
