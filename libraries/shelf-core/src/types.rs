//! Core types for barcode scanning and product lookup

use crate::error::InvalidBarcode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A decoded barcode payload (numeric/alphanumeric symbol string).
///
/// Guaranteed non-empty and trimmed. This gives the lookup boundary its
/// input constraint as a type instead of a runtime check at every call site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Validate a decoded symbol string as a barcode.
    ///
    /// Leading/trailing whitespace is trimmed; an empty result is rejected.
    pub fn parse(symbol: impl AsRef<str>) -> Result<Self, InvalidBarcode> {
        let trimmed = symbol.as_ref().trim();
        if trimmed.is_empty() {
            return Err(InvalidBarcode(symbol.as_ref().to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The symbol string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-100g nutrition figures for a product.
///
/// `None` is the explicit "unavailable" marker for a figure the catalog
/// does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutrition {
    /// Energy in kcal per 100g
    pub energy_kcal_100g: Option<f64>,

    /// Fat in grams per 100g
    pub fat_100g: Option<f64>,

    /// Carbohydrates in grams per 100g
    pub carbs_100g: Option<f64>,

    /// Protein in grams per 100g
    pub protein_100g: Option<f64>,
}

/// Immutable product metadata produced by one successful catalog lookup.
///
/// Created by the lookup coordinator, owned thereafter by the presentation
/// surface; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    /// Product name as reported by the catalog
    pub name: String,

    /// Brand name(s), comma separated as the catalog reports them
    pub brand: String,

    /// Product image URL (if any)
    pub image_url: Option<String>,

    /// Free-text ingredient list (if any)
    pub ingredients_text: Option<String>,

    /// Per-100g nutrition figures (if any)
    pub nutrition: Option<Nutrition>,
}

/// Result of one catalog lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum LookupOutcome {
    /// The catalog knows the product
    Found(ProductSnapshot),

    /// The catalog reports the barcode as absent
    NotFound,

    /// The lookup itself failed (network, transport, or parse error)
    Failed {
        /// Human-readable cause
        reason: String,
    },
}

impl LookupOutcome {
    /// True when the outcome carries a product snapshot.
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }

    /// The snapshot, if the product was found.
    pub fn snapshot(&self) -> Option<&ProductSnapshot> {
        match self {
            LookupOutcome::Found(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barcode_rejects_empty_and_whitespace() {
        assert!(Barcode::parse("").is_err());
        assert!(Barcode::parse("   ").is_err());
        assert!(Barcode::parse("\t\n").is_err());
    }

    #[test]
    fn barcode_trims_input() {
        let code = Barcode::parse(" 0123456789012 ").unwrap();
        assert_eq!(code.as_str(), "0123456789012");
        assert_eq!(code.to_string(), "0123456789012");
    }

    #[test]
    fn outcome_accessors() {
        let snapshot = ProductSnapshot {
            name: "Test Bar".to_string(),
            brand: "Acme".to_string(),
            image_url: None,
            ingredients_text: None,
            nutrition: Some(Nutrition {
                energy_kcal_100g: Some(250.0),
                ..Nutrition::default()
            }),
        };

        let found = LookupOutcome::Found(snapshot.clone());
        assert!(found.is_found());
        assert_eq!(found.snapshot(), Some(&snapshot));

        assert!(!LookupOutcome::NotFound.is_found());
        assert!(LookupOutcome::NotFound.snapshot().is_none());
    }

    #[test]
    fn outcome_serializes_tagged() {
        let json = serde_json::to_value(&LookupOutcome::NotFound).unwrap();
        assert_eq!(json["kind"], "NotFound");
    }
}
