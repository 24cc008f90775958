//! Shelf Scan Core
//!
//! Platform-agnostic domain types and traits shared by the Shelf Scan crates.
//!
//! This crate defines:
//! - **Domain Types**: `Barcode`, `ProductSnapshot`, `Nutrition`, `LookupOutcome`
//! - **Core Traits**: `ProductLookup` (the catalog-lookup seam)
//! - **Error Handling**: `InvalidBarcode`
//!
//! # Example
//!
//! ```rust
//! use shelf_core::{Barcode, LookupOutcome};
//!
//! let code = Barcode::parse("0123456789012").expect("valid symbol");
//! assert_eq!(code.as_str(), "0123456789012");
//!
//! let outcome = LookupOutcome::NotFound;
//! assert!(!outcome.is_found());
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod lookup;
pub mod types;

// Re-export commonly used types
pub use error::InvalidBarcode;
pub use lookup::ProductLookup;
pub use types::{Barcode, LookupOutcome, Nutrition, ProductSnapshot};
