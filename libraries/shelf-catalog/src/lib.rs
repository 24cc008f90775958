//! Shelf Scan Catalog Client
//!
//! HTTP client library for the remote product catalog (Open Food Facts v0
//! API shape).
//!
//! # Features
//!
//! - **Product lookup**: one GET per barcode, normalized into
//!   [`shelf_core::ProductSnapshot`]
//! - **Single-flight coordination**: concurrent duplicates for the same code
//!   share one request
//! - **Typed failures**: absent products map to `NotFound`, every transport
//!   or parse error to `Failed` - never a panic, never an aborted session
//!
//! # Example
//!
//! ```ignore
//! use shelf_catalog::{CatalogConfig, LookupCoordinator};
//! use shelf_core::Barcode;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let coordinator = LookupCoordinator::new(CatalogConfig::default())?;
//!     let code = Barcode::parse("0123456789012")?;
//!     let outcome = coordinator.lookup(&code).await;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

mod client;
mod coordinator;
mod error;
mod types;

// Re-export main types
pub use client::CatalogClient;
pub use coordinator::LookupCoordinator;
pub use error::{CatalogError, Result};
pub use types::{
    CatalogConfig, ProductResponse, WireNutriments, WireProduct, DEFAULT_CATALOG_URL,
};
