/// Core error types for Shelf Scan
use thiserror::Error;

/// A decoded symbol string that cannot serve as a barcode.
///
/// Produced by [`crate::Barcode::parse`] when the input is empty or
/// whitespace-only after trimming.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid barcode: {0:?}")]
pub struct InvalidBarcode(pub String);
