//! Catalog-lookup seam
//!
//! The scan pipeline only needs "given a barcode, eventually an outcome";
//! the concrete HTTP client lives in `shelf-catalog` and fakes live in tests.

use crate::types::{Barcode, LookupOutcome};
use async_trait::async_trait;

/// Asynchronous product lookup keyed by barcode.
///
/// Implementations perform at most one remote query per invocation (no
/// internal retry/backoff) and report every failure through
/// [`LookupOutcome::Failed`] rather than panicking or aborting the caller.
#[async_trait]
pub trait ProductLookup: Send + Sync {
    /// Look the barcode up in the catalog.
    async fn lookup(&self, code: &Barcode) -> LookupOutcome;
}
