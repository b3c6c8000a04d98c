//! Catalog-level error type.

use thiserror::Error;

/// Errors returned by an [`AutomationCatalog`](crate::AutomationCatalog).
#[derive(Debug, Error, Clone)]
pub enum CatalogError {
    /// The catalog could not be reached.
    #[error("automation catalog unavailable: {0}")]
    Unavailable(String),
}
