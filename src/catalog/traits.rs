use crate::error::CatalogResult;
use crate::models::Listing;
use async_trait::async_trait;

/// Common trait for everything that can supply the listing catalog
/// at process start (bundled dataset, exported JSON file, ...)
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Load every listing, in catalog order
    async fn load(&self) -> CatalogResult<Vec<Listing>>;

    /// Get the name of the catalog source
    fn source_name(&self) -> &'static str;
}
