use crate::catalog::traits::CatalogSource;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Listing;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

const SEED_JSON: &str = include_str!("seed.json");

/// The catalog bundled with the binary: seven listings across
/// Paris, London, New York, Tokyo, Dubai and Barcelona
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Parse the bundled dataset without going through the async trait
    pub fn listings() -> CatalogResult<Vec<Listing>> {
        serde_json::from_str(SEED_JSON).map_err(|source| CatalogError::Parse {
            path: PathBuf::from("<builtin>/seed.json"),
            source,
        })
    }
}

#[async_trait]
impl CatalogSource for BuiltinCatalog {
    async fn load(&self) -> CatalogResult<Vec<Listing>> {
        let listings = Self::listings()?;
        debug!(count = listings.len(), "parsed builtin catalog");
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "builtin"
    }
}
