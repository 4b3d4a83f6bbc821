use crate::catalog::traits::CatalogSource;
use crate::error::{CatalogError, CatalogResult};
use crate::models::Listing;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

/// Catalog exported as a JSON array of listings
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> CatalogResult<Vec<Listing>> {
        info!(path = %self.path.display(), "Reading catalog file");

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| CatalogError::Read {
                path: self.path.clone(),
                source,
            })?;

        debug!("Read {} bytes of catalog JSON", json.len());

        serde_json::from_str(&json).map_err(|source| CatalogError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn source_name(&self) -> &'static str {
        "json-file"
    }
}
