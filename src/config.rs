use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use crate::catalog::{BuiltinCatalog, Catalog, CatalogSource, JsonFileCatalog};
use crate::error::{AppError, StorageError};
use crate::search::{SearchQuery, SortKey};
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

/// Runtime configuration, read from environment variables.
///
/// Everything is optional: without a data directory the saved set lives in
/// memory for the life of the process, and without a catalog path the
/// bundled catalog is used.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Directory holding the durable saved-listings slot.
    pub data_dir: Option<PathBuf>,
    /// JSON catalog file replacing the bundled catalog.
    pub catalog_path: Option<PathBuf>,
    /// Search page parameters, as a raw `a=1&b=2` query string.
    pub query: SearchQuery,
    pub sort: SortKey,
    /// Listing ids to toggle before printing results.
    pub toggle: Vec<String>,
    /// Fallback log directive when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `RESERVO_DATA_DIR`: directory for the saved-listings file
    /// - `RESERVO_CATALOG_PATH`: JSON catalog file
    /// - `RESERVO_QUERY`: search query string (`destination=paris&type=hotel`)
    /// - `RESERVO_SORT`: `popularity`, `price-low`, `price-high` or `rating`
    /// - `RESERVO_TOGGLE`: comma-separated listing ids
    /// - `RESERVO_LOG_LEVEL`: default log level (`info` when unset)
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`Config::from_env`] with an injectable variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let data_dir = non_empty("RESERVO_DATA_DIR").map(PathBuf::from);
        if let Some(dir) = &data_dir {
            if dir.exists() && !dir.is_dir() {
                return Err(AppError::Config(format!(
                    "RESERVO_DATA_DIR is not a directory: {}",
                    dir.display()
                )));
            }
        }

        let catalog_path = non_empty("RESERVO_CATALOG_PATH").map(PathBuf::from);
        if let Some(path) = &catalog_path {
            if !path.is_file() {
                return Err(AppError::Config(format!(
                    "RESERVO_CATALOG_PATH does not point to a file: {}",
                    path.display()
                )));
            }
        }

        let query = non_empty("RESERVO_QUERY")
            .map(|q| SearchQuery::parse(&q))
            .unwrap_or_default();

        let sort = match non_empty("RESERVO_SORT") {
            Some(raw) => raw
                .parse::<SortKey>()
                .map_err(|e| AppError::Config(format!("RESERVO_SORT: {e}")))?,
            None => SortKey::default(),
        };

        let toggle: Vec<String> = non_empty("RESERVO_TOGGLE")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let log_level = non_empty("RESERVO_LOG_LEVEL").unwrap_or_else(|| "info".to_string());

        Ok(Self {
            data_dir,
            catalog_path,
            query,
            sort,
            toggle,
            log_level,
        })
    }

    /// Load the configured catalog: the JSON file when one is set, the
    /// bundled catalog otherwise.
    pub async fn load_catalog(&self) -> Result<Catalog, AppError> {
        let source: Box<dyn CatalogSource> = match &self.catalog_path {
            Some(path) => Box::new(JsonFileCatalog::new(path)),
            None => Box::new(BuiltinCatalog::new()),
        };
        Ok(Catalog::from_source(source.as_ref()).await?)
    }

    /// Open the backing store for the saved set. A configured data directory
    /// is created up front so an unusable path fails at startup rather than
    /// on the first save.
    pub fn open_store(&self) -> Result<Arc<dyn KeyValueStore>, AppError> {
        match &self.data_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|source| StorageError::Io {
                    path: dir.clone(),
                    source,
                })?;
                info!(dir = %dir.display(), "saved listings persisted to disk");
                Ok(Arc::new(FileStore::new(dir)))
            }
            None => {
                info!("no RESERVO_DATA_DIR set, saved listings kept in memory");
                Ok(Arc::new(MemoryStore::new()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.data_dir.is_none());
        assert!(config.catalog_path.is_none());
        assert_eq!(config.query, SearchQuery::default());
        assert_eq!(config.sort, SortKey::Relevance);
        assert!(config.toggle.is_empty());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn reads_query_sort_and_toggles() {
        let config = Config::from_lookup(lookup(&[
            ("RESERVO_QUERY", "destination=tokyo&type=apartment"),
            ("RESERVO_SORT", "price-high"),
            ("RESERVO_TOGGLE", "1, 5,,7"),
        ]))
        .unwrap();

        assert_eq!(config.query.destination, "tokyo");
        assert_eq!(config.query.category, Some(Category::Apartment));
        assert_eq!(config.sort, SortKey::PriceDescending);
        assert_eq!(config.toggle, vec!["1", "5", "7"]);
    }

    #[test]
    fn rejects_unknown_sort() {
        let err = Config::from_lookup(lookup(&[("RESERVO_SORT", "cheapest")])).unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.contains("cheapest")));
    }

    #[test]
    fn rejects_missing_catalog_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing = dir.path().join("catalog.json");
        let result = Config::from_lookup(lookup(&[(
            "RESERVO_CATALOG_PATH",
            missing.to_str().unwrap(),
        )]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn rejects_data_dir_that_is_a_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();

        let result = Config::from_lookup(lookup(&[("RESERVO_DATA_DIR", file.to_str().unwrap())]));
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn unparsable_catalog_file_is_a_catalog_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "[{\"id\": ").unwrap();

        let config =
            Config::from_lookup(lookup(&[("RESERVO_CATALOG_PATH", path.to_str().unwrap())]))
                .unwrap();
        let err = config.load_catalog().await.unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }

    #[tokio::test]
    async fn default_catalog_is_bundled() {
        let catalog = Config::default().load_catalog().await.unwrap();
        assert_eq!(catalog.len(), 7);
    }

    #[test]
    fn open_store_creates_data_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().join("nested").join("saved");
        let config =
            Config::from_lookup(lookup(&[("RESERVO_DATA_DIR", data_dir.to_str().unwrap())]))
                .unwrap();

        let store = config.open_store().unwrap();
        assert!(data_dir.is_dir());
        store.write("k", "v").unwrap();
        assert_eq!(store.read("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn uncreatable_data_dir_is_a_storage_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let data_dir = file.join("saved");

        let config =
            Config::from_lookup(lookup(&[("RESERVO_DATA_DIR", data_dir.to_str().unwrap())]))
                .unwrap();
        let err = config.open_store().err().unwrap();
        assert!(matches!(err, AppError::Storage(StorageError::Io { .. })));
    }
}
