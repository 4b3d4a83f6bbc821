//! Lodging search and saved listings.
//!
//! A read-only [`Catalog`] of listings, a pure [`search`] / [`sort`] pipeline
//! over it, and [`SavedListings`], a durable set of saved listing ids backed by
//! a single key-value slot.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod saved;
pub mod search;
pub mod storage;

pub use catalog::{BuiltinCatalog, Catalog, CatalogSource, JsonFileCatalog};
pub use config::Config;
pub use error::{AppError, CatalogError, StorageError};
pub use models::{Category, Listing, ReviewLabel};
pub use saved::{SavedListings, SAVED_LISTINGS_KEY};
pub use search::{search, search_sorted, sort, FilterCriteria, SearchQuery, SortKey};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
