pub mod builtin;
pub mod file;
pub mod traits;

pub use builtin::BuiltinCatalog;
pub use file::JsonFileCatalog;
pub use traits::CatalogSource;

use std::collections::HashMap;

use tracing::info;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Category, Destination, Listing};

/// Immutable, ordered set of listings with lookup by id.
///
/// Built once at process start; nothing mutates it afterwards.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    listings: Vec<Listing>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and listings whose price or
    /// review score are outside their valid ranges.
    pub fn new(listings: Vec<Listing>) -> CatalogResult<Self> {
        let mut by_id = HashMap::with_capacity(listings.len());

        for (idx, listing) in listings.iter().enumerate() {
            validate(listing)?;
            if by_id.insert(listing.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateId(listing.id.clone()));
            }
        }

        Ok(Self { listings, by_id })
    }

    /// Load and validate the listings supplied by `source`.
    pub async fn from_source(source: &dyn CatalogSource) -> CatalogResult<Self> {
        let listings = source.load().await?;
        let catalog = Self::new(listings)?;
        info!(
            source = source.source_name(),
            count = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Listing> {
        self.by_id.get(id).map(|&idx| &self.listings[idx])
    }

    /// Other listings in the same city as `id`, in catalog order.
    /// Empty when `id` is unknown.
    pub fn similar_to(&self, id: &str, limit: usize) -> Vec<&Listing> {
        let Some(listing) = self.get_by_id(id) else {
            return Vec::new();
        };

        self.listings
            .iter()
            .filter(|l| l.id != listing.id && l.location.city == listing.location.city)
            .take(limit)
            .collect()
    }

    /// Leading listings shown on the home page
    pub fn trending(&self, count: usize) -> &[Listing] {
        &self.listings[..count.min(self.listings.len())]
    }

    pub fn count_by_category(&self, category: Category) -> usize {
        self.listings
            .iter()
            .filter(|l| l.category == category)
            .count()
    }

    /// Distinct (city, country) pairs in first-appearance order
    pub fn destinations(&self) -> Vec<Destination> {
        let mut destinations: Vec<Destination> = Vec::new();

        for listing in &self.listings {
            let loc = &listing.location;
            match destinations
                .iter_mut()
                .find(|d| d.city == loc.city && d.country == loc.country)
            {
                Some(existing) => existing.listing_count += 1,
                None => destinations.push(Destination {
                    city: loc.city.clone(),
                    country: loc.country.clone(),
                    listing_count: 1,
                }),
            }
        }

        destinations
    }
}

fn validate(listing: &Listing) -> CatalogResult<()> {
    let invalid = |message: &str| CatalogError::InvalidListing {
        id: listing.id.clone(),
        message: message.to_string(),
    };

    if listing.id.is_empty() {
        return Err(invalid("empty id"));
    }
    if !listing.price_per_night.is_finite() || listing.price_per_night < 0.0 {
        return Err(invalid("price per night must be a non-negative number"));
    }
    if !(0.0..=10.0).contains(&listing.review_score) {
        return Err(invalid("review score must be within 0..=10"));
    }
    if !(1..=5).contains(&listing.star_rating) {
        return Err(invalid("star rating must be within 1..=5"));
    }
    Ok(())
}
