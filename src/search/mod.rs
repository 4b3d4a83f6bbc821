pub mod query;
pub mod sort;
pub mod types;

pub use query::{Guests, SearchQuery, StayDates};
pub use sort::{sort, SortKey, UnknownSortKey};
pub use types::{FilterCriteria, PRICE_SLIDER_MAX};

use tracing::debug;

use crate::catalog::Catalog;
use crate::models::Listing;

/// Narrow the catalog to listings that pass every supplied filter.
///
/// `destination` is matched case-insensitively as a substring of the city or
/// the country; an empty string applies no destination filter. The result
/// keeps catalog order, `criteria.sort` is not applied here (see [`search_sorted`]).
/// No match is an empty vector, never an error.
pub fn search<'a>(
    catalog: &'a Catalog,
    destination: &str,
    criteria: &FilterCriteria,
) -> Vec<&'a Listing> {
    let needle = destination.to_lowercase();

    let results: Vec<&Listing> = catalog
        .listings()
        .iter()
        .filter(|l| matches_destination(l, &needle))
        .filter(|l| criteria.matches(l))
        .collect();

    debug!(
        destination,
        active_filters = criteria.active_filter_count(),
        matched = results.len(),
        total = catalog.len(),
        "search finished"
    );

    results
}

/// [`search`] followed by the ordering in `criteria.sort`
pub fn search_sorted<'a>(
    catalog: &'a Catalog,
    destination: &str,
    criteria: &FilterCriteria,
) -> Vec<&'a Listing> {
    sort(&search(catalog, destination, criteria), criteria.sort)
}

/// `needle` must already be lowercased; empty matches everything
pub fn matches_destination(listing: &Listing, needle: &str) -> bool {
    needle.is_empty()
        || listing.location.city.to_lowercase().contains(needle)
        || listing.location.country.to_lowercase().contains(needle)
}
