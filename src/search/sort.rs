use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::Listing;

/// Result ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order, as the search produced it
    #[default]
    #[serde(alias = "popularity")]
    Relevance,
    #[serde(alias = "price-low")]
    PriceAscending,
    #[serde(alias = "price-high")]
    PriceDescending,
    #[serde(alias = "rating")]
    ReviewScoreDescending,
}

impl SortKey {
    /// Id used by the sort dropdown
    pub fn id(self) -> &'static str {
        match self {
            SortKey::Relevance => "popularity",
            SortKey::PriceAscending => "price-low",
            SortKey::PriceDescending => "price-high",
            SortKey::ReviewScoreDescending => "rating",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sort key: {0}")]
pub struct UnknownSortKey(pub String);

impl FromStr for SortKey {
    type Err = UnknownSortKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "popularity" | "relevance" | "default" => Ok(SortKey::Relevance),
            "price-low" | "price-ascending" => Ok(SortKey::PriceAscending),
            "price-high" | "price-descending" => Ok(SortKey::PriceDescending),
            "rating" | "review-score-descending" => Ok(SortKey::ReviewScoreDescending),
            _ => Err(UnknownSortKey(s.to_string())),
        }
    }
}

/// Return a reordered copy of `listings`. Ties keep their relative order.
pub fn sort<'a>(listings: &[&'a Listing], key: SortKey) -> Vec<&'a Listing> {
    let mut sorted = listings.to_vec();

    // slice::sort_by is stable
    match key {
        SortKey::Relevance => {}
        SortKey::PriceAscending => {
            sorted.sort_by(|a, b| a.price_per_night.total_cmp(&b.price_per_night))
        }
        SortKey::PriceDescending => {
            sorted.sort_by(|a, b| b.price_per_night.total_cmp(&a.price_per_night))
        }
        SortKey::ReviewScoreDescending => {
            sorted.sort_by(|a, b| b.review_score.total_cmp(&a.review_score))
        }
    }

    sorted
}
