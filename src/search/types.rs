use serde::{Deserialize, Serialize};

use crate::models::{Category, Listing};
use crate::search::sort::SortKey;

/// Upper end of the filter panel's price slider
pub const PRICE_SLIDER_MAX: f64 = 2000.0;

/// Structured constraints narrowing a search. Every field is optional;
/// an absent or empty field places no constraint on that dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Inclusive lower bound on the nightly price
    pub price_min: Option<f64>,
    /// Inclusive upper bound on the nightly price
    pub price_max: Option<f64>,
    /// Listing category must be one of these
    #[serde(default)]
    pub categories: Vec<Category>,
    /// Listing must offer every one of these
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Floor on the 1-5 display stars
    pub min_star_rating: Option<u8>,
    /// Floor on the 0-10 guest review score
    pub min_review_score: Option<f64>,
    #[serde(default)]
    pub sort: SortKey,
}

impl FilterCriteria {
    /// What the filter panel starts with: the full slider range and nothing else
    pub fn default_panel() -> Self {
        Self {
            price_min: Some(0.0),
            price_max: Some(PRICE_SLIDER_MAX),
            ..Self::default()
        }
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_min = Some(min);
        self.price_max = Some(max);
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        if !self.categories.contains(&category) {
            self.categories.push(category);
        }
        self
    }

    pub fn with_amenity(mut self, amenity: impl Into<String>) -> Self {
        let amenity = amenity.into();
        if !self.amenities.contains(&amenity) {
            self.amenities.push(amenity);
        }
        self
    }

    pub fn with_min_review_score(mut self, score: f64) -> Self {
        self.min_review_score = Some(score);
        self
    }

    pub fn with_min_star_rating(mut self, stars: u8) -> Self {
        self.min_star_rating = Some(stars);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Select or deselect an amenity checkbox
    pub fn toggle_amenity(&mut self, amenity: &str) {
        if let Some(pos) = self.amenities.iter().position(|a| a == amenity) {
            self.amenities.remove(pos);
        } else {
            self.amenities.push(amenity.to_string());
        }
    }

    /// Reset every filter to the panel default. The sort order is kept.
    pub fn clear(&mut self) {
        *self = Self {
            sort: self.sort,
            ..Self::default_panel()
        };
    }

    /// Number shown on the "clear filters" button
    pub fn active_filter_count(&self) -> usize {
        let price_narrowed = self.price_min.is_some_and(|min| min > 0.0)
            || self.price_max.is_some_and(|max| max < PRICE_SLIDER_MAX);

        usize::from(price_narrowed)
            + usize::from(!self.categories.is_empty())
            + self.amenities.len()
            + usize::from(self.min_star_rating.is_some())
            + usize::from(self.min_review_score.is_some())
    }

    /// Whether `listing` passes every structured filter (destination excluded)
    pub fn matches(&self, listing: &Listing) -> bool {
        self.matches_price(listing)
            && self.matches_category(listing)
            && self.matches_amenities(listing)
            && self.matches_rating(listing)
    }

    pub fn matches_price(&self, listing: &Listing) -> bool {
        let price = listing.price_per_night;
        self.price_min.map_or(true, |min| price >= min)
            && self.price_max.map_or(true, |max| price <= max)
    }

    pub fn matches_category(&self, listing: &Listing) -> bool {
        self.categories.is_empty() || self.categories.contains(&listing.category)
    }

    pub fn matches_amenities(&self, listing: &Listing) -> bool {
        self.amenities.iter().all(|a| listing.has_amenity(a))
    }

    pub fn matches_rating(&self, listing: &Listing) -> bool {
        self.min_star_rating
            .map_or(true, |stars| listing.star_rating >= stars)
            && self
                .min_review_score
                .map_or(true, |score| listing.review_score >= score)
    }
}
