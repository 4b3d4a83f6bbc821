use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of property a listing is
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotel,
    Apartment,
    Resort,
    Villa,
    Hostel,
    Guesthouse,
}

impl Category {
    /// All categories in the order the filter panel lists them
    pub const ALL: [Category; 6] = [
        Category::Hotel,
        Category::Apartment,
        Category::Resort,
        Category::Villa,
        Category::Hostel,
        Category::Guesthouse,
    ];

    /// Stable id used in routing parameters and serialized catalogs
    pub fn id(self) -> &'static str {
        match self {
            Category::Hotel => "hotel",
            Category::Apartment => "apartment",
            Category::Resort => "resort",
            Category::Villa => "villa",
            Category::Hostel => "hostel",
            Category::Guesthouse => "guesthouse",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Category::Hotel => "Hotels",
            Category::Apartment => "Apartments",
            Category::Resort => "Resorts",
            Category::Villa => "Villas",
            Category::Hostel => "Hostels",
            Category::Guesthouse => "Guest Houses",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a routing `type` value names no known category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Amenities offered by the filter panel (the panel shows the first ten)
pub const AMENITIES: [&str; 20] = [
    "Free WiFi",
    "Parking",
    "Swimming Pool",
    "Spa",
    "Fitness Center",
    "Restaurant",
    "Bar",
    "Room Service",
    "Air Conditioning",
    "Pet Friendly",
    "Airport Shuttle",
    "Business Center",
    "Laundry Service",
    "Non-smoking Rooms",
    "Family Rooms",
    "Kitchen",
    "Balcony",
    "Sea View",
    "City View",
    "Garden",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// Location information for a listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub country: String,
    pub address: String,
    pub coordinates: Coordinates,
    #[serde(rename = "distanceFromCenter")]
    pub distance_from_center_km: f64,
}

/// A bookable room inside a listing. Read-only, never filtered on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub max_guests: u32,
    pub bed_type: String,
    /// Floor area in square meters
    pub size: u32,
    pub price_per_night: f64,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub available: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Policies {
    pub check_in: String,
    pub check_out: String,
    pub cancellation: String,
    #[serde(default)]
    pub house_rules: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Features {
    pub free_cancellation: bool,
    pub breakfast_included: bool,
    pub no_prepayment: bool,
}

/// Core listing data model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(rename = "type", alias = "category")]
    pub category: Category,
    pub location: Location,
    /// Display stars, 1 to 5
    #[serde(rename = "rating", alias = "starRating")]
    pub star_rating: u8,
    /// Guest review score in [0, 10]
    pub review_score: f64,
    pub review_count: u32,
    pub price_per_night: f64,
    pub currency: String,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub policies: Policies,
    #[serde(default)]
    pub features: Features,
}

impl Listing {
    pub fn has_amenity(&self, amenity: &str) -> bool {
        self.amenities.iter().any(|a| a == amenity)
    }

    /// Price quote for a stay of `nights` at the nightly rate
    pub fn stay_price(&self, nights: u32) -> f64 {
        self.price_per_night * f64::from(nights)
    }

    pub fn review_label(&self) -> ReviewLabel {
        ReviewLabel::for_score(self.review_score)
    }
}

/// Wording shown next to a review score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewLabel {
    Excellent,
    VeryGood,
    Good,
}

impl ReviewLabel {
    /// Guest rating presets offered by the filter panel
    pub const PRESETS: [f64; 3] = [9.0, 8.0, 7.0];

    pub fn for_score(score: f64) -> Self {
        if score >= 9.0 {
            ReviewLabel::Excellent
        } else if score >= 8.0 {
            ReviewLabel::VeryGood
        } else {
            ReviewLabel::Good
        }
    }
}

impl fmt::Display for ReviewLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReviewLabel::Excellent => "Excellent",
            ReviewLabel::VeryGood => "Very good",
            ReviewLabel::Good => "Good",
        })
    }
}

/// A city with listings in the catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Destination {
    pub city: String,
    pub country: String,
    pub listing_count: usize,
}
