use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::models::Category;
use crate::search::types::FilterCriteria;

/// Check-in / check-out pair picked in the search bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayDates {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayDates {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Nights between the two dates; zero unless check-out is after check-in
    pub fn nights(&self) -> u32 {
        let days = (self.check_out - self.check_in).num_days();
        u32::try_from(days).unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guests {
    pub adults: u32,
    pub children: u32,
    pub rooms: u32,
}

impl Default for Guests {
    fn default() -> Self {
        Self {
            adults: 2,
            children: 0,
            rooms: 1,
        }
    }
}

/// Parameters handed over by the routing layer on the search page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub destination: String,
    pub category: Option<Category>,
    pub stay: Option<StayDates>,
    pub guests: Guests,
}

impl SearchQuery {
    /// Build from already-decoded `key=value` pairs. Unknown keys are ignored;
    /// malformed values keep their defaults.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut query = Self::default();
        let mut check_in = None;
        let mut check_out = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "destination" => query.destination = value.to_string(),
                "type" if value.is_empty() => query.category = None,
                "type" => match value.parse() {
                    Ok(category) => query.category = Some(category),
                    Err(e) => {
                        warn!(error = %e, "ignoring property type filter");
                        query.category = None;
                    }
                },
                "checkIn" => check_in = parse_date(value),
                "checkOut" => check_out = parse_date(value),
                "adults" => set_count(&mut query.guests.adults, "adults", value),
                "children" => set_count(&mut query.guests.children, "children", value),
                "rooms" => set_count(&mut query.guests.rooms, "rooms", value),
                other => debug!(key = other, "ignoring unknown query parameter"),
            }
        }

        if let (Some(check_in), Some(check_out)) = (check_in, check_out) {
            query.stay = Some(StayDates::new(check_in, check_out));
        }

        query
    }

    /// Parse a raw `application/x-www-form-urlencoded` query string, as the
    /// search bar writes it (`+` for spaces, `%3A` for colons).
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Filter panel state implied by the URL: panel defaults plus the
    /// property type, if one was given
    pub fn to_criteria(&self) -> FilterCriteria {
        let criteria = FilterCriteria::default_panel();
        match self.category {
            Some(category) => criteria.with_category(category),
            None => criteria,
        }
    }

    pub fn nights(&self) -> Option<u32> {
        self.stay.map(|s| s.nights())
    }
}

/// Accepts RFC 3339 timestamps (what the search bar emits) or plain dates
fn parse_date(value: &str) -> Option<NaiveDate> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"));

    match parsed {
        Ok(date) => Some(date),
        Err(e) => {
            debug!(value, error = %e, "ignoring malformed date");
            None
        }
    }
}

fn set_count(slot: &mut u32, name: &str, value: &str) {
    match value.trim().parse() {
        Ok(n) => *slot = n,
        Err(e) => debug!(param = name, value, error = %e, "ignoring malformed count"),
    }
}
