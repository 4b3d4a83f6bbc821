use reservo::models::{Coordinates, Features, Location, Policies};
use reservo::{
    search, search_sorted, sort, Catalog, Category, FilterCriteria, Listing, MemoryStore,
    SavedListings, SearchQuery, SortKey,
};

fn listing(id: &str, city: &str, country: &str, category: Category, price: f64, score: f64) -> Listing {
    Listing {
        id: id.to_string(),
        name: format!("Listing {id}"),
        category,
        location: Location {
            city: city.to_string(),
            country: country.to_string(),
            address: String::new(),
            coordinates: Coordinates { lat: 0.0, lng: 0.0 },
            distance_from_center_km: 1.0,
        },
        star_rating: 3,
        review_score: score,
        review_count: 10,
        price_per_night: price,
        currency: "EUR".to_string(),
        amenities: vec!["Free WiFi".to_string()],
        description: String::new(),
        rooms: Vec::new(),
        policies: Policies::default(),
        features: Features::default(),
    }
}

fn catalog() -> Catalog {
    Catalog::new(vec![
        listing("a", "Lisbon", "Portugal", Category::Apartment, 90.0, 8.0),
        listing("b", "Porto", "Portugal", Category::Hotel, 120.0, 9.1),
        listing("c", "Seville", "Spain", Category::Villa, 90.0, 9.1),
        listing("d", "Lisbon", "Portugal", Category::Hostel, 25.0, 7.2),
        listing("e", "Madrid", "Spain", Category::Hotel, 2400.0, 9.9),
    ])
    .unwrap()
}

fn ids<'a>(listings: &[&'a Listing]) -> Vec<&'a str> {
    listings.iter().map(|l| l.id.as_str()).collect()
}

#[test]
fn routing_query_drives_search() {
    let catalog = catalog();
    let query = SearchQuery::parse("destination=portugal&type=hotel&adults=2");

    let results = search(&catalog, &query.destination, &query.to_criteria());
    assert_eq!(ids(&results), vec!["b"]);
}

#[test]
fn panel_default_price_cap_excludes_listings_above_slider_max() {
    let catalog = catalog();

    let unrestricted = search(&catalog, "spain", &FilterCriteria::default());
    assert_eq!(ids(&unrestricted), vec!["c", "e"]);

    let panel = search(&catalog, "spain", &FilterCriteria::default_panel());
    assert_eq!(ids(&panel), vec!["c"]);
}

#[test]
fn sorting_twice_gives_the_same_order() {
    let catalog = catalog();
    let results = search(&catalog, "", &FilterCriteria::default());

    let once = sort(&results, SortKey::PriceAscending);
    let twice = sort(&once, SortKey::PriceAscending);
    assert_eq!(ids(&once), vec!["d", "a", "c", "b", "e"]);
    assert_eq!(ids(&once), ids(&twice));

    // "b" and "c" tie on score and keep catalog order
    let by_score = sort(&results, SortKey::ReviewScoreDescending);
    assert_eq!(ids(&by_score), vec!["e", "b", "c", "a", "d"]);
}

#[test]
fn results_annotated_with_saved_state() {
    let catalog = catalog();
    let store = MemoryStore::new();
    SavedListings::new(store.clone()).toggle("d").unwrap();

    let criteria = FilterCriteria::default().with_sort(SortKey::PriceDescending);
    let results = search_sorted(&catalog, "lisbon", &criteria);

    let card = SavedListings::new(store);
    let hearts: Vec<(&str, bool)> = results
        .iter()
        .map(|l| (l.id.as_str(), card.contains(&l.id)))
        .collect();
    assert_eq!(hearts, vec![("a", false), ("d", true)]);
}

#[test]
fn stay_quote_uses_nightly_rate() {
    let catalog = catalog();
    let query = SearchQuery::parse("destination=seville&checkIn=2026-07-01&checkOut=2026-07-05");
    let results = search(&catalog, &query.destination, &query.to_criteria());

    let nights = query.nights().unwrap();
    assert_eq!(nights, 4);
    assert_eq!(results[0].stay_price(nights), 360.0);
}
