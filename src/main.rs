use anyhow::Context;
use reservo::{search_sorted, Config, SavedListings};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env().context("Failed to load configuration")?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏨 Reservo - listing search");
    info!("===========================");

    let catalog = config
        .load_catalog()
        .await
        .context("Failed to load catalog")?;
    let store = config
        .open_store()
        .context("Failed to open saved listings store")?;

    for id in &config.toggle {
        // Each toggle goes through its own handle, like separate UI surfaces
        let saved = SavedListings::new(Arc::clone(&store));
        saved
            .toggle(id)
            .with_context(|| format!("Failed to toggle saved listing {id}"))?;
    }

    let query = &config.query;
    let criteria = query.to_criteria().with_sort(config.sort);
    let results = search_sorted(&catalog, &query.destination, &criteria);

    info!(
        "\n✅ {} properties{}\n",
        results.len(),
        if query.destination.is_empty() {
            String::new()
        } else {
            format!(" in {}", query.destination)
        }
    );

    let saved = SavedListings::new(Arc::clone(&store));
    let hearts = saved.snapshot();
    for (i, listing) in results.iter().enumerate() {
        let heart = if hearts.contains(&listing.id) { "♥" } else { "♡" };
        println!(
            "{}. {} {} ({} {}/night)",
            i + 1,
            heart,
            listing.name,
            listing.price_per_night,
            listing.currency
        );
        println!(
            "   {}, {} · {} · {}★",
            listing.location.city, listing.location.country, listing.category, listing.star_rating
        );
        println!(
            "   {} {} ({} reviews)",
            listing.review_score,
            listing.review_label(),
            listing.review_count
        );
        if let Some(nights) = query.nights().filter(|n| *n > 0) {
            println!(
                "   {} nights: {} {}",
                nights,
                listing.stay_price(nights),
                listing.currency
            );
        }
        println!("   ID: {}", listing.id);
        println!();
    }

    let saved_listings = saved.resolve(&catalog);
    info!("💾 {} saved listing(s)", saved.count());
    for listing in saved_listings {
        println!("♥ {} ({})", listing.name, listing.location.city);
    }

    Ok(())
}
