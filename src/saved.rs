//! Saved listings ("hearts").
//!
//! The durable slot is the only copy of the saved set. [`SavedListings`] keeps
//! no copy of its own: every query re-reads the slot and every mutation is
//! a single read-modify-write of it, so any number of independent handles over
//! the same backing store stay consistent without notifying each other.
//!
//! Slot format: a JSON array of id strings under [`SAVED_LISTINGS_KEY`].
use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::error::StorageResult;
use crate::models::Listing;
use crate::storage::KeyValueStore;

/// Key of the durable slot shared by every consumer of the saved set
pub const SAVED_LISTINGS_KEY: &str = "savedProperties";

pub struct SavedListings<S> {
    store: S,
}

impl<S: KeyValueStore> SavedListings<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Current saved ids, in the order they were saved.
    ///
    /// A missing slot, an unreadable medium and a corrupt payload all read as
    /// the empty set.
    pub fn get_all(&self) -> Vec<String> {
        match self.store.read(SAVED_LISTINGS_KEY) {
            Ok(raw) => decode(raw.as_deref()),
            Err(e) => {
                warn!(error = %e, "failed to read saved listings, treating as empty");
                Vec::new()
            }
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get_all().iter().any(|saved| saved == id)
    }

    /// Saved ids as a set, read once. Use this when rendering many cards so
    /// each membership check is a hash lookup instead of a slot read.
    pub fn snapshot(&self) -> HashSet<String> {
        self.get_all().into_iter().collect()
    }

    /// Number shown on the header badge
    pub fn count(&self) -> usize {
        self.get_all().len()
    }

    /// Save `id`. Saving an already saved id changes nothing.
    pub fn add(&self, id: &str) -> StorageResult<()> {
        self.mutate(|ids| {
            if ids.iter().any(|saved| saved == id) {
                return false;
            }
            ids.push(id.to_string());
            true
        })?;
        Ok(())
    }

    /// Unsave `id`. Unsaving an id that is not saved changes nothing.
    pub fn remove(&self, id: &str) -> StorageResult<()> {
        self.mutate(|ids| {
            let before = ids.len();
            ids.retain(|saved| saved != id);
            ids.len() != before
        })?;
        Ok(())
    }

    /// Flip `id`'s membership and return the resulting set
    pub fn toggle(&self, id: &str) -> StorageResult<Vec<String>> {
        let ids = self.mutate(|ids| {
            if let Some(pos) = ids.iter().position(|saved| saved == id) {
                ids.remove(pos);
            } else {
                ids.push(id.to_string());
            }
            true
        })?;

        info!(
            id,
            saved = ids.iter().any(|saved| saved == id),
            total = ids.len(),
            "toggled saved listing"
        );
        Ok(ids)
    }

    /// Saved listings that still exist in `catalog`, in saved order.
    /// Ids with no catalog entry are skipped, not removed.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Listing> {
        let ids = self.get_all();
        let listings: Vec<&Listing> = ids
            .iter()
            .filter_map(|id| catalog.get_by_id(id))
            .collect();

        if listings.len() != ids.len() {
            debug!(
                saved = ids.len(),
                resolved = listings.len(),
                "saved ids without catalog entry skipped"
            );
        }
        listings
    }

    /// Apply `edit` to the current set inside one storage update. `edit`
    /// returns whether it changed anything; unchanged sets are not rewritten.
    fn mutate<F>(&self, mut edit: F) -> StorageResult<Vec<String>>
    where
        F: FnMut(&mut Vec<String>) -> bool,
    {
        let mut result = Vec::new();
        let mut encode_error = None;

        self.store.update(SAVED_LISTINGS_KEY, &mut |raw| {
            let mut ids = decode(raw);
            let changed = edit(&mut ids);
            let next = if changed {
                match serde_json::to_string(&ids) {
                    Ok(json) => Some(json),
                    Err(e) => {
                        encode_error = Some(e);
                        None
                    }
                }
            } else {
                None
            };
            result = ids;
            next
        })?;

        if let Some(e) = encode_error {
            return Err(e.into());
        }
        Ok(result)
    }
}

/// Parse a slot payload. Duplicate ids keep their first position.
fn decode(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    let ids: Vec<String> = match serde_json::from_str(raw) {
        Ok(ids) => ids,
        Err(e) => {
            warn!(error = %e, "saved listings payload is corrupt, treating as empty");
            return Vec::new();
        }
    };

    let mut unique: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BuiltinCatalog;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;

    fn sorted(mut ids: Vec<String>) -> Vec<String> {
        ids.sort();
        ids
    }

    #[test]
    fn uninitialized_slot_reads_empty() {
        let saved = SavedListings::new(MemoryStore::new());
        assert!(saved.get_all().is_empty());
        assert!(!saved.contains("1"));
        assert_eq!(saved.count(), 0);
    }

    #[test]
    fn add_is_idempotent() {
        let saved = SavedListings::new(MemoryStore::new());
        saved.add("1").unwrap();
        saved.add("2").unwrap();
        let first = saved.get_all();

        saved.add("1").unwrap();
        assert_eq!(sorted(saved.get_all()), sorted(first));
        assert_eq!(saved.count(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let saved = SavedListings::new(MemoryStore::new());
        saved.remove("1").unwrap();
        assert!(saved.get_all().is_empty());

        saved.add("1").unwrap();
        saved.add("2").unwrap();
        saved.remove("1").unwrap();
        saved.remove("1").unwrap();
        assert_eq!(saved.get_all(), vec!["2"]);
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let saved = SavedListings::new(MemoryStore::new());

        assert_eq!(saved.toggle("1").unwrap(), vec!["1"]);
        assert_eq!(saved.toggle("1").unwrap(), Vec::<String>::new());
        assert!(saved.get_all().is_empty());

        saved.add("5").unwrap();
        saved.toggle("3").unwrap();
        saved.toggle("3").unwrap();
        assert_eq!(saved.get_all(), vec!["5"]);
    }

    #[test]
    fn toggle_returns_post_mutation_set() {
        let saved = SavedListings::new(MemoryStore::new());
        saved.add("a").unwrap();
        saved.add("b").unwrap();

        assert_eq!(saved.toggle("c").unwrap(), vec!["a", "b", "c"]);
        assert_eq!(saved.toggle("a").unwrap(), vec!["b", "c"]);
    }

    #[test]
    fn independent_handles_see_each_others_writes() {
        let store = MemoryStore::new();
        let card = SavedListings::new(store.clone());
        let header = SavedListings::new(store.clone());

        card.add("3").unwrap();
        assert!(header.contains("3"));
        assert_eq!(header.count(), 1);

        header.toggle("3").unwrap();
        assert!(!card.contains("3"));

        let detail_page = SavedListings::new(store);
        assert!(detail_page.get_all().is_empty());
    }

    #[test]
    fn snapshot_matches_contains_and_is_detached() {
        let store = MemoryStore::new();
        let saved = SavedListings::new(store.clone());
        saved.add("1").unwrap();
        saved.add("6").unwrap();

        let hearts = saved.snapshot();
        assert_eq!(hearts.len(), saved.count());
        for id in ["1", "2", "6", "7"] {
            assert_eq!(hearts.contains(id), saved.contains(id));
        }

        SavedListings::new(store).toggle("2").unwrap();
        assert!(!hearts.contains("2"));
        assert!(saved.snapshot().contains("2"));
    }

    #[test]
    fn corrupt_payload_self_heals() {
        let store = MemoryStore::new();
        store.write(SAVED_LISTINGS_KEY, "{not json").unwrap();
        let saved = SavedListings::new(store.clone());

        assert!(saved.get_all().is_empty());
        assert_eq!(saved.toggle("2").unwrap(), vec!["2"]);
        assert_eq!(
            store.read(SAVED_LISTINGS_KEY).unwrap().as_deref(),
            Some(r#"["2"]"#)
        );

        store.write(SAVED_LISTINGS_KEY, "[1, 2]").unwrap();
        assert!(saved.get_all().is_empty());
    }

    #[test]
    fn duplicate_ids_in_payload_collapse() {
        let store = MemoryStore::new();
        store
            .write(SAVED_LISTINGS_KEY, r#"["4", "1", "4"]"#)
            .unwrap();
        let saved = SavedListings::new(store);

        assert_eq!(saved.get_all(), vec!["4", "1"]);
        assert_eq!(saved.toggle("4").unwrap(), vec!["1"]);
    }

    #[test]
    fn resolve_skips_dangling_ids() {
        let catalog = Catalog::new(BuiltinCatalog::listings().unwrap()).unwrap();
        let saved = SavedListings::new(MemoryStore::new());
        saved.add("6").unwrap();
        saved.add("gone").unwrap();
        saved.add("2").unwrap();

        let ids: Vec<&str> = saved
            .resolve(&catalog)
            .iter()
            .map(|l| l.id.as_str())
            .collect();
        assert_eq!(ids, vec!["6", "2"]);
        assert!(saved.contains("gone"));
        assert_eq!(saved.count(), 3);
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Poisoned)
        }

        fn write(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Poisoned)
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Err(StorageError::Poisoned)
        }
    }

    #[test]
    fn unreadable_store_reads_empty_but_mutations_fail() {
        let saved = SavedListings::new(BrokenStore);
        assert!(saved.get_all().is_empty());
        assert!(!saved.contains("1"));
        assert!(saved.snapshot().is_empty());
        assert!(saved.toggle("1").is_err());
        assert!(saved.add("1").is_err());
    }
}
