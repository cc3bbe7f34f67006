//! Victim selection: lowest value score first, oldest on ties.

use std::cmp::Ordering;

use lod_core::{CacheEntry, EntryId};

/// Total order used for eviction. `Less` means "evict first".
pub fn eviction_order(a: &CacheEntry, b: &CacheEntry) -> Ordering {
    a.value_score()
        .total_cmp(&b.value_score())
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// The entry with the minimum value score; ties go to the oldest
/// `created_at`, then the smallest id.
pub fn select_victim<'a, I>(entries: I) -> Option<&'a EntryId>
where
    I: IntoIterator<Item = &'a CacheEntry>,
{
    entries
        .into_iter()
        .min_by(|a, b| eviction_order(a, b))
        .map(|e| &e.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_fixtures::make_entry;

    #[test]
    fn picks_lowest_value_score() {
        let entries = [
            make_entry("a", 0.9, 1.0, 0),
            make_entry("b", 0.2, 1.0, 5),
            make_entry("c", 0.5, 1.0, 1),
        ];
        assert_eq!(select_victim(&entries).unwrap().as_str(), "b");
    }

    #[test]
    fn ties_go_to_oldest() {
        let entries = [
            make_entry("young", 0.5, 0.5, 10),
            make_entry("old", 0.5, 0.5, 1),
        ];
        assert_eq!(select_victim(&entries).unwrap().as_str(), "old");
    }

    #[test]
    fn empty_has_no_victim() {
        let entries: Vec<CacheEntry> = Vec::new();
        assert!(select_victim(&entries).is_none());
    }
}
