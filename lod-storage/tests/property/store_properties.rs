use lod_storage::EntryStore;
use proptest::prelude::*;
use test_fixtures::make_entry;

// ── Eviction correctness ─────────────────────────────────────────────────
//
// After every insert the store is within capacity, and any entry evicted by
// that insert scored no higher than every entry present before the insert.
// Eviction runs before the newcomer is stored, so the newcomer itself may
// score lower than the victim.

proptest! {
    #[test]
    fn eviction_keeps_capacity_and_removes_minimum(
        capacity in 1usize..8,
        scores in proptest::collection::vec((0.0f64..=1.0, 0.0f64..=1.0), 1..40),
    ) {
        let mut store = EntryStore::new(capacity);
        for (i, (priority, confidence)) in scores.iter().enumerate() {
            let before: Vec<(String, f64)> = store
                .values()
                .map(|e| (e.id.to_string(), e.value_score()))
                .collect();

            let outcome = store
                .insert(make_entry(&format!("e{i}"), *priority, *confidence, i as i64))
                .unwrap();
            prop_assert!(store.len() <= capacity);

            for evicted in &outcome.evicted {
                let evicted_score = before
                    .iter()
                    .find(|(id, _)| id == evicted.as_str())
                    .map(|(_, s)| *s)
                    .unwrap();
                for (id, score) in &before {
                    if id != evicted.as_str() {
                        prop_assert!(evicted_score <= *score);
                    }
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn ids_stay_unique_under_reinsert(ids in proptest::collection::vec(0u8..5, 1..30)) {
        let mut store = EntryStore::new(10);
        for (i, id) in ids.iter().enumerate() {
            store.insert(make_entry(&format!("id{id}"), 0.5, 0.5, i as i64)).unwrap();
        }
        let mut distinct = ids.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(store.len(), distinct.len());
    }
}
