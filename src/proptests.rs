//! Model-based tests that drive the tree alongside a linear-scan oracle.

use std::collections::HashSet;

use proptest::prelude::*;

use crate::GeneralizedSuffixTree;

/// Oracle implementation: keep the raw (key, id) pairs and answer searches
/// by scanning them.
#[derive(Default)]
struct Model {
    entries: Vec<(String, u64)>,
}

impl Model {
    fn put(&mut self, key: &str, id: u64) {
        self.entries.push((key.to_owned(), id));
    }

    fn search(&self, query: &str) -> HashSet<u64> {
        self.entries
            .iter()
            .filter(|(key, _)| key.contains(query))
            .map(|(_, id)| *id)
            .collect()
    }
}

/// Small alphabets force heavy structure sharing; the fixed words pin the
/// shapes that historically needed the deferred-split behavior.
fn key_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ab]{1,12}",
        "[a-d]{1,10}",
        "[a-z]{1,6}",
        Just("cacao".to_owned()),
        Just("cacacato".to_owned()),
        Just("banana".to_owned()),
        Just("addressrestricted".to_owned()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn search_matches_linear_scan(
        keys in prop::collection::vec(key_strategy(), 1..16),
        probes in prop::collection::vec("[a-d]{1,5}", 0..8),
    ) {
        let mut tree = GeneralizedSuffixTree::new();
        let mut model = Model::default();
        for (i, key) in keys.iter().enumerate() {
            tree.put(key, i as u64).unwrap();
            model.put(key, i as u64);
            tree.check_invariants();
        }
        // Substring completeness: every substring of every key finds the
        // exact id set the oracle reports.
        for (key, _) in &model.entries {
            for from in 0..key.len() {
                for to in from + 1..=key.len() {
                    let query = &key[from..to];
                    prop_assert_eq!(
                        tree.search(query),
                        model.search(query),
                        "query {:?}",
                        query
                    );
                }
            }
        }
        // No false positives on probes unrelated to the inserted keys.
        for probe in &probes {
            prop_assert_eq!(
                tree.search(probe),
                model.search(probe),
                "probe {:?}",
                probe
            );
        }
    }

    #[test]
    fn rejected_put_leaves_the_tree_intact(
        keys in prop::collection::vec("[a-c]{1,8}", 2..8),
        late_key in "[a-c]{1,8}",
    ) {
        let mut tree = GeneralizedSuffixTree::new();
        for (i, key) in keys.iter().enumerate() {
            tree.put(key, 10 + i as u64).unwrap();
        }
        let before: Vec<HashSet<u64>> = keys.iter().map(|key| tree.search(key)).collect();
        prop_assert!(tree.put(&late_key, 3).is_err());
        let after: Vec<HashSet<u64>> = keys.iter().map(|key| tree.search(key)).collect();
        prop_assert_eq!(before, after);
    }

    #[test]
    fn repeated_insertion_accumulates_ids(key in "[a-c]{1,10}") {
        let mut tree = GeneralizedSuffixTree::new();
        tree.put(&key, 0).unwrap();
        tree.put(&key, 1).unwrap();
        tree.check_invariants();
        for from in 0..key.len() {
            for to in from + 1..=key.len() {
                let hits = tree.search(&key[from..to]);
                prop_assert!(
                    hits.contains(&0) && hits.contains(&1),
                    "substring {:?} lost an id: {:?}",
                    &key[from..to],
                    hits
                );
            }
        }
    }
}
