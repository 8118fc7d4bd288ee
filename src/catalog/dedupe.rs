//! Stable, first-occurrence-wins deduplication.

use std::collections::HashSet;
use std::hash::Hash;

use super::types::Identity;

/// Keep the first record for every key, preserving input order.
pub fn dedupe_by_key<T, K, F>(records: impl IntoIterator<Item = T>, mut key_fn: F) -> Vec<T>
where
    K: Eq + Hash,
    F: FnMut(&T) -> K,
{
    let mut seen: HashSet<K> = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(key_fn(record)))
        .collect()
}

/// Deduplicate records by their [`Identity`] key.
pub fn dedupe<T: Identity>(records: impl IntoIterator<Item = T>) -> Vec<T> {
    dedupe_by_key(records, |r| r.identity())
}
