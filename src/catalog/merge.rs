//! Incremental merge of a persisted record set with newly extracted records.

use std::collections::HashSet;

use super::types::Identity;

/// Result of merging incoming records into an existing set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome<T> {
    /// Existing records (all of them, in order) followed by the new ones.
    pub records: Vec<T>,
    /// How many incoming records were appended.
    pub added: usize,
}

/// Merge `incoming` into `existing`.
///
/// Existing records are never removed, reordered or replaced. An incoming
/// record is appended only when no record with its key has been seen yet,
/// so merging a set into itself is a no-op.
pub fn merge<T: Identity>(existing: Vec<T>, incoming: impl IntoIterator<Item = T>) -> MergeOutcome<T> {
    let mut seen: HashSet<T::Key> = existing.iter().map(|r| r.identity()).collect();
    let mut records = existing;
    let before = records.len();

    for record in incoming {
        if seen.insert(record.identity()) {
            records.push(record);
        }
    }

    let added = records.len() - before;
    MergeOutcome { records, added }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::EndpointEntry;

    fn ep(method: &str, path: &str) -> EndpointEntry {
        EndpointEntry::new(method, path)
    }

    #[test]
    fn test_merge_appends_only_new_keys() {
        let existing = vec![ep("GET", "/api/users"), ep("POST", "/api/login")];
        let incoming = vec![ep("GET", "/api/users"), ep("DELETE", "/api/users/{id}")];

        let out = merge(existing, incoming);
        assert_eq!(out.added, 1);
        assert_eq!(
            out.records,
            vec![
                ep("GET", "/api/users"),
                ep("POST", "/api/login"),
                ep("DELETE", "/api/users/{id}"),
            ]
        );
    }

    #[test]
    fn test_merge_identical_set_is_noop() {
        let existing = vec![ep("GET", "/api/a"), ep("PUT", "/api/b")];
        let out = merge(existing.clone(), existing.clone());
        assert_eq!(out.added, 0);
        assert_eq!(out.records, existing);
    }

    #[test]
    fn test_merge_keeps_existing_duplicates() {
        // Prior output is trusted as-is; only incoming records are filtered.
        let existing = vec![ep("GET", "/api/a"), ep("GET", "/api/a")];
        let out = merge(existing, vec![ep("GET", "/api/a")]);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.added, 0);
    }

    #[test]
    fn test_merge_dedupes_within_incoming() {
        let out = merge(Vec::new(), vec![ep("GET", "/x"), ep("GET", "/x"), ep("POST", "/x")]);
        assert_eq!(out.records, vec![ep("GET", "/x"), ep("POST", "/x")]);
        assert_eq!(out.added, 2);
    }

    #[test]
    fn test_method_is_part_of_identity() {
        let out = merge(vec![ep("GET", "/api/a")], vec![ep("POST", "/api/a")]);
        assert_eq!(out.added, 1);
    }
}
