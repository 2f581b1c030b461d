//! Record-set reconciliation.
//!
//! Aligns two key→record mappings by key. Every key of `source ∪ target` is
//! visited exactly once and annotated with where it is present.

use crate::tree::RecordCollection;
use std::collections::BTreeMap;

/// Where a key is present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    BothPresent,
    SourceOnly,
    TargetOnly,
}

/// Union of the keys of two maps, source keys first, then keys only the
/// target has. Each key appears once.
pub fn union_keys<'a, V, W>(
    source: &'a BTreeMap<String, V>,
    target: &'a BTreeMap<String, W>,
) -> Vec<&'a String> {
    source
        .keys()
        .chain(target.keys().filter(|key| !source.contains_key(*key)))
        .collect()
}

/// Aligns `source` and `target` by key.
///
/// Output order is source keys first (in collection order) followed by
/// target-only keys. Keys compare by exact string equality. Empty
/// collections are fine; the result is then empty too.
pub fn reconcile(source: &RecordCollection, target: &RecordCollection) -> Vec<(String, Presence)> {
    let from_source = source.keys().map(|key| {
        let presence = if target.contains_key(key) {
            Presence::BothPresent
        } else {
            Presence::SourceOnly
        };
        (key.clone(), presence)
    });

    let from_target = target
        .keys()
        .filter(|key| !source.contains_key(key))
        .map(|key| (key.clone(), Presence::TargetOnly));

    from_source.chain(from_target).collect()
}
