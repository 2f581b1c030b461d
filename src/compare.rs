//! Batch comparison of record collections.
//!
//! Runs reconciliation and the structural differ for every key of a
//! collection pair. One malformed record never suppresses the rest of the
//! batch: its [`StructuralError`] is collected next to the successful results.

use crate::diff::{diff_record, ChangeType, DiffConfig, DiffStats, RecordDifference};
use crate::error::{RecdiffError, StructuralError};
use crate::filter::filter_fields;
use crate::reconcile::{reconcile, union_keys};
use crate::tree::{RecordBundle, RecordCollection};
use std::collections::BTreeMap;

/// Outcome of comparing one source collection with one target collection.
///
/// Every key of `source ∪ target` appears in exactly one of `differences`,
/// `unchanged` or `failures`.
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub differences: Vec<RecordDifference>,
    /// Keys present on both sides with no remaining field differences
    pub unchanged: Vec<String>,
    pub failures: Vec<StructuralError>,
    pub stats: DiffStats,
}

impl Comparison {
    /// Returns true if nothing changed and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }
}

/// Compares two record collections key by key.
#[tracing::instrument(level = "debug", skip_all, fields(source = source.len(), target = target.len()))]
pub fn compare_collections(
    source: &RecordCollection,
    target: &RecordCollection,
    config: &DiffConfig,
) -> Comparison {
    let mut comparison = Comparison::default();

    for (key, presence) in reconcile(source, target) {
        tracing::trace!(%key, ?presence, "comparing record");

        match diff_record(&key, source.get(&key), target.get(&key), config) {
            Ok(Some(mut difference)) => {
                if difference.kind == ChangeType::Modified {
                    difference.field_differences =
                        filter_fields(difference.field_differences, &config.filter);
                    if difference.field_differences.is_empty() {
                        comparison.unchanged.push(key);
                        continue;
                    }
                }
                comparison.stats.record(difference.kind);
                comparison.differences.push(difference);
            }
            Ok(None) => comparison.unchanged.push(key),
            Err(err) => {
                tracing::warn!(%key, path = err.path(), "record cannot be compared: {}", err);
                comparison.stats.failed += 1;
                comparison.failures.push(err);
            }
        }
    }

    tracing::debug!(
        added = comparison.stats.added,
        removed = comparison.stats.removed,
        modified = comparison.stats.modified,
        failed = comparison.stats.failed,
        "comparison finished"
    );

    comparison
}

/// Compares every record type of two bundles independently.
///
/// A type missing from one side is compared against an empty collection.
/// When `types` is non-empty only those types are compared. Results are keyed
/// by record type and never merged across types.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compare_bundles(
    source: &RecordBundle,
    target: &RecordBundle,
    types: &[String],
    config: &DiffConfig,
) -> BTreeMap<String, Comparison> {
    let empty = RecordCollection::new();

    union_keys(source, target)
        .into_iter()
        .filter(|record_type| types.is_empty() || types.contains(record_type))
        .map(|record_type| {
            tracing::debug!(%record_type, "comparing record type");
            let comparison = compare_collections(
                source.get(record_type).unwrap_or(&empty),
                target.get(record_type).unwrap_or(&empty),
                config,
            );
            (record_type.clone(), comparison)
        })
        .collect()
}

/// Checks that every requested record type exists in at least one bundle.
///
/// # Errors
///
/// Returns `RecdiffError::Config` naming the unknown types and the types
/// the bundles do contain.
pub fn check_types(
    source: &RecordBundle,
    target: &RecordBundle,
    types: &[String],
) -> Result<(), RecdiffError> {
    let unknown: Vec<&str> = types
        .iter()
        .filter(|record_type| {
            !source.contains_key(*record_type) && !target.contains_key(*record_type)
        })
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        return Ok(());
    }

    let available: Vec<&str> = union_keys(source, target)
        .into_iter()
        .map(String::as_str)
        .collect();
    Err(RecdiffError::config(format!(
        "unknown record type {} (available: {})",
        unknown.join(", "),
        available.join(", ")
    )))
}
