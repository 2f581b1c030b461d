//! Structural differ.
//!
//! Compares the two versions of one record and produces a flat list of
//! field-level differences with their paths. Mappings are walked recursively;
//! sequences and primitives are compared as whole values.
//!
//! # Examples
//!
//! ```
//! use recdiff::{diff_record, ChangeType, DiffConfig, RecordValue};
//!
//! let old = RecordValue::object([("x", RecordValue::Number(1.0))]);
//! let new = RecordValue::object([("x", RecordValue::Number(2.0))]);
//!
//! let diff = diff_record("A", Some(&old), Some(&new), &DiffConfig::default())
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(diff.kind, ChangeType::Modified);
//! assert_eq!(diff.field_differences[0].path, vec!["x"]);
//! ```

use crate::error::StructuralError;
use crate::filter::FilterConfig;
use crate::tree::{format_path, Defect, RecordValue};
use serde::Serialize;
use std::collections::BTreeMap;

/// Default nesting limit for record values.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// The type of change that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    /// Absent on the source side, present on the target side
    Added,
    /// Present on the source side, absent on the target side
    Removed,
    /// Present on both sides but structurally unequal
    Modified,
}

impl ChangeType {
    /// The classification seen from the other side.
    pub fn inverse(self) -> Self {
        match self {
            ChangeType::Added => ChangeType::Removed,
            ChangeType::Removed => ChangeType::Added,
            ChangeType::Modified => ChangeType::Modified,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Removed => "removed",
            ChangeType::Modified => "modified",
        }
    }
}

/// A single difference inside a record.
///
/// The path lists field names from the record root; an empty path means the
/// record value itself.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDifference {
    pub path: Vec<String>,
    pub kind: ChangeType,
    /// `None` when the field is absent on the source side
    pub source_value: Option<RecordValue>,
    /// `None` when the field is absent on the target side
    pub target_value: Option<RecordValue>,
}

/// The differences for one record key.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDifference {
    pub key: String,
    pub kind: ChangeType,
    pub source_value: Option<RecordValue>,
    pub target_value: Option<RecordValue>,
    /// Empty for Added and Removed records
    pub field_differences: Vec<FieldDifference>,
}

/// Summary counts over record differences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
    /// Records that could not be compared
    pub failed: usize,
}

impl DiffStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_differences(differences: &[RecordDifference]) -> Self {
        let mut stats = Self::new();
        for difference in differences {
            stats.record(difference.kind);
        }
        stats
    }

    pub fn record(&mut self, kind: ChangeType) {
        match kind {
            ChangeType::Added => self.added += 1,
            ChangeType::Removed => self.removed += 1,
            ChangeType::Modified => self.modified += 1,
        }
    }

    /// Returns the total number of changed records.
    pub fn total_changes(&self) -> usize {
        self.added + self.removed + self.modified
    }

    /// Returns true if nothing changed and nothing failed.
    pub fn is_empty(&self) -> bool {
        self.total_changes() == 0 && self.failed == 0
    }
}

/// Configuration for the differ.
#[derive(Debug, Clone)]
pub struct DiffConfig {
    /// Values nested deeper than this are rejected as malformed
    pub max_depth: usize,
    /// Field paths to ignore or focus on
    pub filter: FilterConfig,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            filter: FilterConfig::default(),
        }
    }
}

/// Compares the source and target versions of the record stored under `key`.
///
/// - target missing → the record is `Removed`
/// - source missing → the record is `Added`
/// - both present → `Modified` with its field differences, or `None` when the
///   two values are structurally equal
///
/// # Errors
///
/// Returns a [`StructuralError`] naming the key and path when either value
/// holds a non-finite number or nests deeper than `config.max_depth`.
pub fn diff_record(
    key: &str,
    source: Option<&RecordValue>,
    target: Option<&RecordValue>,
    config: &DiffConfig,
) -> Result<Option<RecordDifference>, StructuralError> {
    for value in [source, target].into_iter().flatten() {
        check_comparable(key, value, config.max_depth)?;
    }

    let difference = match (source, target) {
        (None, None) => None,
        (Some(source), None) => Some(RecordDifference {
            key: key.to_string(),
            kind: ChangeType::Removed,
            source_value: Some(source.clone()),
            target_value: None,
            field_differences: Vec::new(),
        }),
        (None, Some(target)) => Some(RecordDifference {
            key: key.to_string(),
            kind: ChangeType::Added,
            source_value: None,
            target_value: Some(target.clone()),
            field_differences: Vec::new(),
        }),
        (Some(source), Some(target)) => {
            let field_differences = diff_fields(source, target, Vec::new());
            if field_differences.is_empty() {
                None
            } else {
                Some(RecordDifference {
                    key: key.to_string(),
                    kind: ChangeType::Modified,
                    source_value: Some(source.clone()),
                    target_value: Some(target.clone()),
                    field_differences,
                })
            }
        }
    };

    Ok(difference)
}

fn check_comparable(key: &str, value: &RecordValue, max_depth: usize) -> Result<(), StructuralError> {
    match value.find_defect(max_depth) {
        None => Ok(()),
        Some((Defect::NonFiniteNumber, path)) => Err(StructuralError::NonFiniteNumber {
            key: key.to_string(),
            path: format_path(&path),
        }),
        Some((Defect::TooDeep, path)) => Err(StructuralError::DepthExceeded {
            key: key.to_string(),
            path: format_path(&path),
            limit: max_depth,
        }),
    }
}

/// Recursively compares two values located at `path`.
///
/// Shape mismatches and unequal primitives or sequences produce a single
/// Modified difference at `path`; mappings recurse field by field.
pub fn diff_fields(source: &RecordValue, target: &RecordValue, path: Vec<String>) -> Vec<FieldDifference> {
    let mut differences = Vec::new();
    diff_values(source, target, path, &mut differences);
    differences
}

fn diff_values(
    source: &RecordValue,
    target: &RecordValue,
    path: Vec<String>,
    differences: &mut Vec<FieldDifference>,
) {
    match (source, target) {
        (RecordValue::Object(source_map), RecordValue::Object(target_map)) => {
            diff_mappings(source_map, target_map, path, differences);
        }
        _ if source.shape() != target.shape() || source != target => {
            differences.push(FieldDifference {
                path,
                kind: ChangeType::Modified,
                source_value: Some(source.clone()),
                target_value: Some(target.clone()),
            });
        }
        _ => {}
    }
}

/// Walks the union of field names once: source-only fields are Removed,
/// target-only fields are Added, shared fields recurse.
fn diff_mappings(
    source_map: &BTreeMap<String, RecordValue>,
    target_map: &BTreeMap<String, RecordValue>,
    path: Vec<String>,
    differences: &mut Vec<FieldDifference>,
) {
    for field in crate::reconcile::union_keys(source_map, target_map) {
        let mut field_path = path.clone();
        field_path.push(field.clone());

        match (source_map.get(field), target_map.get(field)) {
            (Some(source_value), Some(target_value)) => {
                diff_values(source_value, target_value, field_path, differences);
            }
            (Some(source_value), None) => differences.push(FieldDifference {
                path: field_path,
                kind: ChangeType::Removed,
                source_value: Some(source_value.clone()),
                target_value: None,
            }),
            (None, Some(target_value)) => differences.push(FieldDifference {
                path: field_path,
                kind: ChangeType::Added,
                source_value: None,
                target_value: Some(target_value.clone()),
            }),
            (None, None) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Shape;

    fn num(n: f64) -> RecordValue {
        RecordValue::Number(n)
    }

    #[test]
    fn test_diff_stats_total_changes() {
        let stats = DiffStats {
            added: 2,
            removed: 1,
            modified: 3,
            failed: 0,
        };
        assert_eq!(stats.total_changes(), 6);
        assert!(!stats.is_empty());
        assert!(DiffStats::new().is_empty());
    }

    #[test]
    fn test_diff_stats_counts_failures() {
        let stats = DiffStats {
            failed: 1,
            ..Default::default()
        };
        assert_eq!(stats.total_changes(), 0);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_change_type_inverse() {
        assert_eq!(ChangeType::Added.inverse(), ChangeType::Removed);
        assert_eq!(ChangeType::Removed.inverse(), ChangeType::Added);
        assert_eq!(ChangeType::Modified.inverse(), ChangeType::Modified);
    }

    #[test]
    fn test_identical_records() {
        let value = RecordValue::object([("x", num(1.0))]);
        let result = diff_record("A", Some(&value), Some(&value), &DiffConfig::default()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_removed_and_added_records() {
        let value = RecordValue::object([("y", RecordValue::Bool(true))]);
        let config = DiffConfig::default();

        let removed = diff_record("C", Some(&value), None, &config).unwrap().unwrap();
        assert_eq!(removed.kind, ChangeType::Removed);
        assert!(removed.field_differences.is_empty());
        assert!(removed.target_value.is_none());

        let added = diff_record("B", None, Some(&value), &config).unwrap().unwrap();
        assert_eq!(added.kind, ChangeType::Added);
        assert!(added.field_differences.is_empty());
        assert!(added.source_value.is_none());
    }

    #[test]
    fn test_nested_mapping_paths() {
        let old = RecordValue::object([(
            "user",
            RecordValue::object([("age", num(30.0)), ("email", RecordValue::Null)]),
        )]);
        let new = RecordValue::object([(
            "user",
            RecordValue::object([("age", num(31.0)), ("phone", RecordValue::Null)]),
        )]);

        let diffs = diff_fields(&old, &new, Vec::new());
        assert_eq!(diffs.len(), 3);
        assert_eq!(diffs[0].path, vec!["user", "age"]);
        assert_eq!(diffs[0].kind, ChangeType::Modified);
        assert_eq!(diffs[1].path, vec!["user", "email"]);
        assert_eq!(diffs[1].kind, ChangeType::Removed);
        assert_eq!(diffs[2].path, vec!["user", "phone"]);
        assert_eq!(diffs[2].kind, ChangeType::Added);
    }

    #[test]
    fn test_shape_mismatch_does_not_recurse() {
        let old = RecordValue::object([("settings", RecordValue::String("none".to_string()))]);
        let new = RecordValue::object([(
            "settings",
            RecordValue::object([("a", num(1.0)), ("b", num(2.0))]),
        )]);

        let diffs = diff_fields(&old, &new, Vec::new());
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, vec!["settings"]);
        assert_eq!(diffs[0].kind, ChangeType::Modified);
        assert_eq!(diffs[0].target_value.as_ref().unwrap().shape(), Shape::Mapping);
    }

    #[test]
    fn test_sequences_compare_whole_value() {
        let old = RecordValue::object([("list", RecordValue::Array(vec![num(1.0), num(2.0)]))]);
        let new = RecordValue::object([("list", RecordValue::Array(vec![num(2.0), num(1.0)]))]);

        let diffs = diff_fields(&old, &new, Vec::new());
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].path, vec!["list"]);
        assert_eq!(
            diffs[0].source_value,
            Some(RecordValue::Array(vec![num(1.0), num(2.0)]))
        );
    }

    #[test]
    fn test_primitive_root_difference() {
        let diffs = diff_fields(&num(1.0), &RecordValue::String("1".to_string()), Vec::new());
        assert_eq!(diffs.len(), 1);
        assert!(diffs[0].path.is_empty());
    }

    #[test]
    fn test_non_finite_number_is_structural_error() {
        let bad = RecordValue::object([("rate", num(f64::INFINITY))]);
        let good = RecordValue::object([("rate", num(1.0))]);

        let err = diff_record("Pricing", Some(&good), Some(&bad), &DiffConfig::default())
            .unwrap_err();
        assert_eq!(
            err,
            StructuralError::NonFiniteNumber {
                key: "Pricing".to_string(),
                path: "rate".to_string(),
            }
        );
    }

    #[test]
    fn test_depth_limit_is_structural_error() {
        let config = DiffConfig {
            max_depth: 2,
            ..Default::default()
        };
        let deep = RecordValue::object([(
            "a",
            RecordValue::object([("b", RecordValue::object([("c", num(1.0))]))]),
        )]);

        let err = diff_record("Deep", Some(&deep), None, &config).unwrap_err();
        assert!(matches!(err, StructuralError::DepthExceeded { limit: 2, .. }));
        assert_eq!(err.path(), "a.b.c");
    }
}
