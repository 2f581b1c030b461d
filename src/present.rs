//! Presentation adapter.
//!
//! Turns record differences into display rows: filtered by change kind and
//! "only changes", sorted by key, with values rendered as short strings.
//!
//! The "only changes" check compares the *rendered* strings, which is looser
//! than the differ's structural equality. Two different objects that render
//! to the same label are shown as unchanged here.

use crate::diff::{ChangeType, FieldDifference, RecordDifference};
use crate::tree::{format_number, format_path, RecordValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Rendering of a missing or null value.
pub const NOT_PRESENT: &str = "Not present";

/// Attributes that name an object, in lookup order.
const NAME_ATTRIBUTES: [&str; 2] = ["fullName", "label"];

/// Which change kinds to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Added,
    Removed,
    Modified,
}

impl StatusFilter {
    pub fn matches(self, kind: ChangeType) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Added => kind == ChangeType::Added,
            StatusFilter::Removed => kind == ChangeType::Removed,
            StatusFilter::Modified => kind == ChangeType::Modified,
        }
    }
}

/// Filter state supplied by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// Drop rows whose source and target render identically
    pub only_changes: bool,
    pub status_filter: StatusFilter,
}

/// One record, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub key: String,
    pub source: String,
    pub target: String,
    pub kind: ChangeType,
    pub fields: Vec<FieldRow>,
}

/// One field difference inside a record, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub path: String,
    pub label: String,
    pub source: String,
    pub target: String,
    pub kind: ChangeType,
}

/// Filters, formats and sorts record differences for display.
///
/// Rows are sorted by key with [`locale_cmp`]; the sort is stable.
pub fn present(differences: &[RecordDifference], options: &ViewOptions) -> Vec<DisplayRow> {
    let mut rows: Vec<DisplayRow> = differences
        .iter()
        .filter(|difference| options.status_filter.matches(difference.kind))
        .map(|difference| display_row(difference, options))
        .filter(|row| !options.only_changes || row.source != row.target)
        .collect();

    rows.sort_by(|a, b| locale_cmp(&a.key, &b.key));
    rows
}

fn display_row(difference: &RecordDifference, options: &ViewOptions) -> DisplayRow {
    let mut fields: Vec<FieldRow> = difference
        .field_differences
        .iter()
        .map(field_row)
        .filter(|row| !options.only_changes || row.source != row.target)
        .collect();
    fields.sort_by(|a, b| locale_cmp(&a.path, &b.path));

    DisplayRow {
        key: difference.key.clone(),
        source: format_value(difference.source_value.as_ref()),
        target: format_value(difference.target_value.as_ref()),
        kind: difference.kind,
        fields,
    }
}

fn field_row(field: &FieldDifference) -> FieldRow {
    let label = if field.path.is_empty() {
        format_path(&field.path)
    } else {
        field
            .path
            .iter()
            .map(|segment| humanize_field_name(segment))
            .collect::<Vec<_>>()
            .join(" / ")
    };

    FieldRow {
        path: format_path(&field.path),
        label,
        source: format_value(field.source_value.as_ref()),
        target: format_value(field.target_value.as_ref()),
        kind: field.kind,
    }
}

/// Renders a value for display.
///
/// - absent or null → `Not present`
/// - boolean → `Yes` / `No`
/// - array → elements rendered one by one and joined with `", "`
/// - object → its `fullName` or `label`, else JSON
/// - anything else → its plain string form
pub fn format_value(value: Option<&RecordValue>) -> String {
    match value {
        None | Some(RecordValue::Null) => NOT_PRESENT.to_string(),
        Some(RecordValue::Bool(true)) => "Yes".to_string(),
        Some(RecordValue::Bool(false)) => "No".to_string(),
        Some(RecordValue::Array(items)) => items
            .iter()
            .map(format_element)
            .collect::<Vec<_>>()
            .join(", "),
        Some(object @ RecordValue::Object(_)) => {
            display_name(object).unwrap_or_else(|| object.to_json_string())
        }
        Some(other) => plain_string(other),
    }
}

fn format_element(item: &RecordValue) -> String {
    match item {
        RecordValue::Object(_) => display_name(item).unwrap_or_else(|| item.to_json_string()),
        RecordValue::Array(_) | RecordValue::Null => item.to_json_string(),
        _ => plain_string(item),
    }
}

fn display_name(object: &RecordValue) -> Option<String> {
    NAME_ATTRIBUTES
        .iter()
        .filter_map(|attribute| object.get(attribute))
        .find(|value| value.is_truthy())
        .map(plain_string)
}

/// Plain string conversion as a loosely typed host performs it.
fn plain_string(value: &RecordValue) -> String {
    match value {
        RecordValue::Null => "null".to_string(),
        RecordValue::Bool(b) => b.to_string(),
        RecordValue::Number(n) => format_number(*n),
        RecordValue::String(s) => s.clone(),
        RecordValue::Array(items) => items
            .iter()
            .map(|item| match item {
                RecordValue::Null => String::new(),
                other => plain_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        RecordValue::Object(_) => "[object Object]".to_string(),
    }
}

/// Converts a camelCase field name into space-separated Title Case.
///
/// A space goes before every ASCII uppercase letter, the first character is
/// capitalised and surrounding whitespace trimmed: `fieldPermissions` →
/// `Field Permissions`, `FullName` → `Full Name`.
pub fn humanize_field_name(name: &str) -> String {
    let mut spaced = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            spaced.push(' ');
        }
        spaced.push(c);
    }

    let mut chars = spaced.chars();
    let capitalized: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    capitalized.trim().to_string()
}

/// Locale-style string ordering.
///
/// Case-insensitive first; ties put lowercase before uppercase, then fall
/// back to code point order. This is a total order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));

    folded.then_with(|| {
        a.chars()
            .map(|c| (c.is_uppercase(), c))
            .cmp(b.chars().map(|c| (c.is_uppercase(), c)))
    })
}
