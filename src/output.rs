//! Output formatting for comparison results.
//!
//! Renders presented rows as coloured terminal text, plain text or JSON.
//! Each record type compared becomes one [`Section`].
//!
//! # Examples
//!
//! ```
//! use recdiff::{compare_collections, format_sections, DiffConfig, OutputFormat,
//!     OutputOptions, RecordCollection, RecordValue, Section, ViewOptions};
//!
//! let source: RecordCollection = [("A", RecordValue::object([("x", RecordValue::Number(1.0))]))]
//!     .into_iter()
//!     .collect();
//! let target: RecordCollection = [("A", RecordValue::object([("x", RecordValue::Number(2.0))]))]
//!     .into_iter()
//!     .collect();
//!
//! let comparison = compare_collections(&source, &target, &DiffConfig::default());
//! let section = Section::new(None, &comparison, &ViewOptions::default());
//! let options = OutputOptions { show_fields: true, ..Default::default() };
//!
//! let output = format_sections(&[section], &OutputFormat::Plain, &options).unwrap();
//! assert!(output.contains("X: 1 → 2"));
//! ```

use crate::compare::Comparison;
use crate::diff::{ChangeType, DiffStats};
use crate::error::{OutputError, StructuralError};
use crate::present::{present, DisplayRow, FieldRow, ViewOptions};
use colored::*;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored terminal output with ANSI escape codes
    Terminal,
    /// JSON representation of the rows
    Json,
    /// Plain text, no colors (suitable for piping)
    Plain,
}

/// Options for controlling output formatting.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    /// Print field-level rows under each modified record
    pub show_fields: bool,
    /// Maximum length for displayed values (truncate if longer)
    pub max_value_length: usize,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            show_fields: false,
            max_value_length: 80,
        }
    }
}

/// The displayable result for one record type.
#[derive(Debug, Clone)]
pub struct Section {
    /// `None` when a single collection pair was compared
    pub record_type: Option<String>,
    pub rows: Vec<DisplayRow>,
    pub failures: Vec<StructuralError>,
    /// Counts over the shown rows plus failures
    pub stats: DiffStats,
}

impl Section {
    pub fn new(record_type: Option<String>, comparison: &Comparison, view: &ViewOptions) -> Self {
        let rows = present(&comparison.differences, view);

        let mut stats = DiffStats::new();
        for row in &rows {
            stats.record(row.kind);
        }
        stats.failed = comparison.failures.len();

        Self {
            record_type,
            rows,
            failures: comparison.failures.clone(),
            stats,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.failures.is_empty()
    }
}

/// Formats sections according to the specified format and options.
///
/// # Errors
///
/// Returns an [`OutputError`] if JSON serialization fails.
pub fn format_sections(
    sections: &[Section],
    format: &OutputFormat,
    options: &OutputOptions,
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Terminal => Ok(format_text(sections, options, true)),
        OutputFormat::Json => format_json(sections),
        OutputFormat::Plain => Ok(format_text(sections, options, false)),
    }
}

/// Formats sections as text, with ANSI colours when `color` is set.
///
/// Color scheme: added green, removed red, modified yellow, failures magenta.
fn format_text(sections: &[Section], options: &OutputOptions, color: bool) -> String {
    if sections.iter().all(Section::is_empty) {
        let message = "No changes detected.";
        return if color {
            message.dimmed().to_string()
        } else {
            message.to_string()
        };
    }

    let mut output = String::new();
    let mut totals = DiffStats::new();

    for section in sections {
        if let Some(record_type) = &section.record_type {
            let header = format!("== {} ==", record_type);
            output.push_str(&if color { header.bold().to_string() } else { header });
            output.push('\n');
        }

        if section.is_empty() {
            output.push_str("No changes detected.\n");
        }

        for row in &section.rows {
            output.push_str(&format_row(row, options, color));
            output.push('\n');

            if options.show_fields {
                for field in &row.fields {
                    output.push_str("    ");
                    output.push_str(&format_field(field, options, color));
                    output.push('\n');
                }
            }
        }

        for failure in &section.failures {
            let line = format!("! {}: {}", failure.key(), failure);
            output.push_str(&if color { line.magenta().to_string() } else { line });
            output.push('\n');
        }

        totals.added += section.stats.added;
        totals.removed += section.stats.removed;
        totals.modified += section.stats.modified;
        totals.failed += section.stats.failed;
    }

    output.push('\n');
    output.push_str(&format_summary(&totals));

    output
}

fn format_row(row: &DisplayRow, options: &OutputOptions, color: bool) -> String {
    format_line(row.kind, &row.key, &row.source, &row.target, options, color)
}

fn format_field(field: &FieldRow, options: &OutputOptions, color: bool) -> String {
    format_line(field.kind, &field.label, &field.source, &field.target, options, color)
}

fn format_line(
    kind: ChangeType,
    label: &str,
    source: &str,
    target: &str,
    options: &OutputOptions,
    color: bool,
) -> String {
    let source = truncate(source, options.max_value_length);
    let target = truncate(target, options.max_value_length);

    let line = match kind {
        ChangeType::Added => format!("+ {}: {}", label, target),
        ChangeType::Removed => format!("- {}: {}", label, source),
        ChangeType::Modified => format!("• {}: {} → {}", label, source, target),
    };

    if !color {
        return line;
    }

    match kind {
        ChangeType::Added => line.green().to_string(),
        ChangeType::Removed => line.red().to_string(),
        ChangeType::Modified => line.yellow().to_string(),
    }
}

/// Shortens `value` to at most `max_len` characters, ending in `...`.
fn truncate(value: &str, max_len: usize) -> String {
    if value.chars().count() <= max_len {
        return value.to_string();
    }

    let kept: String = value.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Formats summary statistics.
fn format_summary(stats: &DiffStats) -> String {
    if stats.is_empty() {
        return "Summary: No changes".to_string();
    }

    let mut parts = Vec::new();
    if stats.added > 0 {
        parts.push(format!("{} added", stats.added));
    }
    if stats.removed > 0 {
        parts.push(format!("{} removed", stats.removed));
    }
    if stats.modified > 0 {
        parts.push(format!("{} modified", stats.modified));
    }
    if stats.failed > 0 {
        parts.push(format!("{} failed", stats.failed));
    }

    format!("Summary: {}", parts.join(", "))
}

/// Formats sections as JSON.
fn format_json(sections: &[Section]) -> Result<String, OutputError> {
    use serde_json::json;

    let comparisons: Vec<serde_json::Value> = sections
        .iter()
        .map(|section| {
            let failures: Vec<serde_json::Value> = section
                .failures
                .iter()
                .map(|failure| {
                    json!({
                        "key": failure.key(),
                        "path": failure.path(),
                        "message": failure.to_string(),
                    })
                })
                .collect();

            json!({
                "type": section.record_type,
                "rows": section.rows,
                "failures": failures,
                "stats": section.stats,
            })
        })
        .collect();

    let output = json!({ "comparisons": comparisons });

    serde_json::to_string_pretty(&output)
        .map_err(|e| OutputError::JsonSerializationError { source: e })
}
