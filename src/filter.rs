//! Field-path filtering for record differences.
//!
//! Glob-style patterns select which field differences survive a comparison,
//! so noisy fields (timestamps, generated ids) can be ignored.
//!
//! # Pattern Syntax
//!
//! - `foo` - matches literal segment "foo"
//! - `*` - matches any single path segment
//! - `**` - matches any number of path segments (including zero)
//! - `foo.bar` - matches nested path "foo.bar"
//! - `**.lastModifiedDate` - matches "lastModifiedDate" at any depth
//!
//! Patterns are split on `.`, so a field whose own name contains a dot
//! (`"en.US"`) can only be reached with `*` or `**`.
//!
//! # Examples
//!
//! ```
//! use recdiff::filter::PathPattern;
//!
//! let pattern = PathPattern::parse("**.lastModifiedDate");
//! assert!(pattern.matches(&["lastModifiedDate".to_string()]));
//! assert!(pattern.matches(&["fields".to_string(), "lastModifiedDate".to_string()]));
//! ```

use crate::diff::FieldDifference;

/// A single segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatternSegment {
    /// Matches an exact string
    Literal(String),
    /// Matches any single path segment (*)
    SingleWildcard,
    /// Matches any number of path segments (**)
    DoubleWildcard,
}

/// A compiled path pattern for matching against field paths.
#[derive(Debug, Clone)]
pub struct PathPattern {
    pub segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Self {
        let segments = pattern
            .split('.')
            .map(|s| match s {
                "**" => PatternSegment::DoubleWildcard,
                "*" => PatternSegment::SingleWildcard,
                _ => PatternSegment::Literal(s.to_string()),
            })
            .collect();
        Self { segments }
    }

    pub fn matches(&self, path: &[String]) -> bool {
        matches_segments(&self.segments, path)
    }
}

fn matches_segments(pattern: &[PatternSegment], path: &[String]) -> bool {
    match (pattern.first(), path.first()) {
        (None, None) => true,
        (None, Some(_)) => false,
        (Some(_), None) => pattern
            .iter()
            .all(|s| matches!(s, PatternSegment::DoubleWildcard)),
        (Some(seg), Some(path_seg)) => match seg {
            PatternSegment::Literal(lit) => {
                lit == path_seg && matches_segments(&pattern[1..], &path[1..])
            }
            PatternSegment::SingleWildcard => matches_segments(&pattern[1..], &path[1..]),
            PatternSegment::DoubleWildcard => {
                matches_segments(&pattern[1..], path) || matches_segments(pattern, &path[1..])
            }
        },
    }
}

/// Which field paths to keep.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Patterns for paths to drop
    pub ignore_patterns: Vec<PathPattern>,
    /// Patterns for paths to keep (if non-empty, only these are kept)
    pub only_patterns: Vec<PathPattern>,
}

impl FilterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn only(mut self, pattern: &str) -> Self {
        self.only_patterns.push(PathPattern::parse(pattern));
        self
    }

    pub fn has_filters(&self) -> bool {
        !self.ignore_patterns.is_empty() || !self.only_patterns.is_empty()
    }

    pub fn should_include(&self, path: &[String]) -> bool {
        if self.ignore_patterns.iter().any(|p| p.matches(path)) {
            return false;
        }

        self.only_patterns.is_empty() || self.only_patterns.iter().any(|p| p.matches(path))
    }
}

/// Drops the field differences the filter excludes.
pub fn filter_fields(fields: Vec<FieldDifference>, config: &FilterConfig) -> Vec<FieldDifference> {
    if !config.has_filters() {
        return fields;
    }

    fields
        .into_iter()
        .filter(|field| config.should_include(&field.path))
        .collect()
}
