//! Value tree for configuration records.
//!
//! Records fetched from a repository arrive as JSON-like documents. They are
//! normalised into [`RecordValue`], a closed tagged variant, so every recursion
//! step in the differ dispatches on an explicit [`Shape`].

use std::collections::BTreeMap;

/// A value inside a record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<RecordValue>),
    Object(BTreeMap<String, RecordValue>),
}

/// Coarse type classification used to decide whether recursion is possible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Primitive,
    Sequence,
    Mapping,
}

/// Reason a value cannot be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Defect {
    /// NaN or an infinity; not representable in JSON.
    NonFiniteNumber,
    /// Nesting exceeds the configured limit.
    TooDeep,
}

impl RecordValue {
    pub fn shape(&self) -> Shape {
        match self {
            RecordValue::Array(_) => Shape::Sequence,
            RecordValue::Object(_) => Shape::Mapping,
            _ => Shape::Primitive,
        }
    }

    pub fn type_name(&self) -> &str {
        match self {
            RecordValue::Null => "null",
            RecordValue::Bool(_) => "boolean",
            RecordValue::Number(_) => "number",
            RecordValue::String(_) => "string",
            RecordValue::Object(_) => "object",
            RecordValue::Array(_) => "array",
        }
    }

    /// Convenience constructor for object literals in tests and callers.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, RecordValue)>,
    {
        RecordValue::Object(entries.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    /// Looks up a field when this value is an object.
    pub fn get(&self, field: &str) -> Option<&RecordValue> {
        match self {
            RecordValue::Object(map) => map.get(field),
            _ => None,
        }
    }

    /// Truthiness as a loosely typed host would see it: `null`, `false`, `0`,
    /// NaN and `""` are falsy, everything else (including empty containers)
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            RecordValue::Null => false,
            RecordValue::Bool(b) => *b,
            RecordValue::Number(n) => *n != 0.0 && !n.is_nan(),
            RecordValue::String(s) => !s.is_empty(),
            RecordValue::Array(_) | RecordValue::Object(_) => true,
        }
    }

    /// Finds the first value that cannot be compared, with its path.
    ///
    /// Objects are walked in key order, so the reported path is stable.
    pub fn find_defect(&self, max_depth: usize) -> Option<(Defect, Vec<String>)> {
        let mut path = Vec::new();
        self.find_defect_at(&mut path, 0, max_depth)
            .map(|defect| (defect, path))
    }

    fn find_defect_at(
        &self,
        path: &mut Vec<String>,
        depth: usize,
        max_depth: usize,
    ) -> Option<Defect> {
        if depth > max_depth {
            return Some(Defect::TooDeep);
        }

        match self {
            RecordValue::Number(n) if !n.is_finite() => Some(Defect::NonFiniteNumber),
            RecordValue::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    path.push(format!("[{}]", i));
                    if let Some(defect) = item.find_defect_at(path, depth + 1, max_depth) {
                        return Some(defect);
                    }
                    path.pop();
                }
                None
            }
            RecordValue::Object(map) => {
                for (key, value) in map {
                    path.push(key.clone());
                    if let Some(defect) = value.find_defect_at(path, depth + 1, max_depth) {
                        return Some(defect);
                    }
                    path.pop();
                }
                None
            }
            _ => None,
        }
    }

    /// Converts to a `serde_json::Value`.
    ///
    /// Integral numbers inside the 64-bit integer range become JSON integers;
    /// non-finite numbers become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            RecordValue::Null => Value::Null,
            RecordValue::Bool(b) => Value::Bool(*b),
            RecordValue::Number(n) => number_to_json(*n),
            RecordValue::String(s) => Value::String(s.clone()),
            RecordValue::Array(items) => Value::Array(items.iter().map(|v| v.to_json()).collect()),
            RecordValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
        }
    }

    /// Renders compact JSON text with numbers printed as [`format_number`]
    /// prints them, matching what a JavaScript host's `JSON.stringify`
    /// produces for the same tree. Non-finite numbers become `null`.
    pub fn to_json_string(&self) -> String {
        let mut out = String::new();
        self.write_json(&mut out);
        out
    }

    fn write_json(&self, out: &mut String) {
        match self {
            RecordValue::Null => out.push_str("null"),
            RecordValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            RecordValue::Number(n) if n.is_finite() => out.push_str(&format_number(*n)),
            RecordValue::Number(_) => out.push_str("null"),
            RecordValue::String(s) => out.push_str(&json_quote(s)),
            RecordValue::Array(items) => {
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    item.write_json(out);
                }
                out.push(']');
            }
            RecordValue::Object(map) => {
                out.push('{');
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(&json_quote(key));
                    out.push(':');
                    value.write_json(out);
                }
                out.push('}');
            }
        }
    }
}

fn json_quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
        serde_json::Value::from(n as i64)
    } else if n.fract() == 0.0 && n >= 0.0 && n < u64::MAX as f64 {
        serde_json::Value::from(n as u64)
    } else {
        serde_json::Number::from_f64(n)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null)
    }
}

/// Renders a number the way a JavaScript host prints it.
///
/// Magnitudes in `[1e-6, 1e21)` print in plain decimal with no trailing
/// `.0`; anything outside that range uses exponent form (`1e+21`, `1.5e-7`).
/// `-0` prints as `0`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        "0".to_string()
    } else if n.abs() >= 1e21 || n.abs() < 1e-6 {
        exponent_form(n)
    } else {
        n.to_string()
    }
}

fn exponent_form(n: f64) -> String {
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

/// Joins path segments into a dotted path.
///
/// - `["user", "name"]` → `"user.name"`
/// - `["items", "[0]", "id"]` → `"items[0].id"`
/// - `["labels", "en.US"]` → `"labels[\"en.US\"]"`
/// - `[]` → `"(root)"`
///
/// Segments shaped `[N]` are sequence indexes. Field names that are empty or
/// contain `.`, `[` or `]` are quoted in brackets so they read apart from
/// nesting. A field literally named like an index (`"[0]"`) is still printed
/// as an index.
pub fn format_path(path: &[String]) -> String {
    if path.is_empty() {
        return "(root)".to_string();
    }

    let mut result = String::new();
    for component in path {
        if is_index_segment(component) {
            result.push_str(component);
        } else if needs_quoting(component) {
            result.push('[');
            result.push_str(&json_quote(component));
            result.push(']');
        } else {
            if !result.is_empty() {
                result.push('.');
            }
            result.push_str(component);
        }
    }
    result
}

fn is_index_segment(segment: &str) -> bool {
    segment
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

fn needs_quoting(segment: &str) -> bool {
    segment.is_empty() || segment.contains(['.', '[', ']'])
}

impl From<serde_json::Value> for RecordValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => RecordValue::Null,
            serde_json::Value::Bool(b) => RecordValue::Bool(b),
            serde_json::Value::Number(n) => RecordValue::Number(n.as_f64().unwrap_or(0.0)),
            serde_json::Value::String(s) => RecordValue::String(s),
            serde_json::Value::Array(arr) => {
                RecordValue::Array(arr.into_iter().map(RecordValue::from).collect())
            }
            serde_json::Value::Object(obj) => RecordValue::Object(
                obj.into_iter()
                    .map(|(k, v)| (k, RecordValue::from(v)))
                    .collect(),
            ),
        }
    }
}

/// A key-mapped set of configuration records.
///
/// Comparison is keyed, not positional; keys iterate in sorted order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordCollection {
    records: BTreeMap<String, RecordValue>,
}

impl RecordCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: RecordValue) -> Option<RecordValue> {
        self.records.insert(key.into(), value)
    }

    pub fn get(&self, key: &str) -> Option<&RecordValue> {
        self.records.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.records.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &RecordValue)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RecordValue)> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = (K, RecordValue)>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Record collections grouped by record type (e.g. `Profile`, `CustomObject`).
pub type RecordBundle = BTreeMap<String, RecordCollection>;
