//! Reading record collections from JSON, YAML and TOML documents.
//!
//! A collection document is an object mapping record keys to record values.
//! A bundle document maps record types to collection documents. A `null`
//! document (or a `null` type entry) is an empty collection.
//!
//! # Examples
//!
//! ```
//! use recdiff::parser::{collection_from_value, parse_json};
//!
//! let value = parse_json(r#"{"Admin": {"userLicense": "Salesforce"}}"#).unwrap();
//! let collection = collection_from_value(value, "inline").unwrap();
//! assert!(collection.contains_key("Admin"));
//! ```

use crate::error::ParseError;
use crate::tree::{RecordBundle, RecordCollection, RecordValue};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Format of a document whose origin carries no usable extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatHint {
    Json,
    Yaml,
    Toml,
    /// Try JSON, then TOML, then YAML
    Auto,
}

impl FormatHint {
    /// Picks the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());

        match extension.as_deref() {
            Some("json") => FormatHint::Json,
            Some("yaml") | Some("yml") => FormatHint::Yaml,
            Some("toml") => FormatHint::Toml,
            _ => FormatHint::Auto,
        }
    }
}

/// Parses a file into a value tree.
///
/// The format is detected by extension (.json, .yaml, .yml, .toml); other
/// files are tried as JSON, then TOML, then YAML. YAML goes last because it
/// accepts almost any text as a plain scalar.
///
/// # Errors
///
/// - `ParseError::FileNotFound` if the file does not exist
/// - `ParseError::ReadError` if it cannot be read
/// - `ParseError::JsonError` / `YamlError` / `TomlError` for invalid content
/// - `ParseError::UnknownFormat` if no format accepts the content
pub fn parse_file(path: &Path) -> Result<RecordValue, ParseError> {
    let origin = path.to_string_lossy().to_string();

    if !path.exists() {
        return Err(ParseError::file_not_found(origin));
    }

    let content = fs::read_to_string(path).map_err(|e| ParseError::read_error(origin.clone(), e))?;

    tracing::debug!(path = %origin, bytes = content.len(), "read input file");
    parse_content(&content, FormatHint::from_path(path), &origin)
}

/// Parses standard input into a value tree.
///
/// # Errors
///
/// Same as [`parse_content`], plus `ParseError::ReadError` if stdin fails.
pub fn parse_stdin(hint: FormatHint) -> Result<RecordValue, ParseError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|e| ParseError::read_error("<stdin>", e))?;
    parse_content(&content, hint, "<stdin>")
}

/// Parses `content` in the hinted format. `origin` names the input in errors.
///
/// # Errors
///
/// Returns the format's parse error, or `ParseError::UnknownFormat` when
/// `FormatHint::Auto` finds no format that accepts the content.
pub fn parse_content(content: &str, hint: FormatHint, origin: &str) -> Result<RecordValue, ParseError> {
    match hint {
        FormatHint::Json => parse_json(content).map_err(|e| ParseError::json_error(origin, e)),
        FormatHint::Yaml => parse_yaml(content).map_err(|e| ParseError::yaml_error(origin, e)),
        FormatHint::Toml => parse_toml(content).map_err(|e| ParseError::toml_error(origin, e)),
        FormatHint::Auto => parse_json(content)
            .map_err(|_| ())
            .or_else(|_| parse_toml(content).map_err(|_| ()))
            .or_else(|_| parse_yaml(content).map_err(|_| ()))
            .map_err(|_| ParseError::unknown_format(origin)),
    }
}

/// Parses a JSON string.
pub fn parse_json(content: &str) -> Result<RecordValue, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    Ok(RecordValue::from(value))
}

/// Parses a YAML string.
///
/// Non-string mapping keys are converted to strings; tags are dropped.
pub fn parse_yaml(content: &str) -> Result<RecordValue, serde_yaml::Error> {
    let value: serde_yaml::Value = serde_yaml::from_str(content)?;
    Ok(yaml_to_value(value))
}

/// Parses a TOML document.
///
/// Datetimes become their RFC 3339 string form.
pub fn parse_toml(content: &str) -> Result<RecordValue, toml::de::Error> {
    let table: toml::Table = content.parse()?;
    Ok(toml_to_value(toml::Value::Table(table)))
}

fn yaml_to_value(value: serde_yaml::Value) -> RecordValue {
    match value {
        serde_yaml::Value::Null => RecordValue::Null,
        serde_yaml::Value::Bool(b) => RecordValue::Bool(b),
        serde_yaml::Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                RecordValue::Number(f)
            } else if let Some(i) = n.as_i64() {
                RecordValue::Number(i as f64)
            } else if let Some(u) = n.as_u64() {
                RecordValue::Number(u as f64)
            } else {
                RecordValue::Number(0.0)
            }
        }
        serde_yaml::Value::String(s) => RecordValue::String(s),
        serde_yaml::Value::Sequence(seq) => {
            RecordValue::Array(seq.into_iter().map(yaml_to_value).collect())
        }
        serde_yaml::Value::Mapping(map) => RecordValue::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let key = match k {
                        serde_yaml::Value::String(s) => s,
                        serde_yaml::Value::Number(n) => n.to_string(),
                        serde_yaml::Value::Bool(b) => b.to_string(),
                        serde_yaml::Value::Null => "null".to_string(),
                        other => format!("{:?}", other),
                    };
                    (key, yaml_to_value(v))
                })
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => yaml_to_value(tagged.value),
    }
}

fn toml_to_value(value: toml::Value) -> RecordValue {
    match value {
        toml::Value::String(s) => RecordValue::String(s),
        toml::Value::Integer(i) => RecordValue::Number(i as f64),
        toml::Value::Float(f) => RecordValue::Number(f),
        toml::Value::Boolean(b) => RecordValue::Bool(b),
        toml::Value::Datetime(dt) => RecordValue::String(dt.to_string()),
        toml::Value::Array(arr) => RecordValue::Array(arr.into_iter().map(toml_to_value).collect()),
        toml::Value::Table(table) => RecordValue::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_value(v)))
                .collect(),
        ),
    }
}

/// Interprets a document as a record collection.
///
/// # Errors
///
/// Returns `ParseError::NotACollection` unless the root is an object or null.
pub fn collection_from_value(value: RecordValue, origin: &str) -> Result<RecordCollection, ParseError> {
    collection_at(value, origin, "(root)")
}

/// Interprets a document as record collections keyed by record type.
///
/// # Errors
///
/// Returns `ParseError::NotACollection` if the root or any type entry is not
/// an object or null.
pub fn bundle_from_value(value: RecordValue, origin: &str) -> Result<RecordBundle, ParseError> {
    match value {
        RecordValue::Null => Ok(RecordBundle::new()),
        RecordValue::Object(types) => types
            .into_iter()
            .map(|(record_type, collection)| {
                let collection = collection_at(collection, origin, &record_type)?;
                Ok((record_type, collection))
            })
            .collect(),
        other => Err(ParseError::not_a_collection(origin, "(root)", other.type_name())),
    }
}

fn collection_at(value: RecordValue, origin: &str, location: &str) -> Result<RecordCollection, ParseError> {
    match value {
        RecordValue::Null => Ok(RecordCollection::new()),
        RecordValue::Object(records) => Ok(records.into_iter().collect()),
        other => Err(ParseError::not_a_collection(origin, location, other.type_name())),
    }
}

/// Reads a record collection from a file.
///
/// # Errors
///
/// Any error from [`parse_file`] or [`collection_from_value`].
pub fn read_collection(path: &Path) -> Result<RecordCollection, ParseError> {
    let value = parse_file(path)?;
    collection_from_value(value, &path.to_string_lossy())
}

/// Reads a bundle of record collections from a file.
///
/// # Errors
///
/// Any error from [`parse_file`] or [`bundle_from_value`].
pub fn read_bundle(path: &Path) -> Result<RecordBundle, ParseError> {
    let value = parse_file(path)?;
    bundle_from_value(value, &path.to_string_lossy())
}
