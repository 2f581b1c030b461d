//! recdiff - structural diff for keyed configuration records.
//!
//! Two record collections (a "source" and a "target", e.g. the metadata of two
//! environments) are aligned by record key, each shared record is diffed
//! recursively, and the result is presented as sorted, filtered display rows.
//!
//! # Example
//!
//! ```no_run
//! use recdiff::{compare_collections, format_sections, read_collection, DiffConfig,
//!     OutputFormat, OutputOptions, Section, ViewOptions};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let source = read_collection(Path::new("source/profiles.json"))?;
//! let target = read_collection(Path::new("target/profiles.json"))?;
//!
//! let comparison = compare_collections(&source, &target, &DiffConfig::default());
//!
//! let section = Section::new(None, &comparison, &ViewOptions::default());
//! let output = format_sections(&[section], &OutputFormat::Terminal, &OutputOptions::default())?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod compare;
pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod logging;
pub mod output;
pub mod parser;
pub mod present;
pub mod reconcile;
pub mod tree;

// Re-export commonly used types for convenience
pub use compare::{check_types, compare_bundles, compare_collections, Comparison};
pub use config::Settings;
pub use diff::{
    diff_fields, diff_record, ChangeType, DiffConfig, DiffStats, FieldDifference,
    RecordDifference,
};
pub use error::{OutputError, ParseError, RecdiffError, StructuralError};
pub use output::{format_sections, OutputFormat, OutputOptions, Section};
pub use parser::{
    parse_content, parse_file, parse_json, parse_stdin, parse_toml, parse_yaml, read_bundle,
    read_collection, FormatHint,
};
pub use present::{present, DisplayRow, FieldRow, StatusFilter, ViewOptions};
pub use reconcile::{reconcile, Presence};
pub use tree::{RecordBundle, RecordCollection, RecordValue, Shape};
