//! Settings file support.
//!
//! Settings are read from an optional TOML file and merged with command-line
//! flags by the binary. Every field is optional.
//!
//! ```toml
//! only_changes = true
//! status = "modified"
//! format = "plain"
//! show_fields = true
//! ignore = ["**.lastModifiedDate"]
//! ```

use crate::diff::{DiffConfig, DEFAULT_MAX_DEPTH};
use crate::error::RecdiffError;
use crate::filter::FilterConfig;
use crate::output::{OutputFormat, OutputOptions};
use crate::present::{StatusFilter, ViewOptions};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Output format as written in a settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatSetting {
    Terminal,
    Json,
    Plain,
}

impl From<FormatSetting> for OutputFormat {
    fn from(setting: FormatSetting) -> Self {
        match setting {
            FormatSetting::Terminal => OutputFormat::Terminal,
            FormatSetting::Json => OutputFormat::Json,
            FormatSetting::Plain => OutputFormat::Plain,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub only_changes: bool,
    pub status: Option<StatusFilter>,
    pub format: Option<FormatSetting>,
    pub show_fields: bool,
    pub max_value_length: Option<usize>,
    pub max_depth: Option<usize>,
    /// Treat inputs as bundles keyed by record type
    pub bundle: bool,
    /// Record types to compare (bundles only); empty means all
    pub types: Vec<String>,
    pub ignore: Vec<String>,
    pub only: Vec<String>,
}

impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `RecdiffError::Config` if the file cannot be read, is not valid
    /// TOML, has unknown keys, or sets `max_depth` to zero.
    pub fn load(path: &Path) -> Result<Self, RecdiffError> {
        let content = fs::read_to_string(path).map_err(|e| {
            RecdiffError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| RecdiffError::config(format!("{}: {}", path.display(), e)))
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `RecdiffError::Config` on invalid TOML, unknown keys or a zero
    /// `max_depth`.
    pub fn from_toml(content: &str) -> Result<Self, RecdiffError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| RecdiffError::config(e.message().to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// # Errors
    ///
    /// Returns `RecdiffError::Config` if `max_depth` is zero.
    pub fn validate(&self) -> Result<(), RecdiffError> {
        if self.max_depth == Some(0) {
            return Err(RecdiffError::config("max_depth must be at least 1"));
        }
        Ok(())
    }

    pub fn diff_config(&self) -> DiffConfig {
        let filter = self
            .ignore
            .iter()
            .fold(FilterConfig::new(), |filter, pattern| filter.ignore(pattern));
        let filter = self
            .only
            .iter()
            .fold(filter, |filter, pattern| filter.only(pattern));

        DiffConfig {
            max_depth: self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH),
            filter,
        }
    }

    pub fn view_options(&self) -> ViewOptions {
        ViewOptions {
            only_changes: self.only_changes,
            status_filter: self.status.unwrap_or_default(),
        }
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
            .map(OutputFormat::from)
            .unwrap_or(OutputFormat::Terminal)
    }

    pub fn output_options(&self) -> OutputOptions {
        let defaults = OutputOptions::default();
        OutputOptions {
            show_fields: self.show_fields,
            max_value_length: self.max_value_length.unwrap_or(defaults.max_value_length),
        }
    }
}
