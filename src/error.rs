//! Custom error types for recdiff.

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to read {path}: {source}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid YAML in {path}: {source}")]
    YamlError {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    TomlError {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Could not detect file format for {path}")]
    UnknownFormat { path: String },

    #[error("Expected a record collection in {path} at '{location}', found {found}")]
    NotACollection {
        path: String,
        location: String,
        found: String,
    },
}

/// A record whose value cannot be compared.
///
/// Scoped to a single record key; the rest of the batch is still compared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructuralError {
    #[error("Record {key}: non-finite number at {path}")]
    NonFiniteNumber { key: String, path: String },

    #[error("Record {key}: nesting deeper than {limit} levels at {path}")]
    DepthExceeded {
        key: String,
        path: String,
        limit: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize to JSON: {source}")]
    JsonSerializationError {
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum RecdiffError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Output(#[from] OutputError),

    #[error("Invalid configuration: {message}")]
    Config { message: String },
}

impl ParseError {
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn json_error(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::JsonError {
            path: path.into(),
            source,
        }
    }

    pub fn yaml_error(path: impl Into<String>, source: serde_yaml::Error) -> Self {
        Self::YamlError {
            path: path.into(),
            source,
        }
    }

    pub fn toml_error(path: impl Into<String>, source: toml::de::Error) -> Self {
        Self::TomlError {
            path: path.into(),
            source,
        }
    }

    pub fn unknown_format(path: impl Into<String>) -> Self {
        Self::UnknownFormat { path: path.into() }
    }

    pub fn not_a_collection(
        path: impl Into<String>,
        location: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self::NotACollection {
            path: path.into(),
            location: location.into(),
            found: found.into(),
        }
    }
}

impl StructuralError {
    /// The record key the failure belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::NonFiniteNumber { key, .. } | Self::DepthExceeded { key, .. } => key,
        }
    }

    /// Dotted path of the offending value inside the record.
    pub fn path(&self) -> &str {
        match self {
            Self::NonFiniteNumber { path, .. } | Self::DepthExceeded { path, .. } => path,
        }
    }
}

impl RecdiffError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
