use std::path::PathBuf;
use thiserror::Error;

/// Core error type for tsmap operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// `paths` is non-empty but no `baseUrl` was configured.
    #[error("baseUrl required when paths is set")]
    BaseUrlRequired,

    #[error("path pattern '{pattern}' contains two wildcards")]
    TwoWildcards { pattern: String },

    #[error("invalid moduleTypes pattern '{pattern}': {source}")]
    InvalidOverridePattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Failed to read package.json at {path}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse package.json at {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read config at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Config {path} extends itself through a cycle")]
    ConfigExtendsCycle { path: PathBuf },
}

impl Error {
    /// Whether this error comes from invalid mapping or override configuration.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::BaseUrlRequired | Self::TwoWildcards { .. } | Self::InvalidOverridePattern { .. }
        )
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
