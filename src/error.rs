use std::path::PathBuf;

/// Failures that abort a catalog load.
///
/// Individual malformed fields never surface here; they degrade to empty
/// values inside the loader. Only an unreadable source does.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("failed to open catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed catalog CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Configuration errors.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
