use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Figment(#[from] figment::Error),

    /// `--config` named a file that is not there.
    #[error("Config file {} not found", .0.display())]
    MissingFile(PathBuf),

    /// The server cannot start without this section (e.g. `clerk`).
    #[error("[{section}] must be set before serving")]
    NotConfigured { section: String },

    #[error("{field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
