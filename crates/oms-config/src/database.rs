//! libSQL store configuration.

use serde::{Deserialize, Serialize};

fn default_local_path() -> String {
    "oms.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://oms-prod.turso.io`). Empty means
    /// a local file at `local_path`.
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Local database file used when `url` is empty.
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            local_path: default_local_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the store is a hosted database rather than a local file.
    #[must_use]
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }
}
