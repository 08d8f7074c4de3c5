//! # oms-config
//!
//! Layered configuration loading for the OMS using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`OMS_*` prefix, `__` as separator)
//! 2. Working-directory `oms.toml`
//! 3. User-level `~/.config/oms/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `OMS_DATABASE__URL` -> `database.url`,
//! `OMS_SERVER__BIND` -> `server.bind`, etc. The `__` (double underscore)
//! separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use oms_config::OmsConfig;
//!
//! let config = OmsConfig::load_with_dotenv().expect("config");
//!
//! if config.database.is_remote() {
//!     println!("store: {}", config.database.url);
//! }
//! ```

mod clerk;
mod database;
mod error;
mod general;
mod server;

pub use clerk::ClerkConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the working-directory config file.
pub const LOCAL_CONFIG_FILE: &str = "oms.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OmsConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub clerk: ClerkConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl OmsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be read or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// Variables already present in the process environment win over `.env`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Load configuration with an explicit TOML file in place of `oms.toml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if the file does not exist, or
    /// `ConfigError::Figment` if it cannot be parsed.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::MissingFile(path.to_path_buf()));
        }
        Self::base_figment()
            .merge(Toml::file(path))
            .merge(Env::prefixed("OMS_").split("__"))
            .extract()
            .map_err(ConfigError::from)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Self::base_figment();

        let local_path = PathBuf::from(LOCAL_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("OMS_").split("__"))
    }

    /// Defaults plus the user-global file.
    fn base_figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }
        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("oms").join("config.toml"))
    }

    /// Check the values the server cannot start without.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for a missing Clerk secret, or
    /// `ConfigError::InvalidValue` for a remote URL without a token or an
    /// unparseable bind address.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        if !self.clerk.is_configured() {
            return Err(ConfigError::NotConfigured {
                section: "clerk".into(),
            });
        }
        if self.database.is_remote() && self.database.auth_token.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.auth_token".into(),
                reason: "required when database.url is set".into(),
            });
        }
        self.server.bind_addr()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads() {
        let config = OmsConfig::default();
        assert!(!config.database.is_remote());
        assert!(!config.clerk.is_configured());
        assert_eq!(config.server.bind, "0.0.0.0:3000");
        assert_eq!(config.general.ledger_page_size, 25);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: OmsConfig = OmsConfig::figment().extract()?;
            assert_eq!(config.database.local_path, "oms.db");
            assert_eq!(config.general.default_brand, "Bhaktinandan");
            Ok(())
        });
    }

    #[test]
    fn serve_requires_clerk_secret() {
        let config = OmsConfig::default();
        assert!(matches!(
            config.validate_for_serve(),
            Err(ConfigError::NotConfigured { section }) if section == "clerk"
        ));
    }

    #[test]
    fn serve_requires_token_for_remote_store() {
        let mut config = OmsConfig::default();
        config.clerk.secret_key = "sk_test".into();
        config.database.url = "libsql://oms-prod.turso.io".into();
        assert!(matches!(
            config.validate_for_serve(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "database.auth_token"
        ));

        config.database.auth_token = "token".into();
        assert!(config.validate_for_serve().is_ok());
    }
}
