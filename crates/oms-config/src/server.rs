//! HTTP server and public URL configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

fn default_bind() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_app_url() -> String {
    "http://oms-two-mu.vercel.app".to_string()
}

fn default_barcode_service_url() -> String {
    "http://bwipjs-api.metafloor.com".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Public base URL; embedded in product barcodes.
    #[serde(default = "default_app_url")]
    pub app_url: String,

    /// Code128 image renderer base URL.
    #[serde(default = "default_barcode_service_url")]
    pub barcode_service_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            app_url: default_app_url(),
            barcode_service_url: default_barcode_service_url(),
        }
    }
}

impl ServerConfig {
    /// Parse `bind` as a socket address.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `bind` is not `host:port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind.parse().map_err(|e| ConfigError::InvalidValue {
            field: "server.bind".into(),
            reason: format!("{e}"),
        })
    }
}
