//! General application configuration.

use serde::{Deserialize, Serialize};

const fn default_ledger_page_size() -> u32 {
    25
}

const fn default_product_page_size() -> u32 {
    10
}

const fn default_recent_limit() -> u32 {
    5
}

fn default_brand() -> String {
    "Bhaktinandan".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Rows per page on the ledger list.
    #[serde(default = "default_ledger_page_size")]
    pub ledger_page_size: u32,

    /// Rows on the first page of the product catalog.
    #[serde(default = "default_product_page_size")]
    pub product_page_size: u32,

    /// Recent purchase orders and weaver challans shown on the dashboard.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: u32,

    /// Brand printed on labels when neither product nor challan names one.
    #[serde(default = "default_brand")]
    pub default_brand: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            ledger_page_size: default_ledger_page_size(),
            product_page_size: default_product_page_size(),
            recent_limit: default_recent_limit(),
            default_brand: default_brand(),
        }
    }
}
