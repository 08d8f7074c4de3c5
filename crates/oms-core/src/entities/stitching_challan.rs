use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::details::SizeQuantity;
use crate::enums::InventoryClassification;

/// Finished-goods output of the stitching unit (stored in `isteaching_challans`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct StitchingChallan {
    pub id: i64,
    pub challan_no: String,
    pub date: NaiveDate,
    pub batch_number: Vec<String>,
    pub quality: String,
    pub quantity: i64,
    pub ledger_id: Option<String>,
    pub selected_product_id: Option<i64>,
    pub product_name: Option<String>,
    pub product_sku: Option<String>,
    pub product_description: Option<String>,
    pub product_color: Option<String>,
    pub product_image: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub made_in: Option<String>,
    pub product_size: Vec<SizeQuantity>,
    pub cloth_type: Vec<String>,
    pub top_qty: Option<i64>,
    pub bottom_qty: Option<i64>,
    pub transport_name: Option<String>,
    pub lr_number: Option<String>,
    pub transport_charge: Option<f64>,
    pub status: Option<String>,
    pub inventory_classification: Option<InventoryClassification>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StitchingChallan {
    /// Total pieces across all sizes.
    #[must_use]
    pub fn size_total(&self) -> i64 {
        self.product_size.iter().map(|s| s.quantity).sum()
    }
}
