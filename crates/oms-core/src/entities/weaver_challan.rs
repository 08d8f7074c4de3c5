use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::details::QualityDetail;

/// Raw-material receipt from a weaver.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct WeaverChallan {
    pub id: i64,
    pub challan_no: String,
    pub batch_number: String,
    pub challan_date: NaiveDate,
    pub ms_party_name: String,
    pub ledger_id: Option<String>,
    pub vendor_ledger_id: Option<String>,
    pub quality_details: Vec<QualityDetail>,
    pub taka_details: Option<serde_json::Value>,
    pub taka: i64,
    pub total_grey_mtr: f64,
    pub fold_cm: Option<f64>,
    pub width_inch: Option<f64>,
    pub vendor_amount: Option<f64>,
    pub vendor_invoice_number: Option<String>,
    pub bill_no: Option<String>,
    pub lr_number: Option<String>,
    pub transport_name: Option<String>,
    pub transport_charge: Option<f64>,
    pub delivery_at: Option<String>,
    pub sgst: Option<String>,
    pub cgst: Option<String>,
    pub igst: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl WeaverChallan {
    /// Rate of the `quality_details` entry named `quality`, if any.
    #[must_use]
    pub fn rate_for(&self, quality: &str) -> Option<f64> {
        self.quality_details
            .iter()
            .find(|q| q.quality_name.as_deref() == Some(quality))
            .and_then(|q| q.rate)
    }
}
