use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Metres found short against a weaver challan's declared quantity.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ShortingEntry {
    pub id: i64,
    pub entry_date: NaiveDate,
    pub quality_name: Option<String>,
    pub shorting_qty: f64,
    pub weaver_challan_id: Option<i64>,
    pub weaver_challan_qty: Option<f64>,
    pub ledger_id: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
