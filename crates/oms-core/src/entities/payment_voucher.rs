use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Money paid out to a ledger.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaymentVoucher {
    pub id: i64,
    pub date: NaiveDate,
    pub ledger_id: Option<String>,
    pub payment_for: String,
    pub payment_type: String,
    pub amount: f64,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
