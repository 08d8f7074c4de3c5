use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A business partner account (vendor, weaver, customer).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Ledger {
    pub ledger_id: String,
    pub business_name: String,
    pub contact_person_name: Option<String>,
    pub mobile_number: Option<String>,
    pub email: Option<String>,
    pub gst_number: Option<String>,
    pub pan_number: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    pub business_logo: Option<String>,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}
