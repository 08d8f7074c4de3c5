use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::details::PurchaseOrderItem;
use crate::enums::PurchaseOrderStatus;

/// An order placed with a supplier.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PurchaseOrder {
    pub id: i64,
    pub po_number: String,
    pub po_date: NaiveDate,
    pub supplier_name: String,
    pub ledger_id: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub terms_conditions: Option<String>,
    pub items: Vec<PurchaseOrderItem>,
    pub total_amount: f64,
    pub status: PurchaseOrderStatus,
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl PurchaseOrder {
    /// Order total: the sum of each item's line total.
    #[must_use]
    pub fn total_of(items: &[PurchaseOrderItem]) -> f64 {
        items.iter().map(PurchaseOrderItem::line_total).sum()
    }
}
