//! Purchase order edit builder.
//!
//! Setting `items` also recomputes `total_amount`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use oms_core::details::PurchaseOrderItem;
use oms_core::enums::PurchaseOrderStatus;

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurchaseOrderUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub po_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_conditions: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<PurchaseOrderItem>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PurchaseOrderStatus>,
}

pub struct PurchaseOrderUpdateBuilder(PurchaseOrderUpdate);

impl PurchaseOrderUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PurchaseOrderUpdate::default())
    }

    #[must_use]
    pub fn po_number(mut self, val: impl Into<String>) -> Self {
        self.0.po_number = Some(val.into());
        self
    }

    #[must_use]
    pub fn po_date(mut self, val: NaiveDate) -> Self {
        self.0.po_date = Some(val);
        self
    }

    #[must_use]
    pub fn supplier_name(mut self, val: impl Into<String>) -> Self {
        self.0.supplier_name = Some(val.into());
        self
    }

    #[must_use]
    pub fn ledger_id(mut self, val: Option<String>) -> Self {
        self.0.ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn delivery_date(mut self, val: Option<NaiveDate>) -> Self {
        self.0.delivery_date = Some(val);
        self
    }

    #[must_use]
    pub fn description(mut self, val: Option<String>) -> Self {
        self.0.description = Some(val);
        self
    }

    #[must_use]
    pub fn terms_conditions(mut self, val: Option<String>) -> Self {
        self.0.terms_conditions = Some(val);
        self
    }

    #[must_use]
    pub fn items(mut self, val: Vec<PurchaseOrderItem>) -> Self {
        self.0.items = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: PurchaseOrderStatus) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> PurchaseOrderUpdate {
        self.0
    }
}

impl Default for PurchaseOrderUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
