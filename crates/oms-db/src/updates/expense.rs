//! Expense edit builder.
//!
//! `cost` is never set directly: the repository recomputes it whenever the
//! amount or a GST component changes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub challan_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_ledger_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_for: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_expense_description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_before_gst: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sgst: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cgst: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub igst: Option<Option<String>>,
}

pub struct ExpenseUpdateBuilder(ExpenseUpdate);

impl ExpenseUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ExpenseUpdate::default())
    }

    #[must_use]
    pub fn expense_date(mut self, val: NaiveDate) -> Self {
        self.0.expense_date = Some(val);
        self
    }

    #[must_use]
    pub fn challan_no(mut self, val: Option<String>) -> Self {
        self.0.challan_no = Some(val);
        self
    }

    #[must_use]
    pub fn ledger_id(mut self, val: Option<String>) -> Self {
        self.0.ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn manual_ledger_id(mut self, val: Option<String>) -> Self {
        self.0.manual_ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn expense_for(mut self, val: Vec<String>) -> Self {
        self.0.expense_for = Some(val);
        self
    }

    #[must_use]
    pub fn other_expense_description(mut self, val: Option<String>) -> Self {
        self.0.other_expense_description = Some(val);
        self
    }

    #[must_use]
    pub fn amount_before_gst(mut self, val: f64) -> Self {
        self.0.amount_before_gst = Some(val);
        self
    }

    #[must_use]
    pub fn sgst(mut self, val: Option<String>) -> Self {
        self.0.sgst = Some(val);
        self
    }

    #[must_use]
    pub fn cgst(mut self, val: Option<String>) -> Self {
        self.0.cgst = Some(val);
        self
    }

    #[must_use]
    pub fn igst(mut self, val: Option<String>) -> Self {
        self.0.igst = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> ExpenseUpdate {
        self.0
    }
}

impl Default for ExpenseUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
