//! Payment voucher edit builder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentVoucherUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

pub struct PaymentVoucherUpdateBuilder(PaymentVoucherUpdate);

impl PaymentVoucherUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PaymentVoucherUpdate::default())
    }

    #[must_use]
    pub fn date(mut self, val: NaiveDate) -> Self {
        self.0.date = Some(val);
        self
    }

    #[must_use]
    pub fn ledger_id(mut self, val: Option<String>) -> Self {
        self.0.ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn payment_for(mut self, val: impl Into<String>) -> Self {
        self.0.payment_for = Some(val.into());
        self
    }

    #[must_use]
    pub fn payment_type(mut self, val: impl Into<String>) -> Self {
        self.0.payment_type = Some(val.into());
        self
    }

    #[must_use]
    pub fn amount(mut self, val: f64) -> Self {
        self.0.amount = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> PaymentVoucherUpdate {
        self.0
    }
}

impl Default for PaymentVoucherUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
