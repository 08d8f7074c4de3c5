//! Weaver challan edit builder.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use oms_core::details::QualityDetail;

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaverChallanUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challan_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challan_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ms_party_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_ledger_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_details: Option<Vec<QualityDetail>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taka_details: Option<Option<serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub taka: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_grey_mtr: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fold_cm: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_inch: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_amount: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_invoice_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_no: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_charge: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_at: Option<Option<String>>,
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

pub struct WeaverChallanUpdateBuilder(WeaverChallanUpdate);

impl WeaverChallanUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(WeaverChallanUpdate::default())
    }

    #[must_use]
    pub fn challan_no(mut self, val: impl Into<String>) -> Self {
        self.0.challan_no = Some(val.into());
        self
    }

    #[must_use]
    pub fn batch_number(mut self, val: impl Into<String>) -> Self {
        self.0.batch_number = Some(val.into());
        self
    }

    #[must_use]
    pub fn challan_date(mut self, val: NaiveDate) -> Self {
        self.0.challan_date = Some(val);
        self
    }

    #[must_use]
    pub fn ms_party_name(mut self, val: impl Into<String>) -> Self {
        self.0.ms_party_name = Some(val.into());
        self
    }

    #[must_use]
    pub fn ledger_id(mut self, val: Option<String>) -> Self {
        self.0.ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn vendor_ledger_id(mut self, val: Option<String>) -> Self {
        self.0.vendor_ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn quality_details(mut self, val: Vec<QualityDetail>) -> Self {
        self.0.quality_details = Some(val);
        self
    }

    #[must_use]
    pub fn taka_details(mut self, val: Option<serde_json::Value>) -> Self {
        self.0.taka_details = Some(val);
        self
    }

    #[must_use]
    pub fn taka(mut self, val: i64) -> Self {
        self.0.taka = Some(val);
        self
    }

    #[must_use]
    pub fn total_grey_mtr(mut self, val: f64) -> Self {
        self.0.total_grey_mtr = Some(val);
        self
    }

    #[must_use]
    pub fn fold_cm(mut self, val: Option<f64>) -> Self {
        self.0.fold_cm = Some(val);
        self
    }

    #[must_use]
    pub fn width_inch(mut self, val: Option<f64>) -> Self {
        self.0.width_inch = Some(val);
        self
    }

    #[must_use]
    pub fn vendor_amount(mut self, val: Option<f64>) -> Self {
        self.0.vendor_amount = Some(val);
        self
    }

    #[must_use]
    pub fn vendor_invoice_number(mut self, val: Option<String>) -> Self {
        self.0.vendor_invoice_number = Some(val);
        self
    }

    #[must_use]
    pub fn bill_no(mut self, val: Option<String>) -> Self {
        self.0.bill_no = Some(val);
        self
    }

    #[must_use]
    pub fn lr_number(mut self, val: Option<String>) -> Self {
        self.0.lr_number = Some(val);
        self
    }

    #[must_use]
    pub fn transport_name(mut self, val: Option<String>) -> Self {
        self.0.transport_name = Some(val);
        self
    }

    #[must_use]
    pub fn transport_charge(mut self, val: Option<f64>) -> Self {
        self.0.transport_charge = Some(val);
        self
    }

    #[must_use]
    pub fn delivery_at(mut self, val: Option<String>) -> Self {
        self.0.delivery_at = Some(val);
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
    pub fn build(self) -> WeaverChallanUpdate {
        self.0
    }
}

impl Default for WeaverChallanUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
