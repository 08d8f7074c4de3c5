//! Stitching challan edit builder.
//!
//! Classification is not part of the edit form; see `classify_stitching_challan`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use oms_core::details::SizeQuantity;

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StitchingChallanUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challan_no: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_product_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_sku: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_color: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_image: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub made_in: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_size: Option<Vec<SizeQuantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloth_type: Option<Vec<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_qty: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom_qty: Option<Option<i64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lr_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_charge: Option<Option<f64>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Option<String>>,
}

pub struct StitchingChallanUpdateBuilder(StitchingChallanUpdate);

impl StitchingChallanUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(StitchingChallanUpdate::default())
    }

    #[must_use]
    pub fn challan_no(mut self, val: impl Into<String>) -> Self {
        self.0.challan_no = Some(val.into());
        self
    }

    #[must_use]
    pub fn date(mut self, val: NaiveDate) -> Self {
        self.0.date = Some(val);
        self
    }

    #[must_use]
    pub fn batch_number(mut self, val: Vec<String>) -> Self {
        self.0.batch_number = Some(val);
        self
    }

    #[must_use]
    pub fn quality(mut self, val: impl Into<String>) -> Self {
        self.0.quality = Some(val.into());
        self
    }

    #[must_use]
    pub fn quantity(mut self, val: i64) -> Self {
        self.0.quantity = Some(val);
        self
    }

    #[must_use]
    pub fn ledger_id(mut self, val: Option<String>) -> Self {
        self.0.ledger_id = Some(val);
        self
    }

    #[must_use]
    pub fn selected_product_id(mut self, val: Option<i64>) -> Self {
        self.0.selected_product_id = Some(val);
        self
    }

    #[must_use]
    pub fn product_name(mut self, val: Option<String>) -> Self {
        self.0.product_name = Some(val);
        self
    }

    #[must_use]
    pub fn product_sku(mut self, val: Option<String>) -> Self {
        self.0.product_sku = Some(val);
        self
    }

    #[must_use]
    pub fn product_description(mut self, val: Option<String>) -> Self {
        self.0.product_description = Some(val);
        self
    }

    #[must_use]
    pub fn product_color(mut self, val: Option<String>) -> Self {
        self.0.product_color = Some(val);
        self
    }

    #[must_use]
    pub fn product_image(mut self, val: Option<String>) -> Self {
        self.0.product_image = Some(val);
        self
    }

    #[must_use]
    pub fn brand(mut self, val: Option<String>) -> Self {
        self.0.brand = Some(val);
        self
    }

    #[must_use]
    pub fn category(mut self, val: Option<String>) -> Self {
        self.0.category = Some(val);
        self
    }

    #[must_use]
    pub fn sub_category(mut self, val: Option<String>) -> Self {
        self.0.sub_category = Some(val);
        self
    }

    #[must_use]
    pub fn made_in(mut self, val: Option<String>) -> Self {
        self.0.made_in = Some(val);
        self
    }

    #[must_use]
    pub fn product_size(mut self, val: Vec<SizeQuantity>) -> Self {
        self.0.product_size = Some(val);
        self
    }

    #[must_use]
    pub fn cloth_type(mut self, val: Vec<String>) -> Self {
        self.0.cloth_type = Some(val);
        self
    }

    #[must_use]
    pub fn top_qty(mut self, val: Option<i64>) -> Self {
        self.0.top_qty = Some(val);
        self
    }

    #[must_use]
    pub fn bottom_qty(mut self, val: Option<i64>) -> Self {
        self.0.bottom_qty = Some(val);
        self
    }

    #[must_use]
    pub fn transport_name(mut self, val: Option<String>) -> Self {
        self.0.transport_name = Some(val);
        self
    }

    #[must_use]
    pub fn lr_number(mut self, val: Option<String>) -> Self {
        self.0.lr_number = Some(val);
        self
    }

    #[must_use]
    pub fn transport_charge(mut self, val: Option<f64>) -> Self {
        self.0.transport_charge = Some(val);
        self
    }

    #[must_use]
    pub fn status(mut self, val: Option<String>) -> Self {
        self.0.status = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> StitchingChallanUpdate {
        self.0
    }
}

impl Default for StitchingChallanUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
