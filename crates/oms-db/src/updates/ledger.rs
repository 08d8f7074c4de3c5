//! Ledger edit builder.

use serde::{Deserialize, Serialize};

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_person_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pan_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_logo: Option<Option<String>>,
}

pub struct LedgerUpdateBuilder(LedgerUpdate);

impl LedgerUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(LedgerUpdate::default())
    }

    #[must_use]
    pub fn business_name(mut self, val: impl Into<String>) -> Self {
        self.0.business_name = Some(val.into());
        self
    }

    #[must_use]
    pub fn contact_person_name(mut self, val: Option<String>) -> Self {
        self.0.contact_person_name = Some(val);
        self
    }

    #[must_use]
    pub fn mobile_number(mut self, val: Option<String>) -> Self {
        self.0.mobile_number = Some(val);
        self
    }

    #[must_use]
    pub fn email(mut self, val: Option<String>) -> Self {
        self.0.email = Some(val);
        self
    }

    #[must_use]
    pub fn gst_number(mut self, val: Option<String>) -> Self {
        self.0.gst_number = Some(val);
        self
    }

    #[must_use]
    pub fn pan_number(mut self, val: Option<String>) -> Self {
        self.0.pan_number = Some(val);
        self
    }

    #[must_use]
    pub fn address(mut self, val: Option<String>) -> Self {
        self.0.address = Some(val);
        self
    }

    #[must_use]
    pub fn city(mut self, val: Option<String>) -> Self {
        self.0.city = Some(val);
        self
    }

    #[must_use]
    pub fn district(mut self, val: Option<String>) -> Self {
        self.0.district = Some(val);
        self
    }

    #[must_use]
    pub fn state(mut self, val: Option<String>) -> Self {
        self.0.state = Some(val);
        self
    }

    #[must_use]
    pub fn country(mut self, val: Option<String>) -> Self {
        self.0.country = Some(val);
        self
    }

    #[must_use]
    pub fn zip_code(mut self, val: Option<String>) -> Self {
        self.0.zip_code = Some(val);
        self
    }

    #[must_use]
    pub fn business_logo(mut self, val: Option<String>) -> Self {
        self.0.business_logo = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> LedgerUpdate {
        self.0
    }
}

impl Default for LedgerUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
