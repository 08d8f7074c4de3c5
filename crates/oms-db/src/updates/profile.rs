//! Profile edit builder.
//!
//! `user_role` and `user_status` may only be set by a user manager; the page
//! layer enforces that before building the update.

use serde::{Deserialize, Serialize};

use oms_core::enums::UserRole;

use super::double_option;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gst_number: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<UserRole>,
    #[serde(default, deserialize_with = "double_option")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_status: Option<Option<String>>,
}

pub struct ProfileUpdateBuilder(ProfileUpdate);

impl ProfileUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(ProfileUpdate::default())
    }

    #[must_use]
    pub fn username(mut self, val: Option<String>) -> Self {
        self.0.username = Some(val);
        self
    }

    #[must_use]
    pub fn first_name(mut self, val: Option<String>) -> Self {
        self.0.first_name = Some(val);
        self
    }

    #[must_use]
    pub fn last_name(mut self, val: Option<String>) -> Self {
        self.0.last_name = Some(val);
        self
    }

    #[must_use]
    pub fn full_name(mut self, val: Option<String>) -> Self {
        self.0.full_name = Some(val);
        self
    }

    #[must_use]
    pub fn phone(mut self, val: Option<String>) -> Self {
        self.0.phone = Some(val);
        self
    }

    #[must_use]
    pub fn company_name(mut self, val: Option<String>) -> Self {
        self.0.company_name = Some(val);
        self
    }

    #[must_use]
    pub fn gst_number(mut self, val: Option<String>) -> Self {
        self.0.gst_number = Some(val);
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
    pub fn pincode(mut self, val: Option<String>) -> Self {
        self.0.pincode = Some(val);
        self
    }

    #[must_use]
    pub fn user_role(mut self, val: UserRole) -> Self {
        self.0.user_role = Some(val);
        self
    }

    #[must_use]
    pub fn user_status(mut self, val: Option<String>) -> Self {
        self.0.user_status = Some(val);
        self
    }

    #[must_use]
    pub fn build(self) -> ProfileUpdate {
        self.0
    }
}

impl Default for ProfileUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
