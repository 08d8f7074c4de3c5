//! Update builder types for entity edits.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some`
//! fields generate SET clauses in the dynamic UPDATE SQL. Nullable columns
//! use `Option<Option<T>>` so that "clear this field" (`Some(None)`) differs
//! from "leave it alone" (`None`). The serialized update (changed fields only)
//! is what gets diffed against the current row for the change log.
//!
//! The update structs also deserialize straight from edit-form JSON, where an
//! explicit `null` means "clear".

pub mod expense;
pub mod ledger;
pub mod payment_voucher;
pub mod profile;
pub mod purchase_order;
pub mod stitching_challan;
pub mod weaver_challan;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (even `null`) as `Some(..)`.
///
/// Combined with `#[serde(default)]`, an absent field stays `None`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
