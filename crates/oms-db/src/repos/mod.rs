//! Repository modules implementing reads and writes for every OMS table.
//!
//! Each module adds methods to `OmsService` via `impl OmsService` blocks.

pub mod change_logs;
pub mod dashboard;
pub mod expenses;
pub mod ledgers;
pub mod payment_vouchers;
pub mod products;
pub mod profiles;
pub mod purchase_orders;
pub mod shorting_entries;
pub mod stitching_challans;
pub mod weaver_challans;

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::DatabaseError;
use crate::helpers::update_fields;

/// Build the column map for a new row: the form's fields plus `created_by`
/// and `created_at`. Every column in `required` must be present and non-null.
pub(crate) fn new_row_fields<T: Serialize>(
    form: &T,
    required: &[&str],
    created_by: Option<&str>,
) -> Result<Map<String, Value>, DatabaseError> {
    let mut fields = update_fields(form)?;
    for column in required {
        match fields.get(*column) {
            None | Some(Value::Null) => {
                return Err(DatabaseError::InvalidState(format!("{column} is required")));
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                return Err(DatabaseError::InvalidState(format!("{column} is required")));
            }
            Some(_) => {}
        }
    }
    fields.insert("created_by".into(), created_by.map_or(Value::Null, Into::into));
    fields.insert("created_at".into(), Utc::now().to_rfc3339().into());
    Ok(fields)
}
