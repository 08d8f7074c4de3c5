//! Shorting entry repository: fabric lost against a weaver challan.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use oms_core::entities::ShortingEntry;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_f64, get_opt_f64, get_opt_i64, get_opt_string, parse_date, parse_datetime,
    parse_optional_datetime,
};
use crate::service::OmsService;

const SELECT_COLS: &str = "e.id, e.entry_date, e.quality_name, e.shorting_qty, \
    e.weaver_challan_id, e.weaver_challan_qty, e.ledger_id, e.created_by, e.created_at, \
    e.updated_at";

fn row_to_shorting_entry(row: &libsql::Row) -> Result<ShortingEntry, DatabaseError> {
    Ok(ShortingEntry {
        id: row.get(0)?,
        entry_date: parse_date(&row.get::<String>(1)?)?,
        quality_name: get_opt_string(row, 2)?,
        shorting_qty: get_f64(row, 3)?,
        weaver_challan_id: get_opt_i64(row, 4)?,
        weaver_challan_qty: get_opt_f64(row, 5)?,
        ledger_id: get_opt_string(row, 6)?,
        created_by: get_opt_string(row, 7)?,
        created_at: parse_datetime(&row.get::<String>(8)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 9)?.as_deref())?,
    })
}

/// A shorting entry with its ledger name and the weaver challan it was
/// recorded against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShortingEntryDetail {
    #[serde(flatten)]
    pub entry: ShortingEntry,
    pub ledger_name: Option<String>,
    pub weaver_challan_no: Option<String>,
    pub batch_number: Option<String>,
}

/// Create-form payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NewShortingEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_name: Option<String>,
    #[serde(default)]
    pub shorting_qty: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaver_challan_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weaver_challan_qty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<String>,
}

impl OmsService {
    /// All shorting entries, newest first, with joined names.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_shorting_entries(&self) -> Result<Vec<ShortingEntryDetail>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS}, l.business_name, w.challan_no, w.batch_number
             FROM shorting_entries e
             LEFT JOIN ledgers l ON l.ledger_id = e.ledger_id
             LEFT JOIN weaver_challans w ON w.id = e.weaver_challan_id
             ORDER BY e.entry_date DESC, e.id DESC"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(ShortingEntryDetail {
                entry: row_to_shorting_entry(&row)?,
                ledger_name: get_opt_string(&row, 10)?,
                weaver_challan_no: get_opt_string(&row, 11)?,
                batch_number: get_opt_string(&row, 12)?,
            });
        }
        Ok(entries)
    }

    /// Plain shorting entries, in id order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn all_shorting_entries(&self) -> Result<Vec<ShortingEntry>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM shorting_entries e ORDER BY e.id ASC"),
                (),
            )
            .await?;
        let mut entries = Vec::new();
        while let Some(row) = rows.next().await? {
            entries.push(row_to_shorting_entry(&row)?);
        }
        Ok(entries)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no entry has this id.
    pub async fn get_shorting_entry(&self, id: i64) -> Result<ShortingEntry, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM shorting_entries e WHERE e.id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_shorting_entry(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when `entry_date` is missing,
    /// or a query error.
    pub async fn create_shorting_entry(
        &self,
        form: &NewShortingEntry,
        created_by: Option<&str>,
    ) -> Result<ShortingEntry, DatabaseError> {
        let fields = new_row_fields(form, &["entry_date"], created_by)?;
        let id = self.insert_fields("shorting_entries", &fields).await?;
        tracing::info!(id, qty = form.shorting_qty, "shorting entry created");
        self.get_shorting_entry(id).await
    }
}
