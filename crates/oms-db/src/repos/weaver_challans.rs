//! Weaver challan repository: raw-fabric receipts.

use serde::{Deserialize, Serialize};

use oms_core::details::parse_quality_details;
use oms_core::entities::WeaverChallan;
use oms_core::enums::LoggedEntity;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_f64, get_i64, get_json_lenient, get_opt_f64, get_opt_string, parse_date, parse_datetime,
    parse_optional_datetime, placeholders, update_fields,
};
use crate::repos::change_logs::LoggedEdit;
use crate::service::OmsService;
use crate::updates::weaver_challan::WeaverChallanUpdate;

pub(crate) const SELECT_COLS: &str = "w.id, w.challan_no, w.batch_number, w.challan_date, \
    w.ms_party_name, w.ledger_id, w.vendor_ledger_id, w.quality_details, w.taka_details, w.taka, \
    w.total_grey_mtr, w.fold_cm, w.width_inch, w.vendor_amount, w.vendor_invoice_number, \
    w.bill_no, w.lr_number, w.transport_name, w.transport_charge, w.delivery_at, w.sgst, w.cgst, \
    w.igst, w.created_by, w.created_at, w.updated_at";

pub(crate) const COL_COUNT: i32 = 26;

pub(crate) fn row_to_weaver_challan(row: &libsql::Row) -> Result<WeaverChallan, DatabaseError> {
    Ok(WeaverChallan {
        id: row.get(0)?,
        challan_no: row.get(1)?,
        batch_number: row.get(2)?,
        challan_date: parse_date(&row.get::<String>(3)?)?,
        ms_party_name: row.get(4)?,
        ledger_id: get_opt_string(row, 5)?,
        vendor_ledger_id: get_opt_string(row, 6)?,
        quality_details: parse_quality_details(get_json_lenient(row, 7)?.as_ref()),
        taka_details: get_json_lenient(row, 8)?,
        taka: get_i64(row, 9)?,
        total_grey_mtr: get_f64(row, 10)?,
        fold_cm: get_opt_f64(row, 11)?,
        width_inch: get_opt_f64(row, 12)?,
        vendor_amount: get_opt_f64(row, 13)?,
        vendor_invoice_number: get_opt_string(row, 14)?,
        bill_no: get_opt_string(row, 15)?,
        lr_number: get_opt_string(row, 16)?,
        transport_name: get_opt_string(row, 17)?,
        transport_charge: get_opt_f64(row, 18)?,
        delivery_at: get_opt_string(row, 19)?,
        sgst: get_opt_string(row, 20)?,
        cgst: get_opt_string(row, 21)?,
        igst: get_opt_string(row, 22)?,
        created_by: get_opt_string(row, 23)?,
        created_at: parse_datetime(&row.get::<String>(24)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 25)?.as_deref())?,
    })
}

/// A weaver challan with the business name of its vendor ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeaverChallanWithVendor {
    #[serde(flatten)]
    pub challan: WeaverChallan,
    pub vendor_name: Option<String>,
}

const REQUIRED: &[&str] = &["challan_no", "batch_number", "challan_date", "ms_party_name"];

impl OmsService {
    async fn query_weaver_challans(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<WeaverChallan>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut challans = Vec::new();
        while let Some(row) = rows.next().await? {
            challans.push(row_to_weaver_challan(&row)?);
        }
        Ok(challans)
    }

    /// All weaver challans, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_weaver_challans(&self) -> Result<Vec<WeaverChallan>, DatabaseError> {
        self.query_weaver_challans(
            &format!("SELECT {SELECT_COLS} FROM weaver_challans w ORDER BY w.created_at DESC, w.id DESC"),
            Vec::new(),
        )
        .await
    }

    /// The `limit` most recently created weaver challans.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn recent_weaver_challans(
        &self,
        limit: u32,
    ) -> Result<Vec<WeaverChallan>, DatabaseError> {
        self.query_weaver_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM weaver_challans w
                 ORDER BY w.created_at DESC, w.id DESC LIMIT ?1"
            ),
            vec![i64::from(limit).into()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no challan has this id.
    pub async fn get_weaver_challan(&self, id: i64) -> Result<WeaverChallan, DatabaseError> {
        self.query_weaver_challans(
            &format!("SELECT {SELECT_COLS} FROM weaver_challans w WHERE w.id = ?1"),
            vec![id.into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Weaver challans whose `batch_number` is one of `batches`, oldest id
    /// first. An empty batch list returns nothing without querying.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn weaver_challans_by_batches(
        &self,
        batches: &[String],
    ) -> Result<Vec<WeaverChallan>, DatabaseError> {
        if batches.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM weaver_challans w WHERE w.batch_number IN ({}) ORDER BY w.id ASC",
            placeholders(1, batches.len())
        );
        self.query_weaver_challans(&sql, batches.iter().map(|b| b.clone().into()).collect())
            .await
    }

    /// Weaver challans supplied by the given vendor ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn weaver_challans_for_vendor(
        &self,
        ledger_id: &str,
    ) -> Result<Vec<WeaverChallan>, DatabaseError> {
        self.query_weaver_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM weaver_challans w
                 WHERE w.vendor_ledger_id = ?1 ORDER BY w.challan_date DESC, w.id DESC"
            ),
            vec![ledger_id.to_string().into()],
        )
        .await
    }

    /// Weaver challans booked under the given ledger (the party, not the
    /// vendor), newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn weaver_challans_for_ledger(
        &self,
        ledger_id: &str,
    ) -> Result<Vec<WeaverChallan>, DatabaseError> {
        self.query_weaver_challans(
            &format!(
                "SELECT {SELECT_COLS} FROM weaver_challans w
                 WHERE w.ledger_id = ?1 ORDER BY w.challan_date DESC, w.id DESC"
            ),
            vec![ledger_id.to_string().into()],
        )
        .await
    }

    /// All weaver challans joined with their vendor ledger's business name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn weaver_challans_with_vendor(
        &self,
    ) -> Result<Vec<WeaverChallanWithVendor>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS}, l.business_name FROM weaver_challans w
             LEFT JOIN ledgers l ON l.ledger_id = w.vendor_ledger_id
             ORDER BY w.created_at DESC, w.id DESC"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut challans = Vec::new();
        while let Some(row) = rows.next().await? {
            challans.push(WeaverChallanWithVendor {
                challan: row_to_weaver_challan(&row)?,
                vendor_name: get_opt_string(&row, COL_COUNT)?,
            });
        }
        Ok(challans)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when a required field is missing,
    /// or a query error.
    pub async fn create_weaver_challan(
        &self,
        form: &WeaverChallanUpdate,
        created_by: Option<&str>,
    ) -> Result<WeaverChallan, DatabaseError> {
        let fields = new_row_fields(form, REQUIRED, created_by)?;
        let id = self.insert_fields("weaver_challans", &fields).await?;
        tracing::info!(id, challan_no = ?form.challan_no, "weaver challan created");
        self.get_weaver_challan(id).await
    }

    /// Edit a weaver challan, logging to `weaver_challan_logs`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the challan does not exist.
    pub async fn update_weaver_challan(
        &self,
        id: i64,
        update: &WeaverChallanUpdate,
        changed_by: Option<&str>,
    ) -> Result<WeaverChallan, DatabaseError> {
        let current = self.get_weaver_challan(id).await?;
        let record_id = id.to_string();
        let edit = LoggedEdit {
            entity: LoggedEntity::WeaverChallan,
            table: "weaver_challans",
            key_col: "id",
            record_id: &record_id,
            changed_by,
        };
        self.logged_update(&edit, &current, &update_fields(update)?)
            .await?;
        self.get_weaver_challan(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_weaver_challans(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM weaver_challans", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seed_ledger, test_service, weaver_form};
    use crate::updates::weaver_challan::WeaverChallanUpdateBuilder;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn create_and_read_back_quality_details() {
        let svc = test_service().await;
        let challan = svc
            .create_weaver_challan(&weaver_form("WC-1", "B-101", "Cotton 60", 42.5), Some("u1"))
            .await
            .unwrap();
        assert_eq!(challan.rate_for("Cotton 60"), Some(42.5));
        assert_eq!(challan.created_by.as_deref(), Some("u1"));
    }

    #[tokio::test]
    async fn missing_required_field_is_rejected() {
        let svc = test_service().await;
        let form = WeaverChallanUpdateBuilder::new().challan_no("WC-1").build();
        let err = svc.create_weaver_challan(&form, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid state: batch_number is required");
    }

    #[tokio::test]
    async fn by_batches_keeps_id_order() {
        let svc = test_service().await;
        for (no, batch) in [("WC-1", "B-1"), ("WC-2", "B-2"), ("WC-3", "B-1")] {
            svc.create_weaver_challan(&weaver_form(no, batch, "Rayon", 10.0), None)
                .await
                .unwrap();
        }
        let found = svc.weaver_challans_by_batches(&["B-1".into()]).await.unwrap();
        let numbers: Vec<_> = found.iter().map(|c| c.challan_no.as_str()).collect();
        assert_eq!(numbers, vec!["WC-1", "WC-3"]);
        assert!(svc.weaver_challans_by_batches(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn vendor_join_and_lookup() {
        let svc = test_service().await;
        seed_ledger(&svc, "LED-V", "Vendor Mills").await;
        let mut form = weaver_form("WC-1", "B-1", "Rayon", 10.0);
        form.vendor_ledger_id = Some(Some("LED-V".into()));
        svc.create_weaver_challan(&form, None).await.unwrap();

        let rows = svc.weaver_challans_with_vendor().await.unwrap();
        assert_eq!(rows[0].vendor_name.as_deref(), Some("Vendor Mills"));
        assert_eq!(svc.weaver_challans_for_vendor("LED-V").await.unwrap().len(), 1);
        assert!(svc.weaver_challans_for_ledger("LED-V").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn edit_is_logged_with_numeric_key() {
        let svc = test_service().await;
        let challan = svc
            .create_weaver_challan(&weaver_form("WC-1", "B-1", "Rayon", 10.0), None)
            .await
            .unwrap();
        let update = WeaverChallanUpdateBuilder::new().taka(14).build();
        svc.update_weaver_challan(challan.id, &update, Some("u1"))
            .await
            .unwrap();
        let logs = svc
            .list_change_logs(LoggedEntity::WeaverChallan, &challan.id.to_string())
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].changes["taka"].to, serde_json::json!(14));
    }
}
