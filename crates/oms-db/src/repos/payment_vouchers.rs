//! Payment voucher repository.

use serde::{Deserialize, Serialize};

use oms_core::entities::PaymentVoucher;
use oms_core::enums::LoggedEntity;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_f64, get_opt_string, parse_date, parse_datetime, parse_optional_datetime, update_fields,
};
use crate::repos::change_logs::LoggedEdit;
use crate::service::OmsService;
use crate::updates::payment_voucher::PaymentVoucherUpdate;

const SELECT_COLS: &str = "v.id, v.date, v.ledger_id, v.payment_for, v.payment_type, v.amount, \
    v.created_by, v.created_at, v.updated_at";

fn row_to_payment_voucher(row: &libsql::Row) -> Result<PaymentVoucher, DatabaseError> {
    Ok(PaymentVoucher {
        id: row.get(0)?,
        date: parse_date(&row.get::<String>(1)?)?,
        ledger_id: get_opt_string(row, 2)?,
        payment_for: get_opt_string(row, 3)?.unwrap_or_default(),
        payment_type: get_opt_string(row, 4)?.unwrap_or_default(),
        amount: get_f64(row, 5)?,
        created_by: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 8)?.as_deref())?,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentVoucherWithLedger {
    #[serde(flatten)]
    pub voucher: PaymentVoucher,
    pub ledger_name: Option<String>,
}

impl OmsService {
    async fn query_payment_vouchers(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<PaymentVoucher>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut vouchers = Vec::new();
        while let Some(row) = rows.next().await? {
            vouchers.push(row_to_payment_voucher(&row)?);
        }
        Ok(vouchers)
    }

    /// All vouchers, newest first, with ledger names.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_payment_vouchers(
        &self,
    ) -> Result<Vec<PaymentVoucherWithLedger>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS}, l.business_name FROM payment_vouchers v
             LEFT JOIN ledgers l ON l.ledger_id = v.ledger_id
             ORDER BY v.date DESC, v.id DESC"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut vouchers = Vec::new();
        while let Some(row) = rows.next().await? {
            vouchers.push(PaymentVoucherWithLedger {
                voucher: row_to_payment_voucher(&row)?,
                ledger_name: get_opt_string(&row, 9)?,
            });
        }
        Ok(vouchers)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no voucher has this id.
    pub async fn get_payment_voucher(&self, id: i64) -> Result<PaymentVoucher, DatabaseError> {
        self.query_payment_vouchers(
            &format!("SELECT {SELECT_COLS} FROM payment_vouchers v WHERE v.id = ?1"),
            vec![id.into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Vouchers paid to a ledger, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn payment_vouchers_for_ledger(
        &self,
        ledger_id: &str,
    ) -> Result<Vec<PaymentVoucher>, DatabaseError> {
        self.query_payment_vouchers(
            &format!(
                "SELECT {SELECT_COLS} FROM payment_vouchers v
                 WHERE v.ledger_id = ?1 ORDER BY v.date DESC, v.id DESC"
            ),
            vec![ledger_id.to_string().into()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when a required field is missing,
    /// or a query error.
    pub async fn create_payment_voucher(
        &self,
        form: &PaymentVoucherUpdate,
        created_by: Option<&str>,
    ) -> Result<PaymentVoucher, DatabaseError> {
        let fields = new_row_fields(
            form,
            &["date", "payment_for", "payment_type", "amount"],
            created_by,
        )?;
        let id = self.insert_fields("payment_vouchers", &fields).await?;
        tracing::info!(id, amount = ?form.amount, "payment voucher created");
        self.get_payment_voucher(id).await
    }

    /// Edit a voucher, logging to `payment_voucher_logs`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the voucher does not exist.
    pub async fn update_payment_voucher(
        &self,
        id: i64,
        update: &PaymentVoucherUpdate,
        changed_by: Option<&str>,
    ) -> Result<PaymentVoucher, DatabaseError> {
        let current = self.get_payment_voucher(id).await?;
        let record_id = id.to_string();
        let edit = LoggedEdit {
            entity: LoggedEntity::PaymentVoucher,
            table: "payment_vouchers",
            key_col: "id",
            record_id: &record_id,
            changed_by,
        };
        self.logged_update(&edit, &current, &update_fields(update)?)
            .await?;
        self.get_payment_voucher(id).await
    }
}
