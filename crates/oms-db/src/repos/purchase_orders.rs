//! Purchase order repository. `total_amount` is derived from the line items.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use oms_core::details::parse_po_items;
use oms_core::entities::PurchaseOrder;
use oms_core::enums::PurchaseOrderStatus;

use super::change_logs::changed_fields;
use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_f64, get_json_lenient, get_opt_string, parse_date, parse_datetime,
    parse_optional_date, parse_optional_datetime, update_fields,
};
use crate::service::OmsService;
use crate::updates::purchase_order::PurchaseOrderUpdate;

const SELECT_COLS: &str = "o.id, o.po_number, o.po_date, o.supplier_name, o.ledger_id, \
    o.delivery_date, o.description, o.terms_conditions, o.items, o.total_amount, o.status, \
    o.created_by, o.created_at, o.updated_at";

const COL_COUNT: i32 = 14;

fn row_to_purchase_order(row: &libsql::Row) -> Result<PurchaseOrder, DatabaseError> {
    Ok(PurchaseOrder {
        id: row.get(0)?,
        po_number: row.get(1)?,
        po_date: parse_date(&row.get::<String>(2)?)?,
        supplier_name: get_opt_string(row, 3)?.unwrap_or_default(),
        ledger_id: get_opt_string(row, 4)?,
        delivery_date: parse_optional_date(get_opt_string(row, 5)?.as_deref())?,
        description: get_opt_string(row, 6)?,
        terms_conditions: get_opt_string(row, 7)?,
        items: parse_po_items(get_json_lenient(row, 8)?.as_ref()),
        total_amount: get_f64(row, 9)?,
        status: PurchaseOrderStatus::from_db(get_opt_string(row, 10)?.as_deref()),
        created_by: get_opt_string(row, 11)?,
        created_at: parse_datetime(&row.get::<String>(12)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 13)?.as_deref())?,
    })
}

/// A purchase order with its ledger's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderWithLedger {
    #[serde(flatten)]
    pub order: PurchaseOrder,
    pub ledger_name: Option<String>,
}

impl OmsService {
    async fn query_purchase_orders(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<PurchaseOrderWithLedger>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next().await? {
            orders.push(PurchaseOrderWithLedger {
                order: row_to_purchase_order(&row)?,
                ledger_name: get_opt_string(&row, COL_COUNT)?,
            });
        }
        Ok(orders)
    }

    fn joined_select(tail: &str) -> String {
        format!(
            "SELECT {SELECT_COLS}, l.business_name FROM purchase_orders o
             LEFT JOIN ledgers l ON l.ledger_id = o.ledger_id {tail}"
        )
    }

    /// All purchase orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_purchase_orders(
        &self,
    ) -> Result<Vec<PurchaseOrderWithLedger>, DatabaseError> {
        self.query_purchase_orders(
            &Self::joined_select("ORDER BY o.created_at DESC, o.id DESC"),
            Vec::new(),
        )
        .await
    }

    /// The `limit` most recently created purchase orders.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn recent_purchase_orders(
        &self,
        limit: u32,
    ) -> Result<Vec<PurchaseOrderWithLedger>, DatabaseError> {
        self.query_purchase_orders(
            &Self::joined_select("ORDER BY o.created_at DESC, o.id DESC LIMIT ?1"),
            vec![i64::from(limit).into()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no order has this id.
    pub async fn get_purchase_order(
        &self,
        id: i64,
    ) -> Result<PurchaseOrderWithLedger, DatabaseError> {
        self.query_purchase_orders(&Self::joined_select("WHERE o.id = ?1"), vec![id.into()])
            .await?
            .into_iter()
            .next()
            .ok_or(DatabaseError::NoResult)
    }

    /// Create a purchase order; the total is summed from its items and the
    /// status defaults to Draft.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when a required field is missing,
    /// or a query error (including a duplicate `po_number`).
    pub async fn create_purchase_order(
        &self,
        form: &PurchaseOrderUpdate,
        created_by: Option<&str>,
    ) -> Result<PurchaseOrderWithLedger, DatabaseError> {
        let mut fields = new_row_fields(
            form,
            &["po_number", "po_date", "supplier_name"],
            created_by,
        )?;
        let items = form.items.clone().unwrap_or_default();
        fields.insert("items".into(), serde_json::to_value(&items)?);
        fields.insert(
            "total_amount".into(),
            Value::from(PurchaseOrder::total_of(&items)),
        );
        fields.insert(
            "status".into(),
            form.status.unwrap_or_default().as_str().into(),
        );
        let id = self.insert_fields("purchase_orders", &fields).await?;
        tracing::info!(id, po_number = ?form.po_number, "purchase order created");
        self.get_purchase_order(id).await
    }

    /// Edit a purchase order. Changing the items recomputes the total.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the order does not exist.
    pub async fn update_purchase_order(
        &self,
        id: i64,
        update: &PurchaseOrderUpdate,
    ) -> Result<PurchaseOrderWithLedger, DatabaseError> {
        let current = self.get_purchase_order(id).await?.order;
        let mut fields = update_fields(update)?;
        if let Some(items) = &update.items {
            fields.insert(
                "total_amount".into(),
                Value::from(PurchaseOrder::total_of(items)),
            );
        }
        let (_, kept) = changed_fields(&current, &fields)?;
        if !kept.is_empty() {
            self.apply_update("purchase_orders", "id", id.into(), &kept)
                .await?;
            tracing::info!(id, fields = kept.len(), "purchase order updated");
        }
        self.get_purchase_order(id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_purchase_orders(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM purchase_orders", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Orders created on or after the start of `day`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_purchase_orders_since(&self, day: NaiveDate) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT COUNT(*) FROM purchase_orders WHERE created_at >= ?1",
                [day.to_string()],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }
}
