//! Expense repository. `cost` is always derived from the pre-GST amount and
//! the GST columns, on create and on every edit that touches them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use oms_core::costing::expense_cost;
use oms_core::details::parse_string_list;
use oms_core::entities::Expense;
use oms_core::enums::LoggedEntity;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{
    get_f64, get_opt_string, parse_date, parse_datetime, parse_optional_datetime, placeholders,
    update_fields,
};
use crate::repos::change_logs::LoggedEdit;
use crate::service::OmsService;
use crate::updates::expense::ExpenseUpdate;

const SELECT_COLS: &str = "e.id, e.expense_date, e.challan_no, e.ledger_id, e.manual_ledger_id, \
    e.expense_for, e.other_expense_description, e.amount_before_gst, e.sgst, e.cgst, e.igst, \
    e.cost, e.created_by, e.created_at, e.updated_at";

const COL_COUNT: i32 = 15;

fn row_to_expense(row: &libsql::Row) -> Result<Expense, DatabaseError> {
    Ok(Expense {
        id: row.get(0)?,
        expense_date: parse_date(&row.get::<String>(1)?)?,
        challan_no: get_opt_string(row, 2)?,
        ledger_id: get_opt_string(row, 3)?,
        manual_ledger_id: get_opt_string(row, 4)?,
        expense_for: parse_string_list(get_opt_string(row, 5)?.as_deref()),
        other_expense_description: get_opt_string(row, 6)?,
        amount_before_gst: get_f64(row, 7)?,
        sgst: get_opt_string(row, 8)?,
        cgst: get_opt_string(row, 9)?,
        igst: get_opt_string(row, 10)?,
        cost: get_f64(row, 11)?,
        created_by: get_opt_string(row, 12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 14)?.as_deref())?,
    })
}

/// An expense with the name of the ledger it is booked against. The manual
/// ledger wins over the challan's ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExpenseWithLedger {
    #[serde(flatten)]
    pub expense: Expense,
    pub ledger_name: Option<String>,
}

/// Cost after applying `update` on top of `current`.
fn cost_after(current: &Expense, update: &ExpenseUpdate) -> f64 {
    let sgst = update.sgst.clone().unwrap_or_else(|| current.sgst.clone());
    let cgst = update.cgst.clone().unwrap_or_else(|| current.cgst.clone());
    let igst = update.igst.clone().unwrap_or_else(|| current.igst.clone());
    expense_cost(
        update.amount_before_gst.unwrap_or(current.amount_before_gst),
        sgst.as_deref(),
        cgst.as_deref(),
        igst.as_deref(),
    )
}

impl OmsService {
    async fn query_expenses(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Expense>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut expenses = Vec::new();
        while let Some(row) = rows.next().await? {
            expenses.push(row_to_expense(&row)?);
        }
        Ok(expenses)
    }

    /// All expenses, newest first, with their ledger names.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_expenses(&self) -> Result<Vec<ExpenseWithLedger>, DatabaseError> {
        let sql = format!(
            "SELECT {SELECT_COLS}, coalesce(m.business_name, l.business_name) FROM expenses e
             LEFT JOIN ledgers l ON l.ledger_id = e.ledger_id
             LEFT JOIN ledgers m ON m.ledger_id = e.manual_ledger_id
             ORDER BY e.expense_date DESC, e.id DESC"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut expenses = Vec::new();
        while let Some(row) = rows.next().await? {
            expenses.push(ExpenseWithLedger {
                expense: row_to_expense(&row)?,
                ledger_name: get_opt_string(&row, COL_COUNT)?,
            });
        }
        Ok(expenses)
    }

    /// All expenses without joins, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn all_expenses(&self) -> Result<Vec<Expense>, DatabaseError> {
        self.query_expenses(
            &format!("SELECT {SELECT_COLS} FROM expenses e ORDER BY e.expense_date DESC, e.id DESC"),
            Vec::new(),
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no expense has this id.
    pub async fn get_expense(&self, id: i64) -> Result<Expense, DatabaseError> {
        self.query_expenses(
            &format!("SELECT {SELECT_COLS} FROM expenses e WHERE e.id = ?1"),
            vec![id.into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Expenses booked against any of the given stitching challan numbers.
    /// An empty list returns nothing without querying.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn expenses_for_challans(
        &self,
        challan_nos: &[String],
    ) -> Result<Vec<Expense>, DatabaseError> {
        if challan_nos.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM expenses e WHERE e.challan_no IN ({}) ORDER BY e.id ASC",
            placeholders(1, challan_nos.len())
        );
        self.query_expenses(&sql, challan_nos.iter().map(|c| c.clone().into()).collect())
            .await
    }

    /// Expenses booked against a ledger, directly or as the manual ledger.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn expenses_for_ledger(&self, ledger_id: &str) -> Result<Vec<Expense>, DatabaseError> {
        self.query_expenses(
            &format!(
                "SELECT {SELECT_COLS} FROM expenses e
                 WHERE e.ledger_id = ?1 OR e.manual_ledger_id = ?1
                 ORDER BY e.expense_date DESC, e.id DESC"
            ),
            vec![ledger_id.to_string().into()],
        )
        .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when `expense_date` is missing,
    /// or a query error.
    pub async fn create_expense(
        &self,
        form: &ExpenseUpdate,
        created_by: Option<&str>,
    ) -> Result<Expense, DatabaseError> {
        let mut fields = new_row_fields(form, &["expense_date"], created_by)?;
        let cost = expense_cost(
            form.amount_before_gst.unwrap_or(0.0),
            form.sgst.clone().flatten().as_deref(),
            form.cgst.clone().flatten().as_deref(),
            form.igst.clone().flatten().as_deref(),
        );
        fields.insert("cost".into(), Value::from(cost));
        fields
            .entry("expense_for")
            .or_insert_with(|| Value::Array(Vec::new()));
        let id = self.insert_fields("expenses", &fields).await?;
        tracing::info!(id, cost, "expense created");
        self.get_expense(id).await
    }

    /// Edit an expense, recomputing `cost` and logging to `expense_logs`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the expense does not exist.
    pub async fn update_expense(
        &self,
        id: i64,
        update: &ExpenseUpdate,
        changed_by: Option<&str>,
    ) -> Result<Expense, DatabaseError> {
        let current = self.get_expense(id).await?;
        let mut fields = update_fields(update)?;
        fields.insert("cost".into(), Value::from(cost_after(&current, update)));
        let record_id = id.to_string();
        let edit = LoggedEdit {
            entity: LoggedEntity::Expense,
            table: "expenses",
            key_col: "id",
            record_id: &record_id,
            changed_by,
        };
        self.logged_update(&edit, &current, &fields)
            .await?;
        self.get_expense(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{date, seed_ledger, test_service};
    use crate::updates::expense::ExpenseUpdateBuilder;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    fn expense(amount: f64, sgst: Option<&str>) -> Expense {
        Expense {
            id: 1,
            expense_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            challan_no: None,
            ledger_id: None,
            manual_ledger_id: None,
            expense_for: vec![],
            other_expense_description: None,
            amount_before_gst: amount,
            sgst: sgst.map(String::from),
            cgst: None,
            igst: None,
            cost: 0.0,
            created_by: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn cost_keeps_untouched_gst_columns() {
        let current = expense(1000.0, Some("9%"));
        let update = ExpenseUpdate {
            amount_before_gst: Some(2000.0),
            ..Default::default()
        };
        assert!((cost_after(&current, &update) - 2180.0).abs() < 1e-9);
    }

    #[test]
    fn cost_drops_cleared_gst_columns() {
        let current = expense(1000.0, Some("9%"));
        let update = ExpenseUpdate {
            sgst: Some(None),
            ..Default::default()
        };
        assert!((cost_after(&current, &update) - 1000.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn create_computes_cost_with_gst() {
        let svc = test_service().await;
        let form = ExpenseUpdateBuilder::new()
            .expense_date(date(2025, 3, 1))
            .challan_no(Some("SC-1".into()))
            .expense_for(vec!["Stitching".into()])
            .amount_before_gst(1000.0)
            .sgst(Some("9%".into()))
            .cgst(Some("9%".into()))
            .igst(Some("Not Applicable".into()))
            .build();
        let expense = svc.create_expense(&form, Some("u1")).await.unwrap();
        assert!((expense.cost - 1180.0).abs() < 1e-9);
        assert_eq!(expense.expense_for, vec!["Stitching"]);
    }

    #[tokio::test]
    async fn update_recomputes_and_logs_cost() {
        let svc = test_service().await;
        let form = ExpenseUpdateBuilder::new()
            .expense_date(date(2025, 3, 1))
            .amount_before_gst(500.0)
            .build();
        let expense = svc.create_expense(&form, None).await.unwrap();
        let update = ExpenseUpdateBuilder::new().sgst(Some("5%".into())).build();
        let updated = svc.update_expense(expense.id, &update, Some("u2")).await.unwrap();
        assert!((updated.cost - 525.0).abs() < 1e-9);

        let logs = svc
            .list_change_logs(LoggedEntity::Expense, &expense.id.to_string())
            .await
            .unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].changes.contains_key("cost"));
        assert!(logs[0].changes.contains_key("sgst"));
    }

    #[tokio::test]
    async fn list_prefers_manual_ledger_name() {
        let svc = test_service().await;
        seed_ledger(&svc, "LED-1", "Challan Ledger").await;
        seed_ledger(&svc, "LED-2", "Manual Ledger").await;
        let form = ExpenseUpdateBuilder::new()
            .expense_date(date(2025, 3, 1))
            .ledger_id(Some("LED-1".into()))
            .manual_ledger_id(Some("LED-2".into()))
            .build();
        svc.create_expense(&form, None).await.unwrap();
        let rows = svc.list_expenses().await.unwrap();
        assert_eq!(rows[0].ledger_name.as_deref(), Some("Manual Ledger"));
        assert_eq!(svc.expenses_for_ledger("LED-2").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn challan_lookup_with_no_numbers_is_empty() {
        let svc = test_service().await;
        assert!(svc.expenses_for_challans(&[]).await.unwrap().is_empty());
    }
}
