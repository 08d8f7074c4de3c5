//! Ledger repository: business-partner accounts, list filters, edits.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use oms_core::entities::Ledger;
use oms_core::enums::LoggedEntity;
use oms_core::ids::PREFIX_LEDGER;

use super::new_row_fields;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_optional_datetime, update_fields};
use crate::repos::change_logs::LoggedEdit;
use crate::service::OmsService;
use crate::updates::ledger::LedgerUpdate;

const SELECT_COLS: &str = "l.ledger_id, l.business_name, l.contact_person_name, l.mobile_number, \
    l.email, l.gst_number, l.pan_number, l.address, l.city, l.district, l.state, l.country, \
    l.zip_code, l.business_logo, l.created_by, l.created_at, l.updated_at";

const COL_COUNT: i32 = 17;

fn row_to_ledger(row: &libsql::Row) -> Result<Ledger, DatabaseError> {
    Ok(Ledger {
        ledger_id: row.get(0)?,
        business_name: row.get(1)?,
        contact_person_name: get_opt_string(row, 2)?,
        mobile_number: get_opt_string(row, 3)?,
        email: get_opt_string(row, 4)?,
        gst_number: get_opt_string(row, 5)?,
        pan_number: get_opt_string(row, 6)?,
        address: get_opt_string(row, 7)?,
        city: get_opt_string(row, 8)?,
        district: get_opt_string(row, 9)?,
        state: get_opt_string(row, 10)?,
        country: get_opt_string(row, 11)?,
        zip_code: get_opt_string(row, 12)?,
        business_logo: get_opt_string(row, 13)?,
        created_by: get_opt_string(row, 14)?,
        created_at: parse_datetime(&row.get::<String>(15)?)?,
        updated_at: parse_optional_datetime(get_opt_string(row, 16)?.as_deref())?,
    })
}

/// Ledger list filters. Empty strings mean "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LedgerFilter {
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub from_date: Option<NaiveDate>,
    /// Inclusive: rows created any time on this day match.
    #[serde(default)]
    pub to_date: Option<NaiveDate>,
    /// 1-based page number.
    #[serde(default)]
    pub page: Option<u32>,
}

/// A ledger row together with its creator's email.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerListItem {
    #[serde(flatten)]
    pub ledger: Ledger,
    pub creator_email: Option<String>,
}

/// One page of the ledger list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerPage {
    pub ledgers: Vec<LedgerListItem>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
}

/// Distinct values offered by the list's filter dropdowns.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerFilterOptions {
    pub states: Vec<String>,
    pub cities: Vec<String>,
}

/// Create-form payload. A blank `ledger_id` gets a generated `LED-` id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewLedger {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger_id: Option<String>,
    #[serde(flatten)]
    pub fields: LedgerUpdate,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// WHERE clause and parameters shared by the page query and its count.
fn filter_clause(filter: &LedgerFilter) -> (String, Vec<libsql::Value>) {
    let mut conditions = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(search) = non_blank(filter.search.as_ref()) {
        params.push(format!("%{}%", search.to_lowercase()).into());
        let idx = params.len();
        conditions.push(format!(
            "(lower(l.business_name) LIKE ?{idx} OR lower(l.ledger_id) LIKE ?{idx} \
             OR lower(coalesce(l.contact_person_name, '')) LIKE ?{idx})"
        ));
    }
    if let Some(state) = non_blank(filter.state.as_ref()) {
        params.push(state.to_string().into());
        conditions.push(format!("l.state = ?{}", params.len()));
    }
    if let Some(city) = non_blank(filter.city.as_ref()) {
        params.push(city.to_string().into());
        conditions.push(format!("l.city = ?{}", params.len()));
    }
    if let Some(from) = filter.from_date {
        params.push(from.to_string().into());
        conditions.push(format!("l.created_at >= ?{}", params.len()));
    }
    // The last representable date has no next day, so it bounds nothing.
    if let Some(end) = filter.to_date.and_then(|to| to.checked_add_days(Days::new(1))) {
        params.push(end.to_string().into());
        conditions.push(format!("l.created_at < ?{}", params.len()));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!("WHERE {}", conditions.join(" AND ")), params)
    }
}

impl OmsService {
    async fn query_ledgers(
        &self,
        sql: &str,
        params: Vec<libsql::Value>,
    ) -> Result<Vec<Ledger>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(sql, libsql::params_from_iter(params))
            .await?;
        let mut ledgers = Vec::new();
        while let Some(row) = rows.next().await? {
            ledgers.push(row_to_ledger(&row)?);
        }
        Ok(ledgers)
    }

    /// One filtered page of ledgers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if either query fails.
    pub async fn list_ledgers(
        &self,
        filter: &LedgerFilter,
        page_size: u32,
    ) -> Result<LedgerPage, DatabaseError> {
        let page = filter.page.unwrap_or(1).max(1);
        let page_size = page_size.max(1);
        let (where_sql, params) = filter_clause(filter);

        let mut count_rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT COUNT(*) FROM ledgers l {where_sql}"),
                libsql::params_from_iter(params.clone()),
            )
            .await?;
        let total_count = match count_rows.next().await? {
            Some(row) => row.get::<i64>(0)?,
            None => 0,
        };

        let mut page_params = params;
        page_params.push(i64::from(page_size).into());
        page_params.push((i64::from(page - 1) * i64::from(page_size)).into());
        let limit_idx = page_params.len() - 1;
        let sql = format!(
            "SELECT {SELECT_COLS}, p.email FROM ledgers l
             LEFT JOIN profiles p ON p.id = l.created_by
             {where_sql}
             ORDER BY l.created_at DESC, l.ledger_id
             LIMIT ?{limit_idx} OFFSET ?{}",
            limit_idx + 1
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(page_params))
            .await?;

        let mut ledgers = Vec::new();
        while let Some(row) = rows.next().await? {
            ledgers.push(LedgerListItem {
                ledger: row_to_ledger(&row)?,
                creator_email: get_opt_string(&row, COL_COUNT)?,
            });
        }

        Ok(LedgerPage {
            ledgers,
            total_count,
            page,
            page_size,
        })
    }

    /// Every ledger, by business name. Feeds the form dropdowns.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn all_ledgers(&self) -> Result<Vec<Ledger>, DatabaseError> {
        self.query_ledgers(
            &format!("SELECT {SELECT_COLS} FROM ledgers l ORDER BY l.business_name ASC"),
            Vec::new(),
        )
        .await
    }

    /// Ledgers whose ids are in `ids`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn ledgers_by_ids(&self, ids: &[String]) -> Result<Vec<Ledger>, DatabaseError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let sql = format!(
            "SELECT {SELECT_COLS} FROM ledgers l WHERE l.ledger_id IN ({})",
            crate::helpers::placeholders(1, ids.len())
        );
        self.query_ledgers(&sql, ids.iter().map(|id| id.clone().into()).collect())
            .await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no ledger has this id.
    pub async fn get_ledger(&self, ledger_id: &str) -> Result<Ledger, DatabaseError> {
        self.query_ledgers(
            &format!("SELECT {SELECT_COLS} FROM ledgers l WHERE l.ledger_id = ?1"),
            vec![ledger_id.to_string().into()],
        )
        .await?
        .into_iter()
        .next()
        .ok_or(DatabaseError::NoResult)
    }

    /// Create a ledger and return it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` when `business_name` is missing,
    /// or a query error (including a duplicate `ledger_id`).
    pub async fn create_ledger(
        &self,
        form: &NewLedger,
        created_by: Option<&str>,
    ) -> Result<Ledger, DatabaseError> {
        let ledger_id = match non_blank(form.ledger_id.as_ref()) {
            Some(id) => id.to_string(),
            None => self.db().generate_id(PREFIX_LEDGER).await?,
        };
        let mut fields = new_row_fields(&form.fields, &["business_name"], created_by)?;
        fields.insert("ledger_id".into(), ledger_id.clone().into());
        self.insert_fields("ledgers", &fields).await?;
        tracing::info!(%ledger_id, "ledger created");
        self.get_ledger(&ledger_id).await
    }

    /// Edit a ledger, logging the changed fields to `ledger_logs`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the ledger does not exist.
    pub async fn update_ledger(
        &self,
        ledger_id: &str,
        update: &LedgerUpdate,
        changed_by: Option<&str>,
    ) -> Result<Ledger, DatabaseError> {
        let current = self.get_ledger(ledger_id).await?;
        let edit = LoggedEdit {
            entity: LoggedEntity::Ledger,
            table: "ledgers",
            key_col: "ledger_id",
            record_id: ledger_id,
            changed_by,
        };
        self.logged_update(&edit, &current, &update_fields(update)?)
            .await?;
        self.get_ledger(ledger_id).await
    }

    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn count_ledgers(&self) -> Result<i64, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query("SELECT COUNT(*) FROM ledgers", ())
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Distinct non-empty states and cities, sorted.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails.
    pub async fn ledger_filter_options(&self) -> Result<LedgerFilterOptions, DatabaseError> {
        Ok(LedgerFilterOptions {
            states: self.distinct_values("ledgers", "state").await?,
            cities: self.distinct_values("ledgers", "city").await?,
        })
    }

    /// Distinct non-empty values of one TEXT column, sorted.
    pub(crate) async fn distinct_values(
        &self,
        table: &str,
        column: &str,
    ) -> Result<Vec<String>, DatabaseError> {
        let sql = format!(
            "SELECT DISTINCT {column} FROM {table}
             WHERE {column} IS NOT NULL AND trim({column}) != '' ORDER BY {column}"
        );
        let mut rows = self.db().conn().query(&sql, ()).await?;
        let mut values = Vec::new();
        while let Some(row) = rows.next().await? {
            values.push(row.get::<String>(0)?);
        }
        Ok(values)
    }
}
