//! Service layer orchestrating reads, writes, and change logs.
//!
//! `OmsService` wraps `OmsDb` (raw database access). All repo methods are
//! implemented as `impl OmsService` blocks in `repos/`.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::OmsDb;
use crate::error::DatabaseError;
use crate::helpers::json_to_sql;

/// Every logged mutation method follows this protocol:
/// 1. Load the current row
/// 2. Diff the update against it, dropping unchanged fields
/// 3. Execute the UPDATE and append a change-log row in one transaction
/// 4. Re-read the row
pub struct OmsService {
    db: OmsDb,
}

impl OmsService {
    /// Create a new service over a local database file or `":memory:"`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: OmsDb::open_local(db_path).await?,
        })
    }

    /// Create a service over the configured store.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the store cannot be opened.
    pub async fn open(config: &oms_config::DatabaseConfig) -> Result<Self, DatabaseError> {
        Ok(Self {
            db: OmsDb::open(config).await?,
        })
    }

    /// Create from an existing `OmsDb`.
    #[must_use]
    pub const fn from_db(db: OmsDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &OmsDb {
        &self.db
    }

    /// Insert one row from a `column -> value` map and return its rowid.
    ///
    /// The rowid comes back from the INSERT itself (`RETURNING`), never from
    /// the connection, which other requests write through too.
    pub(crate) async fn insert_fields(
        &self,
        table: &str,
        fields: &Map<String, Value>,
    ) -> Result<i64, DatabaseError> {
        let columns: Vec<&str> = fields.keys().map(String::as_str).collect();
        let params: Vec<libsql::Value> = fields.values().map(json_to_sql).collect();
        let sql = format!(
            "INSERT INTO {table} ({}) VALUES ({}) RETURNING rowid",
            columns.join(", "),
            crate::helpers::placeholders(1, columns.len())
        );
        let _write = self.db.write_lock().await;
        let mut rows = self
            .db
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<i64>(0)?)
    }

    /// Apply a dynamic UPDATE of `fields` to the row whose `key_col` equals
    /// `key`, stamping `updated_at`. Returns the number of rows touched.
    pub(crate) async fn apply_update(
        &self,
        table: &str,
        key_col: &str,
        key: libsql::Value,
        fields: &Map<String, Value>,
    ) -> Result<u64, DatabaseError> {
        let _write = self.db.write_lock().await;
        set_fields(self.db.conn(), table, key_col, key, fields).await
    }
}

/// UPDATE `fields` (plus `updated_at`) on `conn`, which may be an open
/// transaction. The caller holds the write lock.
pub(crate) async fn set_fields(
    conn: &libsql::Connection,
    table: &str,
    key_col: &str,
    key: libsql::Value,
    fields: &Map<String, Value>,
) -> Result<u64, DatabaseError> {
    if fields.is_empty() {
        return Ok(0);
    }
    let mut sets = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();
    for (idx, (column, value)) in fields.iter().enumerate() {
        sets.push(format!("{column} = ?{}", idx + 1));
        params.push(json_to_sql(value));
    }
    let idx = params.len() + 1;
    sets.push(format!("updated_at = ?{idx}"));
    params.push(Utc::now().to_rfc3339().into());
    params.push(key);

    let sql = format!(
        "UPDATE {table} SET {} WHERE {key_col} = ?{}",
        sets.join(", "),
        idx + 1
    );
    Ok(conn.execute(&sql, libsql::params_from_iter(params)).await?)
}
