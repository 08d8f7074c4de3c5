//! Change-log repository.
//!
//! Append-only `*_logs` rows recording every edit of a logged entity.

use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};

use oms_core::change_detail::{ChangeSet, diff_update};
use oms_core::entities::ChangeLog;
use oms_core::enums::LoggedEntity;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::{OmsService, set_fields};

/// Record key as bound in the log table's key column.
fn key_value(entity: LoggedEntity, record_id: &str) -> Result<libsql::Value, DatabaseError> {
    match entity {
        LoggedEntity::Ledger => Ok(libsql::Value::Text(record_id.to_string())),
        _ => record_id
            .parse::<i64>()
            .map(libsql::Value::Integer)
            .map_err(|_| DatabaseError::InvalidState(format!("non-numeric id '{record_id}'"))),
    }
}

/// Diff `fields` against `current` and keep only the fields that change.
///
/// # Errors
///
/// Returns `DatabaseError::Other` if `current` cannot be serialized.
pub fn changed_fields<T: Serialize>(
    current: &T,
    fields: &Map<String, Value>,
) -> Result<(ChangeSet, Map<String, Value>), DatabaseError> {
    let before = serde_json::to_value(current)?;
    let changes = diff_update(&before, &Value::Object(fields.clone()));
    let kept = fields
        .iter()
        .filter(|(key, _)| changes.contains_key(*key))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    Ok((changes, kept))
}

/// Append one log row on `conn`. The caller holds the write lock.
async fn insert_change_log(
    conn: &libsql::Connection,
    entity: LoggedEntity,
    record_id: &str,
    changed_by: Option<&str>,
    changes: &ChangeSet,
) -> Result<(), DatabaseError> {
    let (table, key_col) = entity.log_table();
    let sql = format!(
        "INSERT INTO {table} ({key_col}, changed_by, changed_at, changes) VALUES (?1, ?2, ?3, ?4)"
    );
    let params: Vec<libsql::Value> = vec![
        key_value(entity, record_id)?,
        changed_by.into(),
        Utc::now().to_rfc3339().into(),
        serde_json::to_string(changes)?.into(),
    ];
    conn.execute(&sql, libsql::params_from_iter(params)).await?;
    tracing::debug!(entity = %entity, record_id, fields = changes.len(), "change logged");
    Ok(())
}

/// UPDATE one record and log it on the same connection.
async fn update_then_log(
    conn: &libsql::Connection,
    edit: &LoggedEdit<'_>,
    fields: &Map<String, Value>,
    changes: &ChangeSet,
) -> Result<(), DatabaseError> {
    let key = key_value(edit.entity, edit.record_id)?;
    if set_fields(conn, edit.table, edit.key_col, key, fields).await? == 0 {
        return Err(DatabaseError::NoResult);
    }
    insert_change_log(conn, edit.entity, edit.record_id, edit.changed_by, changes).await
}

/// Which record a logged edit touches, and who made it.
pub(crate) struct LoggedEdit<'a> {
    pub entity: LoggedEntity,
    pub table: &'a str,
    pub key_col: &'a str,
    pub record_id: &'a str,
    pub changed_by: Option<&'a str>,
}

impl OmsService {
    /// Apply an edit to one logged record.
    ///
    /// Unchanged fields are dropped before the UPDATE; when nothing changes,
    /// no UPDATE runs and no log row is written. Returns the recorded changes.
    pub(crate) async fn logged_update<T: Serialize + Sync>(
        &self,
        edit: &LoggedEdit<'_>,
        current: &T,
        fields: &Map<String, Value>,
    ) -> Result<ChangeSet, DatabaseError> {
        let (changes, kept) = changed_fields(current, fields)?;
        if kept.is_empty() {
            return Ok(changes);
        }
        self.write_logged(edit, &kept, &changes).await?;
        Ok(changes)
    }

    /// Write `fields` and their log row atomically: both land or neither does.
    pub(crate) async fn write_logged(
        &self,
        edit: &LoggedEdit<'_>,
        fields: &Map<String, Value>,
        changes: &ChangeSet,
    ) -> Result<(), DatabaseError> {
        let _write = self.db().write_lock().await;
        let tx = self.db().conn().transaction().await?;
        match update_then_log(&tx, edit, fields, changes).await {
            Ok(()) => Ok(tx.commit().await?),
            Err(error) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(entity = %edit.entity, record_id = edit.record_id, %rollback, "rollback failed");
                }
                Err(error)
            }
        }
    }

    /// Append a change-log row. Empty change sets are not recorded.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the INSERT fails.
    pub async fn append_change_log(
        &self,
        entity: LoggedEntity,
        record_id: &str,
        changed_by: Option<&str>,
        changes: &ChangeSet,
    ) -> Result<(), DatabaseError> {
        if changes.is_empty() {
            return Ok(());
        }
        let _write = self.db().write_lock().await;
        insert_change_log(self.db().conn(), entity, record_id, changed_by, changes).await
    }

    /// Logs of one record, newest first.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row holds invalid JSON.
    pub async fn list_change_logs(
        &self,
        entity: LoggedEntity,
        record_id: &str,
    ) -> Result<Vec<ChangeLog>, DatabaseError> {
        let (table, key_col) = entity.log_table();
        let sql = format!(
            "SELECT id, changed_by, changed_at, changes FROM {table}
             WHERE {key_col} = ?1 ORDER BY id DESC"
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, [key_value(entity, record_id)?])
            .await?;

        let mut logs = Vec::new();
        while let Some(row) = rows.next().await? {
            let changes = match get_opt_string(&row, 3)? {
                Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                    tracing::warn!(%entity, record_id, error = %e, "unreadable change log entry");
                    ChangeSet::new()
                }),
                None => ChangeSet::new(),
            };
            logs.push(ChangeLog {
                id: row.get::<i64>(0)?,
                entity,
                record_id: record_id.to_string(),
                changed_by: get_opt_string(&row, 1)?,
                changed_at: parse_datetime(&row.get::<String>(2)?)?,
                changes,
            });
        }
        Ok(logs)
    }
}
