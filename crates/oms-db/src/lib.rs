//! # oms-db
//!
//! libSQL store for the OMS: schema migrations, row parsing, and one
//! repository module per table. All repositories are `impl OmsService`
//! blocks; page handlers only ever talk to [`service::OmsService`].
//!
//! A local file (or `:memory:`) serves development and tests; production
//! points at a hosted Turso database.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle.
///
/// Wraps a libSQL database and connection and provides ID generation.
///
/// The one connection is shared by every request. Writes hold
/// [`Self::write_lock`] so a transaction never picks up another request's
/// statements.
pub struct OmsDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
    writes: tokio::sync::Mutex<()>,
    remote: bool,
}

impl OmsDb {
    /// Open a local database file (or `":memory:"`).
    ///
    /// Runs migrations on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let oms_db = Self {
            db,
            conn,
            writes: tokio::sync::Mutex::new(()),
            remote: false,
        };
        oms_db.run_migrations().await?;
        Ok(oms_db)
    }

    /// Open a hosted Turso database.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the connection cannot be established or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        let conn = db.connect()?;
        let oms_db = Self {
            db,
            conn,
            writes: tokio::sync::Mutex::new(()),
            remote: true,
        };
        oms_db.run_migrations().await?;
        Ok(oms_db)
    }

    /// Open whichever store the configuration names.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open_local`] / [`Self::open_remote`].
    pub async fn open(config: &oms_config::DatabaseConfig) -> Result<Self, DatabaseError> {
        if config.is_remote() {
            tracing::info!(url = %config.url, "opening remote store");
            Self::open_remote(&config.url, &config.auth_token).await
        } else {
            tracing::info!(path = %config.local_path, "opening local store");
            Self::open_local(&config.local_path).await
        }
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Serialize a write (or a write transaction) on the shared connection.
    pub(crate) async fn write_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.writes.lock().await
    }

    /// Returns whether this handle points at a hosted database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }

    /// Generate a prefixed ID via libSQL. Returns e.g., `"LED-a3f8b2c1"`.
    ///
    /// Uses `randomblob(4)` in SQL to produce 8-char hex, then prepends the prefix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn generate_id(&self, prefix: &str) -> Result<String, DatabaseError> {
        let mut rows = self
            .conn
            .query("SELECT ?1 || '-' || lower(hex(randomblob(4)))", [prefix])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }
}
