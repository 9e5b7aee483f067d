//! Query executor.
//!
//! Three explicit operations cover every statement shape the repositories
//! need: [`Db::query_many`], [`Db::query_one`] and [`Db::execute_write`].
//! Each one runs on the calling thread's connection and turns driver errors
//! into [`DbError::Query`], rolling back any open transaction and logging the
//! statement (truncated) on the way out.

use crate::db::db::Db;
use crate::libs::error::{AppError, DbError};
use rusqlite::{Connection, OptionalExtension, Params, Row, Transaction};
use tracing::warn;

/// Longest statement prefix kept in diagnostics.
pub const SQL_DIAGNOSTIC_LEN: usize = 100;

/// Result of an INSERT, UPDATE or DELETE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    pub rows_affected: usize,
    pub last_insert_id: i64,
}

impl WriteOutcome {
    /// Id of the inserted row. Only meaningful for INSERT statements; `None`
    /// when nothing was written (e.g. an ignored duplicate).
    pub fn inserted_id(&self) -> Option<i64> {
        (self.rows_affected > 0).then_some(self.last_insert_id)
    }
}

impl Db {
    /// Runs a read and maps every row. No rows is an empty vector.
    pub fn query_many<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Vec<T>, DbError>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_connection(|conn| {
            let run = || -> rusqlite::Result<Vec<T>> {
                let mut stmt = conn.prepare_cached(sql)?;
                let rows = stmt.query_map(params, map)?;
                rows.collect()
            };
            run().map_err(|e| fail(conn, sql, e))
        })
    }

    /// Runs a read and maps the first row, if any.
    pub fn query_one<T, P, F>(&self, sql: &str, params: P, map: F) -> Result<Option<T>, DbError>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        self.with_connection(|conn| conn.query_row(sql, params, map).optional().map_err(|e| fail(conn, sql, e)))
    }

    /// Runs a single INSERT, UPDATE or DELETE in autocommit mode.
    pub fn execute_write<P>(&self, sql: &str, params: P) -> Result<WriteOutcome, DbError>
    where
        P: Params,
    {
        self.with_connection(|conn| {
            let rows_affected = conn.execute(sql, params).map_err(|e| fail(conn, sql, e))?;
            Ok(WriteOutcome {
                rows_affected,
                last_insert_id: conn.last_insert_rowid(),
            })
        })
    }

    /// Runs several `;`-separated statements, e.g. schema scripts.
    pub fn execute_script(&self, sql: &str) -> Result<(), DbError> {
        self.with_connection(|conn| conn.execute_batch(sql).map_err(|e| fail(conn, sql, e)))
    }

    /// Runs `f` inside a transaction, committing on `Ok` and rolling back on `Err`.
    pub fn transaction<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, AppError>,
    {
        self.with_connection(|conn| {
            let tx = conn.unchecked_transaction().map_err(|e| statement_error("BEGIN", e))?;
            let value = f(&tx)?;
            tx.commit().map_err(|e| statement_error("COMMIT", e))?;
            Ok(value)
        })
    }
}

/// Wraps a driver error for `sql` and logs it. For use inside
/// [`Db::transaction`], where the transaction guard handles the rollback.
pub fn statement_error(sql: &str, source: rusqlite::Error) -> DbError {
    let sql = truncate_sql(sql);
    warn!(query = %sql, error = %source, "statement failed");
    DbError::Query { sql, source }
}

fn fail(conn: &Connection, sql: &str, source: rusqlite::Error) -> DbError {
    if !conn.is_autocommit() {
        if let Err(e) = conn.execute_batch("ROLLBACK") {
            warn!(error = %e, "rollback after failed statement did not succeed");
        }
    }
    statement_error(sql, source)
}

/// Collapses whitespace and keeps at most [`SQL_DIAGNOSTIC_LEN`] characters.
pub fn truncate_sql(sql: &str) -> String {
    let compact = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if compact.chars().count() <= SQL_DIAGNOSTIC_LEN {
        return compact;
    }
    let mut cut: String = compact.chars().take(SQL_DIAGNOSTIC_LEN).collect();
    cut.push_str("...");
    cut
}
