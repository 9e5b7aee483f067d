//! Connection provider.
//!
//! [`Db`] resolves its target once, when it is opened: the primary path is
//! tried first and, if it cannot be opened, the fallback path exactly once.
//! The resolved path is kept on the `Db` and never written back to the
//! configuration it came from.
//!
//! Every calling thread gets its own SQLite connection. Handles are created
//! lazily, checked with a cheap ping on each checkout and re-opened when the
//! ping fails. There is no pooling beyond one handle per thread.

use crate::libs::data_storage::DataStorage;
use crate::libs::error::DbError;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread::{self, ThreadId};
use std::time::Duration;
use tracing::{debug, warn};

pub const DB_FILE_NAME: &str = "ecotech.db";
/// Relative to the working directory the application was started from.
pub const FALLBACK_DB_PATH: &str = "ecotech.db";
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5000;

const PING: &str = "PRAGMA schema_version";

fn default_busy_timeout() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

/// Where the database lives. Plain data, passed by value into [`Db::open`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_path: Option<PathBuf>,
    #[serde(default = "default_busy_timeout")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            path: DataStorage::new().base_path().join(DB_FILE_NAME),
            fallback_path: Some(PathBuf::from(FALLBACK_DB_PATH)),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DatabaseConfig {
    /// A config pointing at `path` with no fallback.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        DatabaseConfig {
            path: path.into(),
            fallback_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn with_fallback(mut self, fallback: impl Into<PathBuf>) -> Self {
        self.fallback_path = Some(fallback.into());
        self
    }
}

pub struct Db {
    config: DatabaseConfig,
    resolved: PathBuf,
    /// Entries are removed only by `close_connection`. A thread that exits
    /// without calling it keeps its handle open until the `Db` is dropped.
    connections: Mutex<HashMap<ThreadId, Connection>>,
}

impl Db {
    /// Opens the database, falling back once to `fallback_path`.
    ///
    /// The connection opened here becomes the calling thread's handle.
    /// Fails with [`DbError::Unavailable`] when neither target can be opened.
    pub fn open(config: DatabaseConfig) -> Result<Db, DbError> {
        let timeout = config.busy_timeout_ms;

        let (resolved, conn) = match open_connection(&config.path, timeout) {
            Ok(conn) => (config.path.clone(), conn),
            Err(primary_error) => {
                let Some(fallback) = config.fallback_path.clone() else {
                    return Err(DbError::Unavailable {
                        primary: config.path.clone(),
                        fallback: "none".to_string(),
                        source: Box::new(primary_error),
                    });
                };

                warn!(
                    primary = %config.path.display(),
                    fallback = %fallback.display(),
                    error = %primary_error,
                    "primary database unavailable, trying fallback"
                );

                match open_connection(&fallback, timeout) {
                    Ok(conn) => (fallback, conn),
                    Err(fallback_error) => {
                        return Err(DbError::Unavailable {
                            primary: config.path.clone(),
                            fallback: fallback.display().to_string(),
                            source: Box::new(fallback_error),
                        })
                    }
                }
            }
        };

        debug!(path = %resolved.display(), "database opened");

        let mut connections = HashMap::new();
        connections.insert(thread::current().id(), conn);

        Ok(Db {
            config,
            resolved,
            connections: Mutex::new(connections),
        })
    }

    /// The path actually in use, primary or fallback.
    pub fn resolved_path(&self) -> &Path {
        &self.resolved
    }

    pub fn used_fallback(&self) -> bool {
        self.resolved != self.config.path
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Number of threads currently holding a connection.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Releases the calling thread's connection. Returns whether one was open.
    ///
    /// Worker threads call this before they finish.
    pub fn close_connection(&self) -> bool {
        let Some(conn) = self.connections.lock().remove(&thread::current().id()) else {
            return false;
        };

        if let Err((_, e)) = conn.close() {
            warn!(error = %e, "closing database connection failed");
        }
        true
    }

    /// Runs `f` with the calling thread's connection, opening or re-opening it
    /// as needed.
    ///
    /// The handle is checked out of the map for the duration of `f`; calls
    /// must not nest on the same thread.
    pub(crate) fn with_connection<T, E, F>(&self, f: F) -> Result<T, E>
    where
        E: From<DbError>,
        F: FnOnce(&Connection) -> Result<T, E>,
    {
        let id = thread::current().id();
        let existing = self.connections.lock().remove(&id);

        let conn = match existing {
            Some(conn) if is_alive(&conn) => conn,
            Some(_) => {
                debug!(path = %self.resolved.display(), "stale connection, reconnecting");
                open_connection(&self.resolved, self.config.busy_timeout_ms)?
            }
            None => {
                debug!(path = %self.resolved.display(), "opening connection for thread");
                open_connection(&self.resolved, self.config.busy_timeout_ms)?
            }
        };

        let result = f(&conn);
        self.connections.lock().insert(id, conn);
        result
    }
}

fn is_alive(conn: &Connection) -> bool {
    conn.query_row(PING, [], |row| row.get::<_, i64>(0)).is_ok()
}

fn open_connection(path: &Path, busy_timeout_ms: u64) -> Result<Connection, DbError> {
    let open_error = |reason: String| DbError::Open {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| open_error(e.to_string()))?;
        }
    }

    let conn = Connection::open(path).map_err(|e| open_error(e.to_string()))?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))
        .map_err(|e| open_error(e.to_string()))?;
    conn.execute_batch("PRAGMA foreign_keys = ON")
        .map_err(|e| open_error(e.to_string()))?;

    // Opening is lazy in SQLite; touch the file so a bad target fails here.
    conn.query_row(PING, [], |row| row.get::<_, i64>(0))
        .map_err(|e| open_error(e.to_string()))?;

    Ok(conn)
}
