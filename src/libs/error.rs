//! Error taxonomy shared by the storage, authentication and indicator layers.
//!
//! Two levels exist:
//!
//! - [`DbError`] describes failures of the connection provider and the query
//!   executor. `Unavailable` is fatal at startup; `Query` is recoverable.
//! - [`AppError`] is what repositories and services return. It wraps storage
//!   failures and adds the domain outcomes the menus report to the user:
//!   invalid input, missing entities, blocked deletions and failures of the
//!   external indicator service.
//!
//! The command layer converts these into `anyhow::Error` only at the very top;
//! inside the menu loop they are matched and printed with `msg_error!`.

use crate::libs::messages::Message;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by [`crate::db::db::Db`] and its executor.
#[derive(Debug, Error)]
pub enum DbError {
    /// Neither the primary nor the fallback database could be opened.
    #[error("database unavailable at {primary} (fallback: {fallback}): {source}")]
    Unavailable {
        primary: PathBuf,
        fallback: String,
        #[source]
        source: Box<DbError>,
    },

    /// A single open attempt failed.
    #[error("cannot open database {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    /// A statement failed. The transaction, if any, has been rolled back.
    #[error("query failed ({sql}): {source}")]
    Query {
        sql: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// Failures of the external indicator service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error("the indicator service did not answer in time")]
    Timeout,
    #[error("the indicator service is unreachable")]
    Unreachable,
    #[error("indicator or date not found")]
    NotFound,
    #[error("the indicator service answered with HTTP {0}")]
    Status(u16),
    #[error("unexpected response from the indicator service: {0}")]
    Malformed(String),
    #[error("request to the indicator service failed: {0}")]
    Request(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Storage(#[from] DbError),

    #[error("{0}")]
    Validation(Message),

    #[error("{entity} #{id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("{entity} #{id} still has {dependents} dependent record(s)")]
    InUse { entity: &'static str, id: i64, dependents: i64 },

    #[error("{0}")]
    Forbidden(Message),

    #[error(transparent)]
    ExternalService(#[from] ServiceError),

    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl AppError {
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        AppError::NotFound { entity, id }
    }

    /// True for outcomes caused by user input rather than by the environment.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Storage(DbError::Unavailable { .. }))
    }
}
