//! Database layer.
//!
//! A single SQLite file holds everything. [`db::Db`] resolves the file
//! (primary path or fallback) once, hands out one connection per thread and
//! wraps every statement through the helpers in [`executor`]. Each table has
//! a small repository struct borrowing the `Db`.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ecotech::db::db::{DatabaseConfig, Db};
//! use ecotech::db::employees::{Employees, NewEmployee};
//! use ecotech::db::schema;
//!
//! # fn run() -> anyhow::Result<()> {
//! let db = Db::open(DatabaseConfig::default())?;
//! schema::initialize(&db)?;
//!
//! let id = Employees::new(&db).create(NewEmployee::new("Ana Pérez", "ana@ecotech.cl"))?;
//! println!("created employee {}", id);
//! # Ok(())
//! # }
//! ```

/// Connection provider and primary/fallback resolution.
pub mod db;

/// Statement execution, transactions and failure logging.
pub mod executor;

/// Table definitions and seed accounts.
pub mod schema;

pub mod users;

pub mod employees;

pub mod departments;

/// Projects and their lifecycle status.
pub mod projects;

/// Employee to project membership.
pub mod assignments;

/// Hours worked per employee and project, plus the aggregates for reports.
pub mod time_entries;

/// Saved indicator values, one per code and date.
pub mod indicators;

/// Audit log of every indicator lookup.
pub mod indicator_queries;
