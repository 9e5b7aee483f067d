//! # EcoTech - staff, projects and economic indicators
//!
//! A terminal application for a small company: employees, departments and
//! projects, hours worked per project, and lookups of Chilean economic
//! indicators (UF, dollar, UTM...) from the public mindicador.cl service.
//!
//! ## Layout
//!
//! - [`db`]: SQLite storage, one repository per table
//! - [`api`]: the indicator HTTP client
//! - [`libs`]: authentication, configuration, errors, formatting, messages
//! - [`commands`]: the CLI and the role-gated interactive menus
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ecotech::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod api;
pub mod commands;
pub mod db;
pub mod libs;
