//! Clients for external services.
//!
//! Only one today: [`mindicador`], the public Chilean economic indicator
//! API. The client never touches storage; recording what was looked up is
//! the job of [`crate::libs::indicator::IndicatorService`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use ecotech::api::{IndicatorApiConfig, IndicatorClient};
//! use ecotech::libs::indicator::IndicatorCode;
//!
//! # async fn run() -> Result<(), ecotech::libs::error::AppError> {
//! let client = IndicatorClient::new(&IndicatorApiConfig::default())?;
//! if let Some(reading) = client.fetch(IndicatorCode::Uf, None).await? {
//!     println!("{} {} {}", reading.code, reading.date, reading.value);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mindicador;

pub use mindicador::{IndicatorApiConfig, IndicatorClient};
