//! Economic indicators: the known codes, a fetched reading and the lookup flow.
//!
//! A lookup goes through [`IndicatorService::consult`]:
//!
//! 1. the code is validated before anything touches the network,
//! 2. [`IndicatorClient::fetch`] asks the API for the value,
//! 3. the caller decides whether to keep the value (upsert into
//!    `indicador_economico`),
//! 4. one row is appended to `consulta_indicador` whatever the decision.
//!
//! An empty answer from the API is `Ok(None)` and leaves no audit row.

use crate::api::mindicador::IndicatorClient;
use crate::db::db::Db;
use crate::db::indicator_queries::IndicatorQueries;
use crate::db::indicators::EconomicIndicators;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Source recorded with every persisted value.
pub const DEFAULT_SOURCE: &str = "https://mindicador.cl";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorCode {
    Uf,
    Ivp,
    Dolar,
    Euro,
    Ipc,
    Utm,
    Bitcoin,
}

impl IndicatorCode {
    pub const ALL: [IndicatorCode; 7] = [
        IndicatorCode::Uf,
        IndicatorCode::Ivp,
        IndicatorCode::Dolar,
        IndicatorCode::Euro,
        IndicatorCode::Ipc,
        IndicatorCode::Utm,
        IndicatorCode::Bitcoin,
    ];

    /// Code used in the API path and the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorCode::Uf => "uf",
            IndicatorCode::Ivp => "ivp",
            IndicatorCode::Dolar => "dolar",
            IndicatorCode::Euro => "euro",
            IndicatorCode::Ipc => "ipc",
            IndicatorCode::Utm => "utm",
            IndicatorCode::Bitcoin => "bitcoin",
        }
    }

    pub fn official_name(&self) -> &'static str {
        match self {
            IndicatorCode::Uf => "Unidad de Fomento (UF)",
            IndicatorCode::Ivp => "Índice de Valor Promedio (IVP)",
            IndicatorCode::Dolar => "Dólar Observado",
            IndicatorCode::Euro => "Euro",
            IndicatorCode::Ipc => "Índice de Precios al Consumidor (IPC)",
            IndicatorCode::Utm => "Unidad Tributaria Mensual (UTM)",
            IndicatorCode::Bitcoin => "Bitcoin",
        }
    }
}

impl fmt::Display for IndicatorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for IndicatorCode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_lowercase();
        IndicatorCode::ALL
            .into_iter()
            .find(|known| known.as_str() == code)
            .ok_or_else(|| AppError::Validation(Message::UnknownIndicator(code)))
    }
}

impl ToSql for IndicatorCode {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for IndicatorCode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: AppError| FromSqlError::Other(Box::new(e)))
    }
}

/// One value as published by the indicator service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub code: IndicatorCode,
    pub date: NaiveDate,
    pub value: f64,
}

impl IndicatorReading {
    pub fn name(&self) -> &'static str {
        self.code.official_name()
    }
}

/// Outcome of a lookup that produced a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Consultation {
    pub reading: IndicatorReading,
    /// Whether the value was stored in `indicador_economico`.
    pub saved: bool,
    pub audit_id: i64,
}

pub struct IndicatorService<'a> {
    db: &'a Db,
    client: &'a IndicatorClient,
}

impl<'a> IndicatorService<'a> {
    pub fn new(db: &'a Db, client: &'a IndicatorClient) -> Self {
        Self { db, client }
    }

    /// Looks up `code` (today when `date` is `None`), lets `persist` decide
    /// whether to keep the value and writes exactly one audit row.
    pub async fn consult<F>(
        &self,
        user_id: i64,
        code: &str,
        date: Option<NaiveDate>,
        persist: F,
    ) -> Result<Option<Consultation>, AppError>
    where
        F: FnOnce(&IndicatorReading) -> bool,
    {
        let code: IndicatorCode = code.parse()?;
        let Some(reading) = self.client.fetch(code, date).await? else {
            return Ok(None);
        };

        let saved = if persist(&reading) {
            match EconomicIndicators::new(self.db).save(reading.code, reading.date, reading.value, None) {
                Ok(()) => true,
                Err(e) => {
                    warn!(code = %reading.code, date = %reading.date, error = %e, "saving indicator failed");
                    false
                }
            }
        } else {
            false
        };

        let audit_id = IndicatorQueries::new(self.db).record(user_id, reading.code, reading.date, reading.value, saved)?;

        Ok(Some(Consultation {
            reading,
            saved,
            audit_id,
        }))
    }
}
