use crate::db::db::Db;
use crate::libs::error::AppError;
use crate::libs::formatter::round_to;
use crate::libs::indicator::{IndicatorCode, DEFAULT_SOURCE};
use crate::libs::messages::Message;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

const UPSERT_INDICATOR: &str = "INSERT INTO indicador_economico (codigo, nombre, fecha, valor, fuente)
    VALUES (?1, ?2, ?3, ?4, ?5)
    ON CONFLICT (codigo, fecha) DO UPDATE SET
        nombre = excluded.nombre,
        valor = excluded.valor,
        fuente = excluded.fuente,
        registrado_en = CURRENT_TIMESTAMP";
const SELECT_INDICATOR: &str = "SELECT id, codigo, nombre, fecha, valor, fuente, registrado_en
    FROM indicador_economico WHERE codigo = ?1 AND fecha = ?2";
const SELECT_LATEST: &str = "SELECT id, codigo, nombre, fecha, valor, fuente, registrado_en
    FROM indicador_economico WHERE codigo = ?1
    ORDER BY fecha DESC LIMIT 1";
const SELECT_HISTORY: &str = "SELECT id, codigo, nombre, fecha, valor, fuente, registrado_en
    FROM indicador_economico WHERE codigo = ?1
    ORDER BY fecha DESC LIMIT ?2";
const SELECT_LATEST_PER_CODE: &str = "SELECT i.id, i.codigo, i.nombre, i.fecha, i.valor, i.fuente, i.registrado_en
    FROM indicador_economico i
    JOIN (SELECT codigo, MAX(fecha) AS fecha FROM indicador_economico GROUP BY codigo) latest
        ON latest.codigo = i.codigo AND latest.fecha = i.fecha
    ORDER BY i.codigo";
const DELETE_OLDER_THAN: &str = "DELETE FROM indicador_economico WHERE fecha < date('now', ?1)";
const SELECT_STATS: &str = "SELECT COUNT(*), COUNT(DISTINCT codigo), MAX(registrado_en) FROM indicador_economico";

pub const DEFAULT_HISTORY_LIMIT: u32 = 30;
/// Two years.
pub const DEFAULT_RETENTION_DAYS: u32 = 730;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicIndicator {
    pub id: i64,
    pub code: IndicatorCode,
    pub name: String,
    pub date: NaiveDate,
    pub value: f64,
    pub source: String,
    pub registered_at: Option<String>,
}

impl EconomicIndicator {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(EconomicIndicator {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            date: row.get(3)?,
            value: row.get(4)?,
            source: row.get(5)?,
            registered_at: row.get(6)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndicatorStats {
    pub total: i64,
    pub distinct_codes: i64,
    pub last_update: Option<String>,
}

/// Persisted snapshots, one per code and date.
pub struct EconomicIndicators<'a> {
    db: &'a Db,
}

impl<'a> EconomicIndicators<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Stores the value rounded to 4 decimals. Saving the same code and date
    /// again overwrites the value and refreshes the registration time.
    pub fn save(&self, code: IndicatorCode, date: NaiveDate, value: f64, source: Option<&str>) -> Result<(), AppError> {
        if !value.is_finite() {
            return Err(AppError::Validation(Message::InvalidIndicatorValue(value)));
        }

        let source = source.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_SOURCE);
        self.db.execute_write(
            UPSERT_INDICATOR,
            params![code, code.official_name(), date, round_to(value, 4), source],
        )?;
        Ok(())
    }

    pub fn get(&self, code: IndicatorCode, date: NaiveDate) -> Result<Option<EconomicIndicator>, AppError> {
        Ok(self.db.query_one(SELECT_INDICATOR, params![code, date], EconomicIndicator::from_row)?)
    }

    pub fn latest(&self, code: IndicatorCode) -> Result<Option<EconomicIndicator>, AppError> {
        Ok(self.db.query_one(SELECT_LATEST, params![code], EconomicIndicator::from_row)?)
    }

    /// Newest first.
    pub fn history(&self, code: IndicatorCode, limit: u32) -> Result<Vec<EconomicIndicator>, AppError> {
        Ok(self.db.query_many(SELECT_HISTORY, params![code, limit], EconomicIndicator::from_row)?)
    }

    pub fn latest_per_code(&self) -> Result<Vec<EconomicIndicator>, AppError> {
        Ok(self.db.query_many(SELECT_LATEST_PER_CODE, [], EconomicIndicator::from_row)?)
    }

    /// Deletes values dated more than `days` ago. Returns how many went.
    pub fn purge_older_than(&self, days: u32) -> Result<usize, AppError> {
        Ok(self
            .db
            .execute_write(DELETE_OLDER_THAN, params![format!("-{} days", days)])?
            .rows_affected)
    }

    pub fn stats(&self) -> Result<IndicatorStats, AppError> {
        let stats = self.db.query_one(SELECT_STATS, [], |row| {
            Ok(IndicatorStats {
                total: row.get(0)?,
                distinct_codes: row.get(1)?,
                last_update: row.get(2)?,
            })
        })?;
        Ok(stats.unwrap_or_default())
    }
}
