use crate::db::db::Db;
use crate::libs::error::AppError;
use crate::libs::formatter::round_to;
use crate::libs::indicator::IndicatorCode;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

const INSERT_QUERY: &str = "INSERT INTO consulta_indicador (usuario_id, indicador_codigo, fecha_indicador, valor, guardado)
    VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_FOR_USER: &str = "SELECT id, usuario_id, indicador_codigo, fecha_indicador, valor, guardado, fecha_consulta
    FROM consulta_indicador WHERE usuario_id = ?1
    ORDER BY fecha_consulta DESC, id DESC LIMIT ?2";
const STATS_FOR_USER: &str = "SELECT indicador_codigo, COUNT(*), SUM(guardado), AVG(valor)
    FROM consulta_indicador WHERE usuario_id = ?1
    GROUP BY indicador_codigo
    ORDER BY 2 DESC, indicador_codigo";
const MONTHLY_FOR_USER: &str = "SELECT indicador_codigo, COUNT(*), SUM(guardado), AVG(valor)
    FROM consulta_indicador
    WHERE usuario_id = ?1 AND strftime('%Y-%m', fecha_consulta) = ?2
    GROUP BY indicador_codigo
    ORDER BY 2 DESC, indicador_codigo";
const COUNT_TODAY: &str = "SELECT COUNT(*) FROM consulta_indicador WHERE date(fecha_consulta) = date('now')";
const TOP_GLOBAL: &str = "SELECT indicador_codigo, COUNT(*), COUNT(DISTINCT usuario_id)
    FROM consulta_indicador
    GROUP BY indicador_codigo
    ORDER BY 2 DESC, indicador_codigo
    LIMIT ?1";
const DELETE_OLDER_THAN: &str = "DELETE FROM consulta_indicador WHERE fecha_consulta < datetime('now', ?1)";

pub const DEFAULT_LIST_LIMIT: u32 = 50;
pub const DEFAULT_TOP_LIMIT: u32 = 10;
pub const DEFAULT_RETENTION_DAYS: u32 = 180;

/// One audit row: who looked up what, and whether it was kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorQuery {
    pub id: i64,
    pub user_id: i64,
    pub code: IndicatorCode,
    pub date: NaiveDate,
    pub value: f64,
    pub saved: bool,
    pub queried_at: String,
}

impl IndicatorQuery {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(IndicatorQuery {
            id: row.get(0)?,
            user_id: row.get(1)?,
            code: row.get(2)?,
            date: row.get(3)?,
            value: row.get(4)?,
            saved: row.get(5)?,
            queried_at: row.get(6)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeUsage {
    pub code: IndicatorCode,
    pub queries: i64,
    pub saved: i64,
    pub average_value: f64,
}

impl CodeUsage {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let average: Option<f64> = row.get(3)?;
        Ok(CodeUsage {
            code: row.get(0)?,
            queries: row.get(1)?,
            saved: row.get::<_, Option<i64>>(2)?.unwrap_or(0),
            average_value: round_to(average.unwrap_or(0.0), 4),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Popularity {
    pub code: IndicatorCode,
    pub queries: i64,
    pub users: i64,
}

/// Append-only log of indicator lookups.
pub struct IndicatorQueries<'a> {
    db: &'a Db,
}

impl<'a> IndicatorQueries<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn record(
        &self,
        user_id: i64,
        code: IndicatorCode,
        date: NaiveDate,
        value: f64,
        saved: bool,
    ) -> Result<i64, AppError> {
        let outcome = self
            .db
            .execute_write(INSERT_QUERY, params![user_id, code, date, round_to(value, 4), saved])?;
        Ok(outcome.last_insert_id)
    }

    /// Most recent first.
    pub fn list_for_user(&self, user_id: i64, limit: u32) -> Result<Vec<IndicatorQuery>, AppError> {
        Ok(self.db.query_many(SELECT_FOR_USER, params![user_id, limit], IndicatorQuery::from_row)?)
    }

    pub fn stats_for_user(&self, user_id: i64) -> Result<Vec<CodeUsage>, AppError> {
        Ok(self.db.query_many(STATS_FOR_USER, params![user_id], CodeUsage::from_row)?)
    }

    /// Usage per code during one calendar month.
    pub fn monthly_summary(&self, user_id: i64, year: i32, month: u32) -> Result<Vec<CodeUsage>, AppError> {
        let period = format!("{:04}-{:02}", year, month);
        Ok(self.db.query_many(MONTHLY_FOR_USER, params![user_id, period], CodeUsage::from_row)?)
    }

    pub fn total_today(&self) -> Result<i64, AppError> {
        Ok(self.db.query_one(COUNT_TODAY, [], |row| row.get(0))?.unwrap_or(0))
    }

    pub fn top_global(&self, limit: u32) -> Result<Vec<Popularity>, AppError> {
        Ok(self.db.query_many(TOP_GLOBAL, params![limit], |row| {
            Ok(Popularity {
                code: row.get(0)?,
                queries: row.get(1)?,
                users: row.get(2)?,
            })
        })?)
    }

    pub fn purge_older_than(&self, days: u32) -> Result<usize, AppError> {
        Ok(self
            .db
            .execute_write(DELETE_OLDER_THAN, params![format!("-{} days", days)])?
            .rows_affected)
    }
}
