use crate::db::db::Db;
use crate::db::employees::employee_exists_in;
use crate::db::executor::statement_error;
use crate::db::projects::project_exists_in;
use crate::libs::error::AppError;
use crate::libs::formatter::round_to;
use crate::libs::messages::Message;
use chrono::NaiveDate;
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};

const INSERT_TIME_ENTRY: &str = "INSERT INTO registro_tiempo (empleado_id, proyecto_id, fecha, horas, descripcion)
    VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_FOR_EMPLOYEE: &str = "SELECT r.id, r.empleado_id, r.proyecto_id, p.nombre, r.fecha, r.horas, r.descripcion
    FROM registro_tiempo r
    JOIN proyecto p ON p.id = r.proyecto_id
    WHERE r.empleado_id = ?1
      AND (?2 IS NULL OR r.fecha >= ?2)
      AND (?3 IS NULL OR r.fecha <= ?3)
    ORDER BY r.fecha DESC, r.id DESC";
const TOTAL_FOR_EMPLOYEE: &str = "SELECT COALESCE(SUM(horas), 0) FROM registro_tiempo
    WHERE empleado_id = ?1
      AND (?2 IS NULL OR fecha >= ?2)
      AND (?3 IS NULL OR fecha <= ?3)";
const HOURS_BY_EMPLOYEE: &str = "SELECT e.id, e.nombre, COALESCE(SUM(r.horas), 0), COUNT(r.id)
    FROM empleado e
    LEFT JOIN registro_tiempo r ON r.empleado_id = e.id
    GROUP BY e.id, e.nombre
    ORDER BY 3 DESC, e.nombre";
const HOURS_BY_PROJECT: &str = "SELECT p.id, p.nombre, COALESCE(SUM(r.horas), 0), COUNT(DISTINCT r.empleado_id)
    FROM proyecto p
    LEFT JOIN registro_tiempo r ON r.proyecto_id = p.id
    GROUP BY p.id, p.nombre
    ORDER BY 3 DESC, p.nombre";
const GLOBAL_STATS: &str = "SELECT COUNT(DISTINCT empleado_id), COUNT(DISTINCT proyecto_id),
        COALESCE(SUM(horas), 0), MIN(fecha), MAX(fecha), COUNT(*)
    FROM registro_tiempo";

pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;
/// Divisor of the monthly average in the hours-per-employee report.
pub const WORKING_DAYS_PER_MONTH: f64 = 20.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: i64,
    pub employee_id: i64,
    pub project_id: i64,
    pub project_name: String,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: Option<String>,
}

impl TimeEntry {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(TimeEntry {
            id: row.get(0)?,
            employee_id: row.get(1)?,
            project_id: row.get(2)?,
            project_name: row.get(3)?,
            date: row.get(4)?,
            hours: row.get(5)?,
            description: row.get(6)?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub employee_id: i64,
    pub project_id: i64,
    pub date: NaiveDate,
    pub hours: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeHours {
    pub employee_id: i64,
    pub name: String,
    pub total_hours: f64,
    pub entries: i64,
}

impl EmployeeHours {
    pub fn daily_average(&self) -> f64 {
        round_to(self.total_hours / WORKING_DAYS_PER_MONTH, 2)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectHours {
    pub project_id: i64,
    pub name: String,
    pub total_hours: f64,
    pub employees: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TimeStats {
    pub employees: i64,
    pub projects: i64,
    pub entries: i64,
    pub total_hours: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub average_per_employee: f64,
}

/// Accepts hours in `(0, 24]`, then rounds them to hundredths.
pub fn validate_hours(hours: f64) -> Result<f64, AppError> {
    if !(hours > 0.0 && hours <= MAX_HOURS_PER_ENTRY) {
        return Err(AppError::Validation(Message::InvalidHours(hours)));
    }

    let rounded = round_to(hours, 2);
    if rounded <= 0.0 {
        return Err(AppError::Validation(Message::HoursBelowPrecision(hours)));
    }
    Ok(rounded)
}

pub struct TimeEntries<'a> {
    db: &'a Db,
}

impl<'a> TimeEntries<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// Records worked hours. The employee and the project must both exist.
    pub fn record(&self, entry: NewTimeEntry) -> Result<i64, AppError> {
        let hours = validate_hours(entry.hours)?;
        let description = entry.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());

        self.db.transaction(|tx| {
            if !employee_exists_in(tx, entry.employee_id)? {
                return Err(AppError::not_found("employee", entry.employee_id));
            }
            if !project_exists_in(tx, entry.project_id)? {
                return Err(AppError::not_found("project", entry.project_id));
            }

            tx.execute(
                INSERT_TIME_ENTRY,
                params![entry.employee_id, entry.project_id, entry.date, hours, description],
            )
            .map_err(|e| statement_error(INSERT_TIME_ENTRY, e))?;
            Ok(tx.last_insert_rowid())
        })
    }

    /// Newest first. Both range ends are inclusive and optional.
    pub fn list_for_employee(
        &self,
        employee_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<TimeEntry>, AppError> {
        Ok(self
            .db
            .query_many(SELECT_FOR_EMPLOYEE, params![employee_id, from, to], TimeEntry::from_row)?)
    }

    pub fn total_hours_for_employee(
        &self,
        employee_id: i64,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<f64, AppError> {
        let total: Option<f64> = self
            .db
            .query_one(TOTAL_FOR_EMPLOYEE, params![employee_id, from, to], |row| row.get(0))?;
        Ok(round_to(total.unwrap_or(0.0), 2))
    }

    pub fn hours_by_employee(&self) -> Result<Vec<EmployeeHours>, AppError> {
        Ok(self.db.query_many(HOURS_BY_EMPLOYEE, [], |row| {
            Ok(EmployeeHours {
                employee_id: row.get(0)?,
                name: row.get(1)?,
                total_hours: row.get(2)?,
                entries: row.get(3)?,
            })
        })?)
    }

    pub fn hours_by_project(&self) -> Result<Vec<ProjectHours>, AppError> {
        Ok(self.db.query_many(HOURS_BY_PROJECT, [], |row| {
            Ok(ProjectHours {
                project_id: row.get(0)?,
                name: row.get(1)?,
                total_hours: row.get(2)?,
                employees: row.get(3)?,
            })
        })?)
    }

    pub fn global_stats(&self) -> Result<TimeStats, AppError> {
        let stats = self.db.query_one(GLOBAL_STATS, [], |row| {
            Ok(TimeStats {
                employees: row.get(0)?,
                projects: row.get(1)?,
                total_hours: row.get(2)?,
                first_date: row.get(3)?,
                last_date: row.get(4)?,
                entries: row.get(5)?,
                average_per_employee: 0.0,
            })
        })?;

        let mut stats = stats.unwrap_or_default();
        stats.total_hours = round_to(stats.total_hours, 2);
        if stats.employees > 0 {
            stats.average_per_employee = round_to(stats.total_hours / stats.employees as f64, 2);
        }
        Ok(stats)
    }
}
