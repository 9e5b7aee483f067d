use crate::db::db::Db;
use crate::db::executor::statement_error;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use chrono::{Local, NaiveDate};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INSERT_PROJECT: &str = "INSERT INTO proyecto (nombre, descripcion, fecha_inicio, estado) VALUES (?1, ?2, ?3, ?4)";
const SELECT_PROJECTS: &str = "SELECT p.id, p.nombre, p.descripcion, p.fecha_inicio, p.estado,
        (SELECT GROUP_CONCAT(e.nombre, char(31))
            FROM asignacion_proyecto a JOIN empleado e ON e.id = a.empleado_id
            WHERE a.proyecto_id = p.id)
    FROM proyecto p
    ORDER BY p.fecha_inicio DESC, p.nombre";
const SELECT_PROJECT_BY_ID: &str = "SELECT p.id, p.nombre, p.descripcion, p.fecha_inicio, p.estado,
        (SELECT GROUP_CONCAT(e.nombre, char(31))
            FROM asignacion_proyecto a JOIN empleado e ON e.id = a.empleado_id
            WHERE a.proyecto_id = p.id)
    FROM proyecto p
    WHERE p.id = ?1";
const PROJECT_EXISTS: &str = "SELECT 1 FROM proyecto WHERE id = ?1";
const UPDATE_PROJECT: &str = "UPDATE proyecto SET
        nombre = COALESCE(?2, nombre),
        descripcion = CASE WHEN ?3 IS NULL THEN descripcion ELSE NULLIF(TRIM(?3), '') END,
        fecha_inicio = COALESCE(?4, fecha_inicio),
        estado = COALESCE(?5, estado)
    WHERE id = ?1";
const DELETE_PROJECT: &str = "DELETE FROM proyecto WHERE id = ?1";

const MEMBER_SEPARATOR: char = '\u{1f}';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    OnHold,
    Finished,
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::Active,
        ProjectStatus::OnHold,
        ProjectStatus::Finished,
        ProjectStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "activo",
            ProjectStatus::OnHold => "en_pausa",
            ProjectStatus::Finished => "finalizado",
            ProjectStatus::Cancelled => "cancelado",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ProjectStatus::Active => "active",
            ProjectStatus::OnHold => "on hold",
            ProjectStatus::Finished => "finished",
            ProjectStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ProjectStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "activo" | "active" => Ok(ProjectStatus::Active),
            "en_pausa" | "on hold" | "paused" => Ok(ProjectStatus::OnHold),
            "finalizado" | "finished" | "completed" => Ok(ProjectStatus::Finished),
            "cancelado" | "cancelled" => Ok(ProjectStatus::Cancelled),
            other => Err(AppError::Validation(Message::InvalidProjectStatus(other.to_string()))),
        }
    }
}

impl ToSql for ProjectStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for ProjectStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: AppError| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub start_date: NaiveDate,
    pub status: ProjectStatus,
    /// Names of the assigned employees.
    pub members: Vec<String>,
}

impl Project {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let members: Option<String> = row.get(5)?;
        Ok(Project {
            id: row.get(0)?,
            name: row.get(1)?,
            description: row.get(2)?,
            start_date: row.get(3)?,
            status: row.get(4)?,
            members: members
                .map(|m| m.split(MEMBER_SEPARATOR).map(str::to_string).collect())
                .unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
}

/// `None` keeps the stored value. A blank description clears it.
#[derive(Debug, Clone, Default)]
pub struct ProjectChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub status: Option<ProjectStatus>,
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(Message::ProjectNameRequired));
    }
    Ok(name.to_string())
}

pub struct Projects<'a> {
    db: &'a Db,
}

impl<'a> Projects<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    /// New projects always start as [`ProjectStatus::Active`].
    pub fn create(&self, project: NewProject) -> Result<i64, AppError> {
        let name = required_name(&project.name)?;
        let description = project.description.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        let start_date = project.start_date.unwrap_or_else(|| Local::now().date_naive());

        let outcome = self
            .db
            .execute_write(INSERT_PROJECT, params![name, description, start_date, ProjectStatus::Active])?;
        Ok(outcome.last_insert_id)
    }

    pub fn list(&self) -> Result<Vec<Project>, AppError> {
        Ok(self.db.query_many(SELECT_PROJECTS, [], Project::from_row)?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Project>, AppError> {
        Ok(self.db.query_one(SELECT_PROJECT_BY_ID, params![id], Project::from_row)?)
    }

    pub fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.db.query_one(PROJECT_EXISTS, params![id], |_| Ok(()))?.is_some())
    }

    pub fn update(&self, id: i64, changes: ProjectChanges) -> Result<(), AppError> {
        let name = changes.name.as_deref().map(required_name).transpose()?;

        let outcome = self.db.execute_write(
            UPDATE_PROJECT,
            params![id, name, changes.description, changes.start_date, changes.status],
        )?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("project", id));
        }
        Ok(())
    }

    /// Deletes the project. Its assignment links and time entries are removed
    /// by the foreign keys.
    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        let outcome = self.db.execute_write(DELETE_PROJECT, params![id])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("project", id));
        }
        Ok(())
    }
}

pub(crate) fn project_exists_in(conn: &rusqlite::Connection, id: i64) -> Result<bool, AppError> {
    Ok(conn
        .query_row(PROJECT_EXISTS, params![id], |_| Ok(()))
        .optional()
        .map_err(|e| statement_error(PROJECT_EXISTS, e))?
        .is_some())
}
