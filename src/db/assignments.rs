//! Employee ↔ project membership.
//!
//! Links live in `asignacion_proyecto` with a composite primary key, so a
//! pair can exist at most once. [`Assignments::assign`] checks both ends and
//! inserts in one transaction and reports which of the three things happened.
//!
//! Deleting an employee or a project removes its links through
//! `ON DELETE CASCADE`; the `cascade_clear_*` operations here are for removing all
//! memberships while keeping the entity.

use crate::db::db::Db;
use crate::db::employees::{employee_exists_in, Employee};
use crate::db::executor::statement_error;
use crate::db::projects::{project_exists_in, Project};
use crate::libs::error::AppError;
use rusqlite::params;
use std::fmt;

const INSERT_LINK: &str = "INSERT OR IGNORE INTO asignacion_proyecto (empleado_id, proyecto_id) VALUES (?1, ?2)";
const DELETE_LINK: &str = "DELETE FROM asignacion_proyecto WHERE empleado_id = ?1 AND proyecto_id = ?2";
const LINK_EXISTS: &str = "SELECT 1 FROM asignacion_proyecto WHERE empleado_id = ?1 AND proyecto_id = ?2";
const SELECT_PROJECTS_OF_EMPLOYEE: &str = "SELECT p.id, p.nombre, p.descripcion, p.fecha_inicio, p.estado, NULL
    FROM asignacion_proyecto a
    JOIN proyecto p ON p.id = a.proyecto_id
    WHERE a.empleado_id = ?1
    ORDER BY p.nombre";
const SELECT_EMPLOYEES_OF_PROJECT: &str = "SELECT e.id, e.nombre, e.direccion, e.telefono, e.email, e.fecha_contratacion,
        e.salario, e.departamento_id, d.nombre, e.usuario_id
    FROM asignacion_proyecto a
    JOIN empleado e ON e.id = a.empleado_id
    LEFT JOIN departamento d ON d.id = e.departamento_id
    WHERE a.proyecto_id = ?1
    ORDER BY e.nombre";
const COUNT_FOR_PROJECT: &str = "SELECT COUNT(*) FROM asignacion_proyecto WHERE proyecto_id = ?1";
const COUNT_FOR_EMPLOYEE: &str = "SELECT COUNT(*) FROM asignacion_proyecto WHERE empleado_id = ?1";
const CLEAR_FOR_PROJECT: &str = "DELETE FROM asignacion_proyecto WHERE proyecto_id = ?1";
const CLEAR_FOR_EMPLOYEE: &str = "DELETE FROM asignacion_proyecto WHERE empleado_id = ?1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    EmployeeMissing(i64),
    ProjectMissing(i64),
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::EmployeeMissing(id) => write!(f, "employee #{} does not exist", id),
            RejectReason::ProjectMissing(id) => write!(f, "project #{} does not exist", id),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOutcome {
    Created,
    AlreadyExists,
    /// Nothing was written.
    Rejected(RejectReason),
}

pub struct Assignments<'a> {
    db: &'a Db,
}

impl<'a> Assignments<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn assign(&self, employee_id: i64, project_id: i64) -> Result<AssignOutcome, AppError> {
        self.db.transaction(|tx| {
            if !employee_exists_in(tx, employee_id)? {
                return Ok(AssignOutcome::Rejected(RejectReason::EmployeeMissing(employee_id)));
            }
            if !project_exists_in(tx, project_id)? {
                return Ok(AssignOutcome::Rejected(RejectReason::ProjectMissing(project_id)));
            }

            let inserted = tx
                .execute(INSERT_LINK, params![employee_id, project_id])
                .map_err(|e| statement_error(INSERT_LINK, e))?;

            Ok(if inserted > 0 {
                AssignOutcome::Created
            } else {
                AssignOutcome::AlreadyExists
            })
        })
    }

    /// Removes one link. Returns whether it existed.
    pub fn unassign(&self, employee_id: i64, project_id: i64) -> Result<bool, AppError> {
        let outcome = self.db.execute_write(DELETE_LINK, params![employee_id, project_id])?;
        Ok(outcome.rows_affected > 0)
    }

    pub fn is_assigned(&self, employee_id: i64, project_id: i64) -> Result<bool, AppError> {
        Ok(self
            .db
            .query_one(LINK_EXISTS, params![employee_id, project_id], |_| Ok(()))?
            .is_some())
    }

    pub fn projects_of_employee(&self, employee_id: i64) -> Result<Vec<Project>, AppError> {
        Ok(self
            .db
            .query_many(SELECT_PROJECTS_OF_EMPLOYEE, params![employee_id], Project::from_row)?)
    }

    pub fn employees_of_project(&self, project_id: i64) -> Result<Vec<Employee>, AppError> {
        Ok(self
            .db
            .query_many(SELECT_EMPLOYEES_OF_PROJECT, params![project_id], Employee::from_row)?)
    }

    pub fn count_for_project(&self, project_id: i64) -> Result<i64, AppError> {
        Ok(self
            .db
            .query_one(COUNT_FOR_PROJECT, params![project_id], |row| row.get(0))?
            .unwrap_or(0))
    }

    pub fn count_for_employee(&self, employee_id: i64) -> Result<i64, AppError> {
        Ok(self
            .db
            .query_one(COUNT_FOR_EMPLOYEE, params![employee_id], |row| row.get(0))?
            .unwrap_or(0))
    }

    /// Removes every link of the project. Returns how many were removed.
    pub fn cascade_clear_for_project(&self, project_id: i64) -> Result<usize, AppError> {
        Ok(self.db.execute_write(CLEAR_FOR_PROJECT, params![project_id])?.rows_affected)
    }

    /// Removes every link of the employee. Returns how many were removed.
    pub fn cascade_clear_for_employee(&self, employee_id: i64) -> Result<usize, AppError> {
        Ok(self.db.execute_write(CLEAR_FOR_EMPLOYEE, params![employee_id])?.rows_affected)
    }
}
