use crate::db::db::Db;
use crate::db::employees::employee_exists_in;
use crate::db::executor::statement_error;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_DEPARTMENT: &str = "INSERT INTO departamento (nombre, gerente_id) VALUES (?1, ?2)";
const SELECT_DEPARTMENTS: &str = "SELECT d.id, d.nombre, d.gerente_id, g.nombre,
        (SELECT COUNT(*) FROM empleado e WHERE e.departamento_id = d.id)
    FROM departamento d
    LEFT JOIN empleado g ON g.id = d.gerente_id
    ORDER BY d.nombre, d.id";
const SELECT_DEPARTMENT_BY_ID: &str = "SELECT d.id, d.nombre, d.gerente_id, g.nombre,
        (SELECT COUNT(*) FROM empleado e WHERE e.departamento_id = d.id)
    FROM departamento d
    LEFT JOIN empleado g ON g.id = d.gerente_id
    WHERE d.id = ?1";
const DEPARTMENT_EXISTS: &str = "SELECT 1 FROM departamento WHERE id = ?1";
const RENAME_DEPARTMENT: &str = "UPDATE departamento SET nombre = ?2 WHERE id = ?1";
const UPDATE_MANAGER: &str = "UPDATE departamento SET gerente_id = ?2 WHERE id = ?1";
const COUNT_MEMBERS: &str = "SELECT COUNT(*) FROM empleado WHERE departamento_id = ?1";
const DELETE_DEPARTMENT: &str = "DELETE FROM departamento WHERE id = ?1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub manager_id: Option<i64>,
    pub manager_name: Option<String>,
    pub employee_count: i64,
}

impl Department {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Department {
            id: row.get(0)?,
            name: row.get(1)?,
            manager_id: row.get(2)?,
            manager_name: row.get(3)?,
            employee_count: row.get(4)?,
        })
    }
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(Message::DepartmentNameRequired));
    }
    Ok(name.to_string())
}

pub struct Departments<'a> {
    db: &'a Db,
}

impl<'a> Departments<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn create(&self, name: &str, manager_id: Option<i64>) -> Result<i64, AppError> {
        let name = required_name(name)?;
        self.db.transaction(|tx| {
            if let Some(manager_id) = manager_id {
                if !employee_exists_in(tx, manager_id)? {
                    return Err(AppError::not_found("employee", manager_id));
                }
            }
            tx.execute(INSERT_DEPARTMENT, params![name, manager_id])
                .map_err(|e| statement_error(INSERT_DEPARTMENT, e))?;
            Ok(tx.last_insert_rowid())
        })
    }

    pub fn list(&self) -> Result<Vec<Department>, AppError> {
        Ok(self.db.query_many(SELECT_DEPARTMENTS, [], Department::from_row)?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Department>, AppError> {
        Ok(self.db.query_one(SELECT_DEPARTMENT_BY_ID, params![id], Department::from_row)?)
    }

    pub fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.db.query_one(DEPARTMENT_EXISTS, params![id], |_| Ok(()))?.is_some())
    }

    pub fn rename(&self, id: i64, name: &str) -> Result<(), AppError> {
        let name = required_name(name)?;
        let outcome = self.db.execute_write(RENAME_DEPARTMENT, params![id, name])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("department", id));
        }
        Ok(())
    }

    /// Sets or clears the manager. Both the department and the employee must exist.
    pub fn set_manager(&self, id: i64, manager_id: Option<i64>) -> Result<(), AppError> {
        self.db.transaction(|tx| {
            let department = tx
                .query_row(DEPARTMENT_EXISTS, params![id], |_| Ok(()))
                .optional()
                .map_err(|e| statement_error(DEPARTMENT_EXISTS, e))?;
            if department.is_none() {
                return Err(AppError::not_found("department", id));
            }

            if let Some(manager_id) = manager_id {
                if !employee_exists_in(tx, manager_id)? {
                    return Err(AppError::not_found("employee", manager_id));
                }
            }

            tx.execute(UPDATE_MANAGER, params![id, manager_id])
                .map_err(|e| statement_error(UPDATE_MANAGER, e))?;
            Ok(())
        })
    }

    /// Deletes an empty department. Fails with [`AppError::InUse`] while any
    /// employee belongs to it.
    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        self.db.transaction(|tx| {
            let members: i64 = tx
                .query_row(COUNT_MEMBERS, params![id], |row| row.get(0))
                .map_err(|e| statement_error(COUNT_MEMBERS, e))?;
            if members > 0 {
                return Err(AppError::InUse {
                    entity: "department",
                    id,
                    dependents: members,
                });
            }

            let deleted = tx
                .execute(DELETE_DEPARTMENT, params![id])
                .map_err(|e| statement_error(DELETE_DEPARTMENT, e))?;
            if deleted == 0 {
                return Err(AppError::not_found("department", id));
            }
            Ok(())
        })
    }
}
