use crate::db::db::Db;
use crate::db::departments::Departments;
use crate::db::executor::statement_error;
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use chrono::{Local, NaiveDate};
use rusqlite::{params, OptionalExtension, Row};
use serde::{Deserialize, Serialize};

const INSERT_EMPLOYEE: &str = "INSERT INTO empleado
    (nombre, direccion, telefono, email, fecha_contratacion, salario, departamento_id, usuario_id)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const SELECT_EMPLOYEES: &str = "SELECT e.id, e.nombre, e.direccion, e.telefono, e.email, e.fecha_contratacion,
        e.salario, e.departamento_id, d.nombre, e.usuario_id
    FROM empleado e
    LEFT JOIN departamento d ON d.id = e.departamento_id
    ORDER BY e.nombre, e.id";
const SELECT_EMPLOYEE_BY_ID: &str = "SELECT e.id, e.nombre, e.direccion, e.telefono, e.email, e.fecha_contratacion,
        e.salario, e.departamento_id, d.nombre, e.usuario_id
    FROM empleado e
    LEFT JOIN departamento d ON d.id = e.departamento_id
    WHERE e.id = ?1";
const SELECT_EMPLOYEE_BY_EMAIL: &str = "SELECT e.id, e.nombre, e.direccion, e.telefono, e.email, e.fecha_contratacion,
        e.salario, e.departamento_id, d.nombre, e.usuario_id
    FROM empleado e
    LEFT JOIN departamento d ON d.id = e.departamento_id
    WHERE e.email = ?1";
const SELECT_EMPLOYEE_BY_USER: &str = "SELECT e.id, e.nombre, e.direccion, e.telefono, e.email, e.fecha_contratacion,
        e.salario, e.departamento_id, d.nombre, e.usuario_id
    FROM empleado e
    LEFT JOIN departamento d ON d.id = e.departamento_id
    WHERE e.usuario_id = ?1";
const EMPLOYEE_EXISTS: &str = "SELECT 1 FROM empleado WHERE id = ?1";
const UPDATE_EMPLOYEE: &str = "UPDATE empleado SET
        nombre = COALESCE(?2, nombre),
        email = COALESCE(?3, email),
        direccion = CASE WHEN ?4 IS NULL THEN direccion ELSE NULLIF(?4, '') END,
        telefono = CASE WHEN ?5 IS NULL THEN telefono ELSE NULLIF(?5, '') END,
        salario = COALESCE(?6, salario)
    WHERE id = ?1";
const UPDATE_EMPLOYEE_DEPARTMENT: &str = "UPDATE empleado SET departamento_id = ?2 WHERE id = ?1";
const UPDATE_EMPLOYEE_USER: &str = "UPDATE empleado SET usuario_id = ?2 WHERE id = ?1";
const COUNT_TIME_ENTRIES: &str = "SELECT COUNT(*) FROM registro_tiempo WHERE empleado_id = ?1";
const DELETE_EMPLOYEE: &str = "DELETE FROM empleado WHERE id = ?1";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: String,
    pub hire_date: NaiveDate,
    pub salary: f64,
    pub department_id: Option<i64>,
    pub department_name: Option<String>,
    pub user_id: Option<i64>,
}

impl Employee {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Employee {
            id: row.get(0)?,
            name: row.get(1)?,
            address: row.get(2)?,
            phone: row.get(3)?,
            email: row.get(4)?,
            hire_date: row.get(5)?,
            salary: row.get(6)?,
            department_id: row.get(7)?,
            department_name: row.get(8)?,
            user_id: row.get(9)?,
        })
    }
}

/// Input for [`Employees::create`]. Unset hire date means today, unset salary means 0.
#[derive(Debug, Clone, Default)]
pub struct NewEmployee {
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub hire_date: Option<NaiveDate>,
    pub salary: Option<f64>,
    pub department_id: Option<i64>,
    pub user_id: Option<i64>,
}

impl NewEmployee {
    pub fn new(name: &str, email: &str) -> Self {
        NewEmployee {
            name: name.to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }
}

/// Fields left as `None` keep their stored value. A blank address or phone clears it.
#[derive(Debug, Clone, Default)]
pub struct EmployeeChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub salary: Option<f64>,
}

/// Trims and lowercases an email address and checks its shape.
pub fn normalize_email(email: &str) -> Result<String, AppError> {
    let email = email.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(AppError::Validation(Message::InvalidEmail(email))),
    }
}

fn required_name(name: &str) -> Result<String, AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation(Message::EmployeeNameRequired));
    }
    Ok(name.to_string())
}

fn valid_salary(salary: f64) -> Result<f64, AppError> {
    if !salary.is_finite() || salary < 0.0 {
        return Err(AppError::Validation(Message::InvalidSalary(salary)));
    }
    Ok((salary * 100.0).round() / 100.0)
}

fn optional_text(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

pub struct Employees<'a> {
    db: &'a Db,
}

impl<'a> Employees<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn create(&self, employee: NewEmployee) -> Result<i64, AppError> {
        let name = required_name(&employee.name)?;
        let email = normalize_email(&employee.email)?;
        let salary = valid_salary(employee.salary.unwrap_or(0.0))?;
        let hire_date = employee.hire_date.unwrap_or_else(|| Local::now().date_naive());

        if let Some(department_id) = employee.department_id {
            if !Departments::new(self.db).exists(department_id)? {
                return Err(AppError::not_found("department", department_id));
            }
        }

        let outcome = self.db.execute_write(
            INSERT_EMPLOYEE,
            params![
                name,
                optional_text(employee.address),
                optional_text(employee.phone),
                email,
                hire_date,
                salary,
                employee.department_id,
                employee.user_id
            ],
        )?;
        Ok(outcome.last_insert_id)
    }

    pub fn list(&self) -> Result<Vec<Employee>, AppError> {
        Ok(self.db.query_many(SELECT_EMPLOYEES, [], Employee::from_row)?)
    }

    pub fn get(&self, id: i64) -> Result<Option<Employee>, AppError> {
        Ok(self.db.query_one(SELECT_EMPLOYEE_BY_ID, params![id], Employee::from_row)?)
    }

    pub fn exists(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.db.query_one(EMPLOYEE_EXISTS, params![id], |_| Ok(()))?.is_some())
    }

    /// Case-insensitive substring match on the name, accented letters included.
    /// Filtered here since SQLite `LIKE` folds ASCII only.
    pub fn find_by_name(&self, fragment: &str) -> Result<Vec<Employee>, AppError> {
        let fragment = fragment.trim().to_lowercase();
        Ok(self
            .list()?
            .into_iter()
            .filter(|employee| employee.name.to_lowercase().contains(&fragment))
            .collect())
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Employee>, AppError> {
        let email = email.trim().to_lowercase();
        Ok(self.db.query_one(SELECT_EMPLOYEE_BY_EMAIL, params![email], Employee::from_row)?)
    }

    /// The employee record linked to a login account.
    pub fn find_by_user(&self, user_id: i64) -> Result<Option<Employee>, AppError> {
        Ok(self.db.query_one(SELECT_EMPLOYEE_BY_USER, params![user_id], Employee::from_row)?)
    }

    pub fn update(&self, id: i64, changes: EmployeeChanges) -> Result<(), AppError> {
        let name = changes.name.as_deref().map(required_name).transpose()?;
        let email = changes.email.as_deref().map(normalize_email).transpose()?;
        let salary = changes.salary.map(valid_salary).transpose()?;

        let outcome = self.db.execute_write(
            UPDATE_EMPLOYEE,
            params![id, name, email, trimmed(changes.address), trimmed(changes.phone), salary],
        )?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("employee", id));
        }
        Ok(())
    }

    /// Moves the employee to `department_id`, or out of any department with `None`.
    pub fn set_department(&self, id: i64, department_id: Option<i64>) -> Result<(), AppError> {
        if let Some(department_id) = department_id {
            if !Departments::new(self.db).exists(department_id)? {
                return Err(AppError::not_found("department", department_id));
            }
        }

        let outcome = self.db.execute_write(UPDATE_EMPLOYEE_DEPARTMENT, params![id, department_id])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("employee", id));
        }
        Ok(())
    }

    pub fn link_user(&self, id: i64, user_id: Option<i64>) -> Result<(), AppError> {
        let outcome = self.db.execute_write(UPDATE_EMPLOYEE_USER, params![id, user_id])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("employee", id));
        }
        Ok(())
    }

    /// Deletes the employee. Project links and time entries go with it through
    /// the foreign keys; a department managed by the employee loses its manager.
    ///
    /// Returns how many time entries were removed so the caller can warn.
    pub fn delete(&self, id: i64) -> Result<i64, AppError> {
        self.db.transaction(|tx| {
            let time_entries: i64 = tx
                .query_row(COUNT_TIME_ENTRIES, params![id], |row| row.get(0))
                .map_err(|e| statement_error(COUNT_TIME_ENTRIES, e))?;

            let deleted = tx
                .execute(DELETE_EMPLOYEE, params![id])
                .map_err(|e| statement_error(DELETE_EMPLOYEE, e))?;
            if deleted == 0 {
                return Err(AppError::not_found("employee", id));
            }
            Ok(time_entries)
        })
    }

    /// Time entries recorded for the employee.
    pub fn time_entry_count(&self, id: i64) -> Result<i64, AppError> {
        let count = self.db.query_one(COUNT_TIME_ENTRIES, params![id], |row| row.get(0))?;
        Ok(count.unwrap_or(0))
    }
}

/// Used by repositories that check an employee inside their own transaction.
pub(crate) fn employee_exists_in(conn: &rusqlite::Connection, id: i64) -> Result<bool, AppError> {
    Ok(conn
        .query_row(EMPLOYEE_EXISTS, params![id], |_| Ok(()))
        .optional()
        .map_err(|e| statement_error(EMPLOYEE_EXISTS, e))?
        .is_some())
}
