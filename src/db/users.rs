use crate::db::db::Db;
use crate::libs::auth::{self, AuthenticatedUser};
use crate::libs::error::AppError;
use crate::libs::messages::Message;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::{params, Row};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const INSERT_USER: &str = "INSERT INTO usuario (username, password_hash, rol) VALUES (?1, ?2, ?3)";
const SELECT_CREDENTIALS: &str = "SELECT id, username, rol, password_hash FROM usuario WHERE username = ?1";
const SELECT_USERS: &str = "SELECT id, username, rol, creado_en FROM usuario ORDER BY username";
const SELECT_USER_BY_ID: &str = "SELECT id, username, rol, creado_en FROM usuario WHERE id = ?1";
const SELECT_USER_BY_USERNAME: &str = "SELECT id, username, rol, creado_en FROM usuario WHERE username = ?1";
const UPDATE_PASSWORD: &str = "UPDATE usuario SET password_hash = ?2 WHERE id = ?1";
const UPDATE_ROLE: &str = "UPDATE usuario SET rol = ?2 WHERE id = ?1";
const DELETE_USER: &str = "DELETE FROM usuario WHERE id = ?1 AND username != ?2";

/// The account created at install time. It can be neither deleted nor demoted.
pub const PRIMARY_ADMIN: &str = "admin";
pub const MIN_PASSWORD_LEN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Hr,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Hr, Role::Employee];

    /// Value stored in `usuario.rol`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Hr => "recursos_humanos",
            Role::Employee => "empleado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Hr => "Human resources",
            Role::Employee => "Employee",
        }
    }

    /// Admin and HR manage staff, departments and projects.
    pub fn can_manage_staff(&self) -> bool {
        matches!(self, Role::Admin | Role::Hr)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "recursos_humanos" | "rrhh" | "hr" => Ok(Role::Hr),
            "empleado" | "employee" => Ok(Role::Employee),
            other => Err(AppError::Validation(Message::InvalidRole(other.to_string()))),
        }
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;
        text.parse().map_err(|e: AppError| FromSqlError::Other(Box::new(e)))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub created_at: Option<String>,
}

impl User {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(User {
            id: row.get(0)?,
            username: row.get(1)?,
            role: row.get(2)?,
            created_at: row.get(3)?,
        })
    }

    pub fn is_primary_admin(&self) -> bool {
        self.username == PRIMARY_ADMIN
    }
}

pub struct Users<'a> {
    db: &'a Db,
}

impl<'a> Users<'a> {
    pub fn new(db: &'a Db) -> Self {
        Self { db }
    }

    pub fn create(&self, username: &str, password: &str, role: Role) -> Result<i64, AppError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AppError::Validation(Message::UsernameRequired));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(Message::PasswordTooShort(MIN_PASSWORD_LEN)));
        }
        if self.find_by_username(username)?.is_some() {
            return Err(AppError::Validation(Message::UsernameTaken(username.to_string())));
        }

        let hash = auth::hash_password(password)?;
        let outcome = self.db.execute_write(INSERT_USER, params![username, hash, role])?;
        Ok(outcome.last_insert_id)
    }

    /// Returns the user when the password matches. Unknown users and wrong
    /// passwords both yield `Ok(None)` after one hash verification.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<Option<AuthenticatedUser>, AppError> {
        let found = self.db.query_one(SELECT_CREDENTIALS, params![username], |row| {
            Ok((
                AuthenticatedUser {
                    id: row.get(0)?,
                    username: row.get(1)?,
                    role: row.get(2)?,
                },
                row.get::<_, String>(3)?,
            ))
        })?;

        match found {
            Some((user, hash)) => Ok(auth::verify_password(password, &hash).then_some(user)),
            None => {
                auth::verify_against_dummy(password);
                Ok(None)
            }
        }
    }

    pub fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.db.query_many(SELECT_USERS, [], User::from_row)?)
    }

    pub fn get(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.db.query_one(SELECT_USER_BY_ID, params![id], User::from_row)?)
    }

    pub fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.db.query_one(SELECT_USER_BY_USERNAME, params![username.trim()], User::from_row)?)
    }

    pub fn change_password(&self, id: i64, new_password: &str) -> Result<(), AppError> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(Message::PasswordTooShort(MIN_PASSWORD_LEN)));
        }

        let hash = auth::hash_password(new_password)?;
        let outcome = self.db.execute_write(UPDATE_PASSWORD, params![id, hash])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("user", id));
        }
        Ok(())
    }

    pub fn change_role(&self, id: i64, role: Role) -> Result<(), AppError> {
        let user = self.get(id)?.ok_or_else(|| AppError::not_found("user", id))?;
        if user.is_primary_admin() && role != Role::Admin {
            return Err(AppError::Forbidden(Message::PrimaryAdminProtected));
        }

        self.db.execute_write(UPDATE_ROLE, params![id, role])?;
        Ok(())
    }

    pub fn delete(&self, id: i64) -> Result<(), AppError> {
        let user = self.get(id)?.ok_or_else(|| AppError::not_found("user", id))?;
        if user.is_primary_admin() {
            return Err(AppError::Forbidden(Message::PrimaryAdminProtected));
        }

        let outcome = self.db.execute_write(DELETE_USER, params![id, PRIMARY_ADMIN])?;
        if outcome.rows_affected == 0 {
            return Err(AppError::not_found("user", id));
        }
        Ok(())
    }
}
