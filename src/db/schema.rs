//! Table definitions and the seed accounts.
//!
//! Table and column names are Spanish, shared with databases created by
//! earlier releases. The schema is created with `IF NOT EXISTS` on every
//! start; [`reset`] drops everything first.

use crate::db::db::Db;
use crate::db::users::{Role, Users};
use crate::libs::error::AppError;
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS usuario (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    rol TEXT NOT NULL DEFAULT 'empleado'
        CHECK (rol IN ('admin', 'recursos_humanos', 'empleado')),
    creado_en TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS departamento (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    gerente_id INTEGER NULL REFERENCES empleado(id) ON DELETE SET NULL
);

CREATE TABLE IF NOT EXISTS empleado (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    direccion TEXT,
    telefono TEXT,
    email TEXT NOT NULL,
    fecha_contratacion DATE NOT NULL,
    salario REAL NOT NULL DEFAULT 0 CHECK (salario >= 0),
    departamento_id INTEGER NULL REFERENCES departamento(id) ON DELETE RESTRICT,
    usuario_id INTEGER NULL REFERENCES usuario(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS proyecto (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nombre TEXT NOT NULL,
    descripcion TEXT,
    fecha_inicio DATE NOT NULL,
    estado TEXT NOT NULL DEFAULT 'activo'
);

CREATE TABLE IF NOT EXISTS asignacion_proyecto (
    empleado_id INTEGER NOT NULL REFERENCES empleado(id) ON DELETE CASCADE,
    proyecto_id INTEGER NOT NULL REFERENCES proyecto(id) ON DELETE CASCADE,
    asignado_en TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    PRIMARY KEY (empleado_id, proyecto_id)
);

CREATE TABLE IF NOT EXISTS registro_tiempo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    empleado_id INTEGER NOT NULL REFERENCES empleado(id) ON DELETE CASCADE,
    proyecto_id INTEGER NOT NULL REFERENCES proyecto(id) ON DELETE CASCADE,
    fecha DATE NOT NULL,
    horas REAL NOT NULL CHECK (horas > 0 AND horas <= 24),
    descripcion TEXT
);

CREATE TABLE IF NOT EXISTS indicador_economico (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    codigo TEXT NOT NULL,
    nombre TEXT NOT NULL,
    fecha DATE NOT NULL,
    valor REAL NOT NULL,
    fuente TEXT NOT NULL DEFAULT 'https://mindicador.cl',
    registrado_en TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    UNIQUE (codigo, fecha)
);

CREATE TABLE IF NOT EXISTS consulta_indicador (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    usuario_id INTEGER NOT NULL REFERENCES usuario(id) ON DELETE CASCADE,
    indicador_codigo TEXT NOT NULL,
    fecha_indicador DATE NOT NULL,
    valor REAL NOT NULL,
    guardado INTEGER NOT NULL DEFAULT 0,
    fecha_consulta TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_registro_tiempo_empleado ON registro_tiempo (empleado_id, fecha);
CREATE INDEX IF NOT EXISTS idx_consulta_indicador_usuario ON consulta_indicador (usuario_id, fecha_consulta);
";

const DROP_ALL: &str = "
DROP TABLE IF EXISTS consulta_indicador;
DROP TABLE IF EXISTS indicador_economico;
DROP TABLE IF EXISTS registro_tiempo;
DROP TABLE IF EXISTS asignacion_proyecto;
DROP TABLE IF EXISTS proyecto;
DROP TABLE IF EXISTS departamento;
DROP TABLE IF EXISTS empleado;
DROP TABLE IF EXISTS usuario;
";

/// Accounts present in every installation.
pub const SEED_USERS: [(&str, &str, Role); 3] = [
    ("admin", "admin123", Role::Admin),
    ("rrhh", "rrhh123", Role::Hr),
    ("empleado1", "empleado123", Role::Employee),
];

/// Creates missing tables and seed accounts.
pub fn initialize(db: &Db) -> Result<usize, AppError> {
    db.execute_script(SCHEMA)?;
    debug!(path = %db.resolved_path().display(), "schema ready");
    seed_users(db)
}

/// Drops every table, then runs [`initialize`].
pub fn reset(db: &Db) -> Result<usize, AppError> {
    db.execute_script(&format!("PRAGMA foreign_keys = OFF;{DROP_ALL}PRAGMA foreign_keys = ON;"))?;
    info!(path = %db.resolved_path().display(), "all tables dropped");
    initialize(db)
}

/// Inserts the seed accounts that are missing. Returns how many were created.
pub fn seed_users(db: &Db) -> Result<usize, AppError> {
    let users = Users::new(db);
    let mut created = 0;

    for (username, password, role) in SEED_USERS {
        if users.find_by_username(username)?.is_some() {
            continue;
        }
        users.create(username, password, role)?;
        created += 1;
    }

    if created > 0 {
        info!(created, "seed accounts created");
    }
    Ok(created)
}
