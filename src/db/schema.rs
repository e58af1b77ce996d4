//! SQL DDL for initializing the credential and event tables.
//! SQLite-first design; can be adapted for other RDBMS.

/// SQLite schema with:
/// - `usuarios`: `username` UNIQUE, Argon2 PHC string in `password_hash`
/// - `logeventos`: free-text fields, `data_criacao` stored as RFC3339 text
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS logeventos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    descricao TEXT NULL,
    tipo TEXT NULL,
    data_criacao TEXT NOT NULL, -- RFC3339
    usuario TEXT NULL
);
"#;
