use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Error as SqlxError, Pool, Row, Sqlite};

use crate::db::models::{LogEvent, LogEventInput, User};
use crate::db::schema::SQLITE_INIT;
use crate::error::ApiError;

pub type SqlitePool = Pool<Sqlite>;

/// Open (or create) the SQLite database behind `database_url`.
pub async fn connect(database_url: &str) -> Result<SqlitePool, ApiError> {
    let opts = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(opts).await?;
    Ok(pool)
}

/// Initialize the schema by executing the bundled DDL.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), ApiError> {
    // execute multiple statements safely (SQLite supports multi-commands but sqlx::query doesn't)
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

/// Credential store: user rows, written only by the bootstrap seeder.
#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, ApiError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    pub async fn insert(&self, username: &str, password_hash: &str) -> Result<i64, ApiError> {
        let res = sqlx::query("INSERT INTO usuarios (username, password_hash) VALUES (?, ?)")
            .bind(username)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(res.last_insert_rowid())
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, ApiError> {
        let row = sqlx::query("SELECT id, username, password_hash FROM usuarios WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        row.map(|r| -> Result<User, ApiError> {
            Ok(User {
                id: r.try_get("id")?,
                username: r.try_get("username")?,
                password_hash: r.try_get("password_hash")?,
            })
        })
        .transpose()
    }
}

/// Event store: CRUD over the `logeventos` table. Each method is one
/// transaction boundary; multi-statement operations run inside an explicit
/// transaction so a reader never observes a partial write.
#[derive(Clone)]
pub struct EventStore {
    pool: SqlitePool,
}

impl EventStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, ApiError> {
        let rec: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM logeventos")
            .fetch_one(&self.pool)
            .await?;
        Ok(rec.0)
    }

    /// Insert a new event, assigning its id and creation timestamp.
    pub async fn create(&self, input: &LogEventInput) -> Result<LogEvent, ApiError> {
        let data_criacao = Utc::now();
        let res = sqlx::query(
            "INSERT INTO logeventos (descricao, tipo, data_criacao, usuario) VALUES (?, ?, ?, ?)",
        )
        .bind(input.descricao.clone())
        .bind(input.tipo.clone())
        .bind(data_criacao.to_rfc3339())
        .bind(input.usuario.clone())
        .execute(&self.pool)
        .await?;

        Ok(LogEvent {
            id: res.last_insert_rowid(),
            descricao: input.descricao.clone(),
            tipo: input.tipo.clone(),
            data_criacao,
            usuario: input.usuario.clone(),
        })
    }

    pub async fn get(&self, id: i64) -> Result<Option<LogEvent>, ApiError> {
        let row = sqlx::query(
            "SELECT id, descricao, tipo, data_criacao, usuario FROM logeventos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Self::row_to_event).transpose()
    }

    /// All events in insertion (id) order.
    pub async fn list(&self) -> Result<Vec<LogEvent>, ApiError> {
        let rows = sqlx::query(
            "SELECT id, descricao, tipo, data_criacao, usuario FROM logeventos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(Self::row_to_event).collect()
    }

    /// Full replace of the three mutable fields. `data_criacao` is never
    /// written here. Returns `None` when the id does not exist.
    pub async fn update(&self, id: i64, input: &LogEventInput) -> Result<Option<LogEvent>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let res = sqlx::query("UPDATE logeventos SET descricao = ?, tipo = ?, usuario = ? WHERE id = ?")
            .bind(input.descricao.clone())
            .bind(input.tipo.clone())
            .bind(input.usuario.clone())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if res.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query(
            "SELECT id, descricao, tipo, data_criacao, usuario FROM logeventos WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Self::row_to_event(row).map(Some)
    }

    /// Overwrite only the supplied fields, read-modify-write in one
    /// transaction. Returns `None` when the id does not exist.
    pub async fn patch(&self, id: i64, input: &LogEventInput) -> Result<Option<LogEvent>, ApiError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(
            "SELECT id, descricao, tipo, data_criacao, usuario FROM logeventos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;
        let Some(row) = row else {
            return Ok(None);
        };
        let mut event = Self::row_to_event(row)?;

        if let Some(descricao) = &input.descricao {
            event.descricao = Some(descricao.clone());
        }
        if let Some(tipo) = &input.tipo {
            event.tipo = Some(tipo.clone());
        }
        if let Some(usuario) = &input.usuario {
            event.usuario = Some(usuario.clone());
        }

        sqlx::query("UPDATE logeventos SET descricao = ?, tipo = ?, usuario = ? WHERE id = ?")
            .bind(event.descricao.clone())
            .bind(event.tipo.clone())
            .bind(event.usuario.clone())
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(Some(event))
    }

    /// Returns `false` when the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<bool, ApiError> {
        let res = sqlx::query("DELETE FROM logeventos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }

    fn row_to_event(row: SqliteRow) -> Result<LogEvent, ApiError> {
        let id: i64 = row.try_get("id")?;
        let descricao: Option<String> = row.try_get("descricao")?;
        let tipo: Option<String> = row.try_get("tipo")?;
        let data_criacao_str: String = row.try_get("data_criacao")?;
        let usuario: Option<String> = row.try_get("usuario")?;

        let data_criacao: DateTime<Utc> = chrono::DateTime::parse_from_rfc3339(&data_criacao_str)
            .map_err(|e| SqlxError::Decode(Box::new(e)))?
            .with_timezone(&Utc);

        Ok(LogEvent {
            id,
            descricao,
            tipo,
            data_criacao,
            usuario,
        })
    }
}
