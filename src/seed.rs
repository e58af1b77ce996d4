//! Bootstrap seeder: populates empty tables with fixed sample data at
//! startup. Idempotent per store; re-running against populated tables is a
//! no-op.

use tracing::info;

use crate::auth::password::hash_password;
use crate::db::models::LogEventInput;
use crate::db::sqlite::{EventStore, UserStore};
use crate::error::ApiError;

const SEED_EVENTS: [(&str, &str, &str); 5] = [
    ("Sistema iniciado", "INFO", "admin"),
    ("Primeira execução do sistema", "INFO", "admin"),
    ("Erro de conexão detectado", "ERROR", "system"),
    ("Conexão restaurada", "INFO", "system"),
    ("Usuário logado", "SUCCESS", "user"),
];

const SEED_USERS: [(&str, &str); 2] = [("admin", "adminpass"), ("user", "userpass")];

pub async fn run(events: &EventStore, users: &UserStore) -> Result<(), ApiError> {
    if events.count().await? == 0 {
        info!("seeding event table with initial data");
        for (descricao, tipo, usuario) in SEED_EVENTS {
            events
                .create(&LogEventInput {
                    descricao: Some(descricao.to_string()),
                    tipo: Some(tipo.to_string()),
                    usuario: Some(usuario.to_string()),
                })
                .await?;
        }
    } else {
        info!("event table already populated, skipping seed");
    }

    if users.count().await? == 0 {
        info!("seeding user table with default accounts");
        for (username, password) in SEED_USERS {
            users.insert(username, &hash_password(password)?).await?;
        }
    } else {
        info!("user table already populated, skipping seed");
    }

    Ok(())
}
