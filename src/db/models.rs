use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored log event. `data_criacao` is assigned once at creation and is
/// never touched by updates.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LogEvent {
    pub id: i64,
    pub descricao: Option<String>,
    pub tipo: Option<String>,
    pub data_criacao: DateTime<Utc>,
    pub usuario: Option<String>,
}

/// Request payload shared by create, full update and partial update.
/// Absent JSON fields deserialize to `None`; PUT writes them through as
/// NULL while PATCH leaves the stored value alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogEventInput {
    pub descricao: Option<String>,
    pub tipo: Option<String>,
    pub usuario: Option<String>,
}

#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}
