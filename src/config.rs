use std::sync::LazyLock;

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Process configuration, merged from defaults and `EVENTLOG_`-prefixed
/// environment variables (`.env` is loaded by `main` before first access).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub loglevel: String,
    pub secret_key: String,
    pub token_ttl_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite:eventlog.sqlite".to_string(),
            port: 5000,
            loglevel: "info".to_string(),
            secret_key: "secret-key".to_string(),
            token_ttl_minutes: 15,
        }
    }
}

impl Config {
    pub fn load() -> Self {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("EVENTLOG_"))
            .extract()
            .expect("invalid configuration")
    }
}

pub static CONFIG: LazyLock<Config> = LazyLock::new(Config::load);
