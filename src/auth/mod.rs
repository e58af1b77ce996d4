//! Authentication: password verification against the credential store and
//! issuance of signed, time-limited bearer tokens. Tokens are stateless;
//! nothing is persisted on issue.

pub mod password;
pub mod token;

use chrono::Duration;
use serde::Serialize;
use tracing::debug;

use crate::config::CONFIG;
use crate::db::sqlite::UserStore;
use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
}

#[derive(Clone)]
pub struct Authenticator {
    users: UserStore,
}

impl Authenticator {
    pub fn new(users: UserStore) -> Self {
        Self { users }
    }

    /// Verify a username/password pair and issue a bearer token valid for
    /// the configured window. An unknown user and a wrong password are
    /// indistinguishable to the caller.
    pub async fn issue_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<TokenResponse, ApiError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !password::verify_password(password, &user.password_hash) {
            debug!(username, "password verification failed");
            return Err(ApiError::InvalidCredentials);
        }

        let ttl = Duration::minutes(CONFIG.token_ttl_minutes);
        let access_token = token::issue_token(&user.username, &CONFIG.secret_key, ttl)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer",
        })
    }
}
