use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// JWT payload: subject username and unix expiry timestamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Sign an HS256 token for `username`, expiring after `ttl`.
pub fn issue_token(username: &str, secret: &str, ttl: Duration) -> Result<String, ApiError> {
    let claims = Claims {
        sub: username.to_string(),
        exp: (Utc::now() + ttl).timestamp(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok(token)
}

/// Decode and verify a token, yielding the subject username. Signature or
/// shape failures surface as `InvalidToken`; an elapsed expiry (no clock
/// leeway) as `TokenExpired`.
pub fn validate_token(token: &str, secret: &str) -> Result<String, ApiError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Ok(data.claims.sub),
        Err(e) => match e.kind() {
            ErrorKind::ExpiredSignature => Err(ApiError::TokenExpired),
            _ => Err(ApiError::InvalidToken),
        },
    }
}
