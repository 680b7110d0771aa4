use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

use super::domain::Claims;
use super::errors::AuthError;

/// Default token lifetime.
pub const DEFAULT_TTL_SECS: i64 = 60 * 60;

/// Issues and verifies HS256-signed bearer tokens.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    /// Build from the signing secret. An empty secret is a configuration error.
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self, AuthError> {
        if secret.is_empty() {
            return Err(AuthError::Config("jwt secret is empty".into()));
        }
        if ttl_secs <= 0 {
            return Err(AuthError::Config("token ttl must be positive".into()));
        }
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp"]);
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl: Duration::try_seconds(ttl_secs).ok_or_else(|| AuthError::Config("token ttl out of range".into()))?,
        })
    }

    /// Sign a token for `username`, valid from now for the configured TTL.
    pub fn issue(&self, username: &str) -> Result<String, AuthError> {
        self.issue_at(username, Utc::now())
    }

    /// Sign a token as if issued at `issued_at`.
    pub fn issue_at(&self, username: &str, issued_at: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            username: username.to_string(),
            iat: issued_at.timestamp(),
            exp: issued_at
                .checked_add_signed(self.ttl)
                .ok_or_else(|| AuthError::TokenError("token expiry out of range".into()))?
                .timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Check signature, payload shape and expiry.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::InvalidToken
            })
    }
}
