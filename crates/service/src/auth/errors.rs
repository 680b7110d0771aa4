use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,
    #[error("invalid or expired token")]
    InvalidToken,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("auth configuration error: {0}")]
    Config(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingToken => 1001,
            AuthError::InvalidToken => 1002,
            AuthError::InvalidCredentials => 1004,
            AuthError::Config(_) => 1100,
            AuthError::TokenError(_) => 1102,
        }
    }
}
