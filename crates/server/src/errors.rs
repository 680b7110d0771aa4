use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use common::types::ErrorBody;
use service::{auth::errors::AuthError, errors::ServiceError};

pub const READ_FAILED: &str = "Erro ao buscar mensagem.";
pub const SAVE_FAILED: &str = "Erro ao salvar a mensagem.";
pub const DB_UNREACHABLE: &str = "Erro ao conectar ao banco de dados.";

/// Errors surfaced to HTTP clients as `(status, {"error": msg})`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Token não fornecido.")]
    MissingToken,
    #[error("Token inválido ou expirado.")]
    InvalidToken,
    #[error("Usuário ou senha inválidos.")]
    InvalidCredentials,
    #[error("Título e mensagem são obrigatórios.")]
    Validation,
    #[error("Nenhuma mensagem encontrada.")]
    NotFound,
    #[error("{0}")]
    Persistence(&'static str),
    #[error("Erro interno do servidor.")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingToken | ApiError::InvalidToken | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Validation => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Persistence(_) | ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Map a store error; persistence failures get the given client message.
    pub fn from_store(err: ServiceError, failure_message: &'static str) -> Self {
        match err {
            ServiceError::NotFound(_) => ApiError::NotFound,
            ServiceError::Validation(_) => ApiError::Validation,
            other => {
                error!(error = %other, "message store failure");
                ApiError::Persistence(failure_message)
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingToken => ApiError::MissingToken,
            AuthError::InvalidToken => ApiError::InvalidToken,
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            other => {
                error!(error = %other, code = other.code(), "auth failure");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
}
