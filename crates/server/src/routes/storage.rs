use axum::{extract::State, Json};
use tracing::error;

use common::types::StatusMessage;

use crate::errors::{ApiError, DB_UNREACHABLE};
use crate::state::ServerState;

/// Storage connectivity probe; routed only for the database backend.
#[utoipa::path(get, path = "/api/banco", tag = "health", responses((status = 200, description = "Database reachable", body = crate::openapi::StatusResponse), (status = 500, description = "Database unreachable", body = crate::openapi::ErrorResponse)))]
pub async fn banco(State(state): State<ServerState>) -> Result<Json<StatusMessage>, ApiError> {
    let db = state.db.as_ref().ok_or(ApiError::Persistence(DB_UNREACHABLE))?;
    db.ping().await.map_err(|e| {
        error!(error = %e, "database ping failed");
        ApiError::Persistence(DB_UNREACHABLE)
    })?;
    Ok(Json(StatusMessage::new("Conexão com o banco de dados bem-sucedida!")))
}
