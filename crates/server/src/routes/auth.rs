use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::Serialize;

use service::auth::{domain::{Claims, LoginInput}, errors::AuthError};

use crate::errors::ApiError;
use crate::state::ServerState;

#[derive(Serialize)]
pub struct LoginOutput {
    pub success: bool,
    pub token: String,
    pub message: &'static str,
}

#[derive(Serialize)]
pub struct ValidateOutput {
    pub success: bool,
    pub message: &'static str,
    pub user: Claims,
}

#[utoipa::path(post, path = "/api/login", tag = "auth", request_body = crate::openapi::LoginRequest, responses((status = 200, description = "Logged In", body = crate::openapi::LoginResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    // An unreadable body is just another credential mismatch
    let input = payload.map(|Json(input)| input).unwrap_or_default();
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { success: true, token: session.token, message: "Login bem-sucedido." }))
}

#[utoipa::path(get, path = "/api/validate-token", tag = "auth", responses((status = 200, description = "Token valid", body = crate::openapi::ValidateTokenResponse), (status = 401, description = "Unauthorized", body = crate::openapi::ErrorResponse)), security(("bearer" = [])))]
pub async fn validate_token(Extension(claims): Extension<Claims>) -> Json<ValidateOutput> {
    Json(ValidateOutput { success: true, message: "Token válido.", user: claims })
}

/// Extract the token from `Authorization: Bearer <token>`.
/// The scheme is matched case-insensitively.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;
    let (scheme, token) = value.trim().split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }
    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Auth gate for protected routes: verifies the bearer token and attaches
/// the decoded `Claims` to the request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_owned();

    let claims = {
        let token = bearer_token(req.headers()).inspect_err(|_| {
            tracing::warn!(path = %path, "missing bearer token");
        })?;
        state.auth.verify(token).inspect_err(|e| {
            tracing::warn!(path = %path, err = %e, "token validation failed");
        })?
    };

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")).unwrap(), "abc.def");
        assert_eq!(bearer_token(&headers("bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn missing_or_foreign_scheme_is_missing_token() {
        assert!(matches!(bearer_token(&HeaderMap::new()), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(&headers("Bearer")), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(&headers("Bearer   ")), Err(AuthError::MissingToken)));
        assert!(matches!(bearer_token(&headers("Basic dXNlcjpwdw==")), Err(AuthError::MissingToken)));
    }
}
