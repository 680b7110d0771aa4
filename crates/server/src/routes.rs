use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::{ApiInfo, Health};

use crate::openapi::ApiDoc;
use crate::state::ServerState;

pub mod auth;
pub mod messages;
pub mod storage;

#[utoipa::path(get, path = "/", tag = "health", responses((status = 200, description = "API info")))]
pub async fn index() -> Json<ApiInfo> {
    Json(ApiInfo { message: "API de mensagens" })
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: public routes, bearer-protected routes
/// and, for the database backend, the storage probe.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    // Public routes
    let public = Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/login", post(auth::login))
        .route("/api/aviso", get(messages::get_aviso))
        .route("/api-docs/openapi.json", get(openapi_json));

    // Protected routes
    let protected = Router::new()
        .route("/api/mensagem", post(messages::post_mensagem))
        .route("/api/validate-token", get(auth::validate_token))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    let mut app = public.merge(protected);
    if state.db.is_some() {
        app = app.route("/api/banco", get(storage::banco));
    }

    app.with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                // 5xx 以 ERROR 记录
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
