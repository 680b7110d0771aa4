use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct StatusResponse { pub success: bool, pub message: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct LoginResponse { pub success: bool, pub token: String, pub message: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub title: String, pub mensagem: String }

#[derive(ToSchema)]
pub struct WriteResponse { pub success: bool, pub message: String, pub data: MessageDoc }

#[derive(ToSchema)]
pub struct ClaimsDoc { pub username: String, pub iat: i64, pub exp: i64 }

#[derive(ToSchema)]
pub struct ValidateTokenResponse { pub success: bool, pub message: String, pub user: ClaimsDoc }

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).bearer_format("JWT").build()),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::index,
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::validate_token,
        crate::routes::messages::get_aviso,
        crate::routes::messages::post_mensagem,
        crate::routes::storage::banco,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            StatusResponse,
            LoginRequest,
            LoginResponse,
            MessageDoc,
            WriteResponse,
            ClaimsDoc,
            ValidateTokenResponse,
        )
    ),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "messages")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/", "/health", "/api/login", "/api/aviso", "/api/mensagem", "/api/validate-token", "/api/banco"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("bearer"));
    }
}
