use std::sync::Arc;

use subtle::ConstantTimeEq;
use tracing::{info, instrument, warn};

use super::domain::{AuthSession, Claims, Credentials, LoginInput};
use super::errors::AuthError;
use super::token::TokenService;

/// Auth business service independent of web framework
pub struct AuthService {
    credentials: Credentials,
    tokens: Arc<TokenService>,
}

impl AuthService {
    pub fn new(credentials: Credentials, tokens: Arc<TokenService>) -> Self { Self { credentials, tokens } }

    /// Build from validated application config.
    pub fn from_config(cfg: &configs::AuthConfig) -> Result<Self, AuthError> {
        if cfg.admin_username.is_empty() || cfg.admin_password.is_empty() {
            return Err(AuthError::Config("admin credentials are not configured".into()));
        }
        let ttl = i64::try_from(cfg.token_ttl_secs).map_err(|_| AuthError::Config("token ttl out of range".into()))?;
        let tokens = TokenService::new(&cfg.jwt_secret, ttl)?;
        let credentials = Credentials { username: cfg.admin_username.clone(), password: cfg.admin_password.clone() };
        Ok(Self::new(credentials, Arc::new(tokens)))
    }

    /// Check the admin credentials and issue a token.
    ///
    /// Both fields are always compared, in constant time, so neither the
    /// result nor the timing tells which one was wrong.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, TokenService, domain::{Credentials, LoginInput}};
    /// use std::sync::Arc;
    /// let tokens = Arc::new(TokenService::new("secret", 3600).unwrap());
    /// let svc = AuthService::new(Credentials { username: "admin".into(), password: "pw".into() }, tokens.clone());
    /// let session = tokio_test::block_on(svc.login(LoginInput { username: Some("admin".into()), password: Some("pw".into()) })).unwrap();
    /// assert_eq!(tokens.verify(&session.token).unwrap().username, "admin");
    /// ```
    #[instrument(skip(self, input), fields(username = input.username.as_deref().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let username = input.username.unwrap_or_default();
        let password = input.password.unwrap_or_default();

        let user_ok = constant_time_compare(&username, &self.credentials.username);
        let pass_ok = constant_time_compare(&password, &self.credentials.password);
        if !(user_ok & pass_ok) {
            warn!("login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.tokens.issue(&username)?;
        info!("login succeeded");
        Ok(AuthSession { username, token })
    }

    /// Verify a bearer token and return its identity.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.tokens.verify(token)
    }
}

/// Constant-time string comparison; a length mismatch is also detected
/// without an early return.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    let max_len = std::cmp::max(a.len(), b.len());

    // Different pad bytes so padded strings of unequal length never match
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];
    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);
    (lengths_equal & contents_equal).into()
}
