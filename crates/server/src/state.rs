use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::{auth::AuthService, message::MessageStore};

/// Shared handler state. Cloned per request; everything inside is immutable
/// or internally synchronized.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub messages: MessageStore,
    /// Present only for the database backend; enables `/api/banco`.
    pub db: Option<DatabaseConnection>,
}

impl ServerState {
    pub fn new(auth: Arc<AuthService>, messages: MessageStore, db: Option<DatabaseConnection>) -> Self {
        Self { auth, messages, db }
    }
}
