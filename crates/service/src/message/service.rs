use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{Message, MessageInput};
use super::repository::MessageRepository;
use crate::errors::ServiceError;

/// Singleton message store: validates writes and delegates to a backend.
#[derive(Clone)]
pub struct MessageStore {
    repo: Arc<dyn MessageRepository>,
}

impl MessageStore {
    pub fn new(repo: Arc<dyn MessageRepository>) -> Self { Self { repo } }

    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    /// Current message, or `NotFound` if none was ever written.
    #[instrument(skip(self), fields(backend = self.repo.backend()))]
    pub async fn read(&self) -> Result<Message, ServiceError> {
        self.repo
            .load()
            .await?
            .ok_or_else(|| ServiceError::not_found("message"))
    }

    /// Create or replace the message. Rejects missing or blank fields before
    /// touching the backend.
    ///
    /// # Examples
    /// ```
    /// use service::message::{MessageStore, domain::MessageInput, repository::mock::MockMessageRepository};
    /// use std::sync::Arc;
    /// let store = MessageStore::new(Arc::new(MockMessageRepository::default()));
    /// let saved = tokio_test::block_on(store.write(MessageInput::new("Maintenance", "Service down 2-4am"))).unwrap();
    /// assert_eq!(saved.title, "Maintenance");
    /// assert!(tokio_test::block_on(store.write(MessageInput::new("", "x"))).is_err());
    /// ```
    #[instrument(skip(self, input), fields(backend = self.repo.backend()))]
    pub async fn write(&self, input: MessageInput) -> Result<Message, ServiceError> {
        let Some(message) = input.into_message() else {
            warn!("message write rejected: title and body are required");
            return Err(ServiceError::Validation("title and body are required".into()));
        };
        let saved = self.repo.save(message).await?;
        info!(title_len = saved.title.len(), body_len = saved.body.len(), "message replaced");
        Ok(saved)
    }
}
