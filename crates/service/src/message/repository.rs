use async_trait::async_trait;

use super::domain::Message;
use crate::errors::ServiceError;

/// Persistence abstraction for the singleton message.
/// Implementations must never hold more than one record and must replace it
/// wholesale on `save`.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
    async fn load(&self) -> Result<Option<Message>, ServiceError>;
    async fn save(&self, message: Message) -> Result<Message, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockMessageRepository {
        current: Mutex<Option<Message>>,
        fail_io: AtomicBool,
        saves: AtomicUsize,
    }

    impl MockMessageRepository {
        /// Make subsequent loads and saves fail as if the medium were down.
        pub fn set_failing(&self, failing: bool) {
            self.fail_io.store(failing, Ordering::SeqCst);
        }

        /// Number of successful saves so far.
        pub fn saves(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MessageRepository for MockMessageRepository {
        fn backend(&self) -> &'static str { "memory" }

        async fn load(&self) -> Result<Option<Message>, ServiceError> {
            if self.fail_io.load(Ordering::SeqCst) {
                return Err(ServiceError::Io("storage unavailable".into()));
            }
            Ok(self.current.lock().unwrap().clone())
        }

        async fn save(&self, message: Message) -> Result<Message, ServiceError> {
            if self.fail_io.load(Ordering::SeqCst) {
                return Err(ServiceError::Io("storage unavailable".into()));
            }
            *self.current.lock().unwrap() = Some(message.clone());
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(message)
        }
    }
}
