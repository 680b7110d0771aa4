use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::message::domain::Message;
use crate::message::repository::MessageRepository;

/// Database-backed message repository; the singleton is a fixed-id row.
pub struct SeaOrmMessageRepository {
    pub db: DatabaseConnection,
}

#[async_trait::async_trait]
impl MessageRepository for SeaOrmMessageRepository {
    fn backend(&self) -> &'static str { "database" }

    async fn load(&self) -> Result<Option<Message>, ServiceError> {
        let res = models::message::find_singleton(&self.db).await?;
        Ok(res.map(|m| Message { title: m.title, body: m.body }))
    }

    async fn save(&self, message: Message) -> Result<Message, ServiceError> {
        let m = models::message::upsert_singleton(&self.db, &message.title, &message.body).await?;
        Ok(Message { title: m.title, body: m.body })
    }
}
