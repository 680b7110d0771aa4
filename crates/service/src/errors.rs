use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("storage error: {0}")]
    Io(String),
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::MissingField(field) => Self::Validation(format!("{field} is required")),
            models::errors::ModelError::Db(db) => Self::Db(db.to_string()),
        }
    }
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Whether the failure came from the persistence medium rather than the input.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Db(_) | Self::Io(_))
    }
}
