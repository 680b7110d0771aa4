use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}
