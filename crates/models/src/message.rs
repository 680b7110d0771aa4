use chrono::Utc;
use sea_orm::{entity::prelude::*, sea_query::OnConflict, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// The announcement table keeps a single row under this id.
pub const SINGLETON_ID: i32 = 1;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "message")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub title: String,
    pub body: String,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(title: &str, body: &str) -> Result<(), ModelError> {
    if title.is_empty() { return Err(ModelError::MissingField("title")); }
    if body.is_empty() { return Err(ModelError::MissingField("body")); }
    Ok(())
}

/// Fetch the singleton row, if it has been written.
pub async fn find_singleton<C: ConnectionTrait>(db: &C) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(SINGLETON_ID).one(db).await?)
}

/// Create or replace the singleton row in one statement
/// (`INSERT .. ON CONFLICT (id) DO UPDATE .. RETURNING`).
pub async fn upsert_singleton<C: ConnectionTrait>(db: &C, title: &str, body: &str) -> Result<Model, ModelError> {
    validate(title, body)?;
    let am = ActiveModel {
        id: Set(SINGLETON_ID),
        title: Set(title.to_string()),
        body: Set(body.to_string()),
        updated_at: Set(Utc::now().into()),
    };
    let model = Entity::insert(am)
        .on_conflict(
            OnConflict::column(Column::Id)
                .update_columns([Column::Title, Column::Body, Column::UpdatedAt])
                .to_owned(),
        )
        .exec_with_returning(db)
        .await?;
    Ok(model)
}
