//! Create `message` table.
//!
//! Holds at most one row: the primary key is pinned by the application and
//! a check constraint rejects any other id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Message::Table)
                    .if_not_exists()
                    .col(integer(Message::Id).primary_key())
                    .col(text(Message::Title).not_null())
                    .col(text(Message::Body).not_null())
                    .col(timestamp_with_time_zone(Message::UpdatedAt).not_null())
                    .check(Expr::col(Message::Id).eq(1))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Message::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Message { Table, Id, Title, Body, UpdatedAt }
