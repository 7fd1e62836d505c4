//! Create `account` table.
//!
//! Stores customers and admins. Email is unique; the federated id is unique
//! only among rows that carry one (Postgres treats NULLs as distinct).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Email, 255).unique_key().not_null())
                    .col(string_len_null(Account::PasswordHash, 255))
                    .col(string_len(Account::DisplayName, 128).not_null())
                    .col(string_len(Account::Role, 16).not_null())
                    .col(string_len_null(Account::PhoneNumber, 32))
                    .col(string_len_null(Account::PhotoUrl, 1024))
                    .col(string_len_null(Account::FederatedId, 128).unique_key())
                    .col(json_binary_null(Account::Address))
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Account::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account {
    Table,
    Id,
    Email,
    PasswordHash,
    DisplayName,
    Role,
    PhoneNumber,
    PhotoUrl,
    FederatedId,
    Address,
    CreatedAt,
    UpdatedAt,
}
