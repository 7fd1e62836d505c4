//! Create `orders` table with FK to `account`.
//!
//! Line items are stored inline as a JSONB array of price snapshots, so an
//! order is persisted with a single row write.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Orders::Table)
                    .if_not_exists()
                    .col(uuid(Orders::Id).primary_key())
                    .col(uuid(Orders::AccountId).not_null())
                    .col(json_binary(Orders::Items).not_null())
                    .col(decimal_len(Orders::TotalAmount, 12, 2).not_null())
                    .col(string_len(Orders::PaymentMethod, 16).not_null())
                    .col(string_len(Orders::PaymentStatus, 16).not_null())
                    .col(string_len(Orders::Status, 32).not_null())
                    .col(timestamp_with_time_zone(Orders::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Orders::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_account")
                            .from(Orders::Table, Orders::AccountId)
                            .to(Account::Table, Account::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Orders::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Orders {
    Table,
    Id,
    AccountId,
    Items,
    TotalAmount,
    PaymentMethod,
    PaymentStatus,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Account { Table, Id }
