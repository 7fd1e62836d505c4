use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Orders: "my orders" lookups are by owner, newest first
        manager
            .create_index(
                Index::create()
                    .name("idx_orders_account_created")
                    .table(Orders::Table)
                    .col(Orders::AccountId)
                    .col(Orders::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_orders_status")
                    .table(Orders::Table)
                    .col(Orders::Status)
                    .to_owned(),
            )
            .await?;

        // Dish: menu filters
        manager
            .create_index(
                Index::create()
                    .name("idx_dish_category")
                    .table(Dish::Table)
                    .col(Dish::Category)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_orders_account_created").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_orders_status").table(Orders::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_dish_category").table(Dish::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Orders { Table, AccountId, CreatedAt, Status }

#[derive(DeriveIden)]
enum Dish { Table, Category }
