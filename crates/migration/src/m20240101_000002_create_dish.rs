//! Create `dish` table (menu catalog).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dish::Table)
                    .if_not_exists()
                    .col(uuid(Dish::Id).primary_key())
                    .col(string_len(Dish::Name, 128).not_null())
                    .col(string_len(Dish::DishType, 16).not_null())
                    .col(decimal_len(Dish::Price, 10, 2).not_null())
                    .col(text(Dish::Description).not_null())
                    .col(string_len(Dish::Image, 1024).not_null())
                    .col(string_len(Dish::Category, 64).not_null())
                    .col(boolean(Dish::Available).not_null().default(true))
                    .col(timestamp_with_time_zone(Dish::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Dish::UpdatedAt).not_null())
                    .check(Expr::col(Dish::Price).gt(0))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Dish::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Dish {
    Table,
    Id,
    Name,
    DishType,
    Price,
    Description,
    Image,
    Category,
    Available,
    CreatedAt,
    UpdatedAt,
}
