//! Migration to create the dealerships table.
//!
//! Dealerships are the tenant boundary: every submission, profile, and reset
//! configuration belongs to exactly one dealership.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Dealerships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Dealerships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Dealerships::Name).text().null())
                    .col(
                        ColumnDef::new(Dealerships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Dealerships::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Dealerships {
    Table,
    Id,
    Name,
    CreatedAt,
}
