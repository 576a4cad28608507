//! Migration to create the reset_configurations table.
//!
//! One row per dealership describing when its accumulated report data is
//! periodically wiped: cadence, time-of-day, and the date of the last
//! successful reset. `last_reset` is never null; new rows are seeded with a
//! sentinel date so the evaluator's date arithmetic always has a real date.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetConfigurations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetConfigurations::DealershipId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ResetConfigurations::Cadence)
                            .text()
                            .not_null()
                            .default("daily"),
                    )
                    .col(
                        ColumnDef::new(ResetConfigurations::ResetTime)
                            .text()
                            .not_null()
                            .default("12:00:00"),
                    )
                    .col(ColumnDef::new(ResetConfigurations::LastReset).date().not_null())
                    .col(
                        ColumnDef::new(ResetConfigurations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ResetConfigurations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reset_configurations_dealership_id")
                            .from(
                                ResetConfigurations::Table,
                                ResetConfigurations::DealershipId,
                            )
                            .to(Dealerships::Table, Dealerships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetConfigurations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ResetConfigurations {
    Table,
    DealershipId,
    Cadence,
    ResetTime,
    LastReset,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Dealerships {
    Table,
    Id,
}
