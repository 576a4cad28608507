//! Migration to create the profiles table.
//!
//! Profiles are the per-dealership users: sales associates submit objections,
//! managers own the reset configuration and may force resets.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Profiles::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Profiles::DealershipId).uuid().not_null())
                    .col(ColumnDef::new(Profiles::FullName).text().null())
                    .col(
                        ColumnDef::new(Profiles::Role)
                            .text()
                            .not_null()
                            .default("associate"),
                    )
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_dealership_id")
                            .from(Profiles::Table, Profiles::DealershipId)
                            .to(Dealerships::Table, Dealerships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on dealership_id for the executor's user enumeration (step 2)
        manager
            .create_index(
                Index::create()
                    .name("idx_profiles_dealership_id")
                    .table(Profiles::Table)
                    .col(Profiles::DealershipId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_profiles_dealership_id").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    DealershipId,
    FullName,
    Role,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Dealerships {
    Table,
    Id,
}
