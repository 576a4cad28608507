//! Migration to create the submissions table.
//!
//! Submissions are the raw objection reports logged by sales associates.
//! They accumulate continuously and are destroyed in bulk by a reset.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Submissions::DealershipId).uuid().not_null())
                    .col(ColumnDef::new(Submissions::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Submissions::Choices)
                            .json_binary()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Comment).text().null())
                    .col(
                        ColumnDef::new(Submissions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_dealership_id")
                            .from(Submissions::Table, Submissions::DealershipId)
                            .to(Dealerships::Table, Dealerships::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Index on dealership_id: both tenant-scoped listing and the executor's
        // bulk delete (step 1) filter on this column.
        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_dealership_id")
                    .table(Submissions::Table)
                    .col(Submissions::DealershipId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_submissions_dealership_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    DealershipId,
    UserId,
    Choices,
    Comment,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Dealerships {
    Table,
    Id,
}
