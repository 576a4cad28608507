//! Migration to create the user_choice_totals table.
//!
//! Per-user aggregate counts of objection choices, derived from submissions.
//! Rows are keyed by (user_id, choice) and wiped alongside submissions during
//! a reset.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserChoiceTotals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserChoiceTotals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserChoiceTotals::UserId).uuid().not_null())
                    .col(ColumnDef::new(UserChoiceTotals::Choice).text().not_null())
                    .col(
                        ColumnDef::new(UserChoiceTotals::Total)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(UserChoiceTotals::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_choice_totals_user_choice")
                    .table(UserChoiceTotals::Table)
                    .col(UserChoiceTotals::UserId)
                    .col(UserChoiceTotals::Choice)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index on user_id for the executor's bulk delete (step 3)
        manager
            .create_index(
                Index::create()
                    .name("idx_user_choice_totals_user_id")
                    .table(UserChoiceTotals::Table)
                    .col(UserChoiceTotals::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_choice_totals_user_choice")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_choice_totals_user_id")
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(UserChoiceTotals::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum UserChoiceTotals {
    Table,
    Id,
    UserId,
    Choice,
    Total,
    UpdatedAt,
}
