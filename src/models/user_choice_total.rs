//! User choice total entity model
//!
//! This module contains the SeaORM entity model for the user_choice_totals
//! table, the derived per-user aggregate statistics keyed by (user_id, choice).

use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Running per-user count of a single objection choice
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_choice_totals")]
pub struct Model {
    /// Unique identifier for the row (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Profile the total belongs to
    pub user_id: Uuid,

    /// Objection choice being counted
    pub choice: String,

    /// Number of times the choice has been selected
    pub total: i64,

    /// Timestamp when the total was last bumped
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
