//! Submission entity model
//!
//! This module contains the SeaORM entity model for the submissions table,
//! which stores the objection reports logged by sales associates. Rows
//! accumulate continuously and are only destroyed in bulk by a reset.

use super::dealership::Entity as Dealership;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;
use serde_json::Value as JsonValue;

/// Submission entity representing a single logged customer objection
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "submissions")]
pub struct Model {
    /// Unique identifier for the submission (primary key)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Dealership the submission belongs to
    pub dealership_id: Uuid,

    /// Profile of the associate who logged the objection
    pub user_id: Uuid,

    /// Objection choices selected on the form (JSON array of strings)
    #[sea_orm(column_type = "JsonBinary")]
    pub choices: JsonValue,

    /// Free-form comment (optional)
    pub comment: Option<String>,

    /// Timestamp when the submission was logged
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Dealership",
        from = "Column::DealershipId",
        to = "super::dealership::Column::Id"
    )]
    Dealership,
}

impl Related<Dealership> for Entity {
    fn to() -> RelationDef {
        Relation::Dealership.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
