//! Reset configuration entity model
//!
//! This module contains the SeaORM entity model for the reset_configurations
//! table: one row per dealership describing when its report data is wiped.

use super::dealership::Entity as Dealership;
use chrono::NaiveTime;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Reset configuration entity, keyed by dealership
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reset_configurations")]
pub struct Model {
    /// Dealership the configuration belongs to (primary key, one row each)
    #[sea_orm(primary_key, auto_increment = false)]
    pub dealership_id: Uuid,

    /// Reset cadence (daily|weekly|monthly|yearly), stored as text
    pub cadence: String,

    /// Time-of-day for the reset as HH:MM:SS text
    pub reset_time: String,

    /// Calendar date of the most recent successful reset (never null; a
    /// sentinel date is written when the row is first created)
    pub last_reset: Date,

    /// Timestamp when the configuration was created
    pub created_at: DateTimeWithTimeZone,

    /// Timestamp of the last configuration change or reset stamp
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Parse the stored HH:MM:SS text into a time-of-day.
    ///
    /// Returns `None` when the stored text is malformed; callers treat that
    /// row as never due rather than failing the whole sweep.
    pub fn reset_time_of_day(&self) -> Option<NaiveTime> {
        NaiveTime::parse_from_str(&self.reset_time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(&self.reset_time, "%H:%M"))
            .ok()
    }
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
