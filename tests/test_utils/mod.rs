//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations for testing purposes, plus direct SQL fixture helpers.

use anyhow::Result;
use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement, Value};
use std::sync::Arc;
use uuid::Uuid;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;

    // SQLite does not enforce our Postgres foreign key semantics; disable FK
    // checks to allow inserting fixture data that may not satisfy cross-table
    // relations in tests.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = OFF".to_string(),
    ))
    .await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
#[allow(dead_code)]
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// Creates a test dealership, returning its ID.
#[allow(dead_code)]
pub async fn create_test_dealership(
    db: &DatabaseConnection,
    dealership_id: Option<Uuid>,
) -> Result<Uuid> {
    let id = dealership_id.unwrap_or_else(Uuid::new_v4);

    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO dealerships (id, name) VALUES (?, ?)",
        vec![Value::from(id), Value::from("Test Dealership")],
    );
    db.execute(stmt).await?;

    Ok(id)
}

/// Inserts a profile row directly for testing, returning its ID.
#[allow(dead_code)]
pub async fn insert_profile(
    db: &DatabaseConnection,
    dealership_id: Uuid,
    role: &str,
) -> Result<Uuid> {
    let id = Uuid::new_v4();
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO profiles (id, dealership_id, role) VALUES (?, ?, ?)",
        vec![Value::from(id), Value::from(dealership_id), Value::from(role)],
    );
    db.execute(stmt).await?;

    Ok(id)
}

/// Inserts a submission row directly for testing.
#[allow(dead_code)]
pub async fn insert_submission(
    db: &DatabaseConnection,
    dealership_id: Uuid,
    user_id: Uuid,
) -> Result<()> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO submissions (id, dealership_id, user_id, choices) VALUES (?, ?, ?, ?)",
        vec![
            Value::from(Uuid::new_v4()),
            Value::from(dealership_id),
            Value::from(user_id),
            Value::from(r#"["price"]"#),
        ],
    );
    db.execute(stmt).await?;

    Ok(())
}

/// Inserts a choice total row directly for testing.
#[allow(dead_code)]
pub async fn insert_choice_total(
    db: &DatabaseConnection,
    user_id: Uuid,
    choice: &str,
    total: i64,
) -> Result<()> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO user_choice_totals (id, user_id, choice, total) VALUES (?, ?, ?, ?)",
        vec![
            Value::from(Uuid::new_v4()),
            Value::from(user_id),
            Value::from(choice),
            Value::from(total),
        ],
    );
    db.execute(stmt).await?;

    Ok(())
}

/// Inserts a reset configuration row directly for testing.
#[allow(dead_code)]
pub async fn insert_reset_configuration(
    db: &DatabaseConnection,
    dealership_id: Uuid,
    cadence: &str,
    reset_time: &str,
    last_reset: NaiveDate,
) -> Result<()> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        "INSERT INTO reset_configurations (dealership_id, cadence, reset_time, last_reset) \
         VALUES (?, ?, ?, ?)",
        vec![
            Value::from(dealership_id),
            Value::from(cadence),
            Value::from(reset_time),
            Value::from(last_reset.to_string()),
        ],
    );
    db.execute(stmt).await?;

    Ok(())
}

/// Counts rows returned by the given query.
#[allow(dead_code)]
pub async fn count_rows(db: &DatabaseConnection, sql: &str) -> Result<i64> {
    let row = db
        .query_one(Statement::from_string(
            db.get_database_backend(),
            sql.to_string(),
        ))
        .await?
        .ok_or_else(|| anyhow::anyhow!("count query returned no rows"))?;

    Ok(row.try_get_by_index::<i64>(0)?)
}
