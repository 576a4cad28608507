//! End-to-end reset behavior against direct SQL fixtures: dealership
//! isolation, idempotent re-execution, and the sweep over mixed schedules.

use anyhow::Result;
use chrono::{NaiveDate, NaiveTime};
use std::sync::Arc;
use uuid::Uuid;

use resets::config::AppConfig;
use resets::models::reset_configuration::Entity as ResetConfiguration;
use resets::reset::{ResetExecutor, ResetSweep, SENTINEL_LAST_RESET};
use sea_orm::EntityTrait;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{
    count_rows, create_test_dealership, insert_choice_total, insert_profile,
    insert_reset_configuration, insert_submission, setup_test_db,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[tokio::test]
async fn reset_touches_only_the_target_dealership() -> Result<()> {
    let db = setup_test_db().await?;

    let dealership_a = create_test_dealership(&db, None).await?;
    let dealership_b = create_test_dealership(&db, None).await?;

    let user_a = insert_profile(&db, dealership_a, "associate").await?;
    let user_b = insert_profile(&db, dealership_b, "associate").await?;

    insert_submission(&db, dealership_a, user_a).await?;
    insert_submission(&db, dealership_a, user_a).await?;
    insert_submission(&db, dealership_b, user_b).await?;
    insert_choice_total(&db, user_a, "price", 2).await?;
    insert_choice_total(&db, user_b, "price", 1).await?;
    insert_reset_configuration(&db, dealership_a, "daily", "12:00:00", SENTINEL_LAST_RESET).await?;
    insert_reset_configuration(&db, dealership_b, "daily", "12:00:00", SENTINEL_LAST_RESET).await?;

    let executor = ResetExecutor::new(&db);
    let outcome = executor.execute(dealership_a, date(2024, 6, 10)).await?;
    assert!(outcome.stamp_updated());
    assert_eq!(outcome.reset_date(), date(2024, 6, 10));

    // Dealership B's data and schedule are untouched.
    assert_eq!(count_rows(&db, "SELECT COUNT(*) FROM submissions").await?, 1);
    assert_eq!(
        count_rows(&db, "SELECT COUNT(*) FROM user_choice_totals").await?,
        1
    );

    let config_a = ResetConfiguration::find_by_id(dealership_a)
        .one(&db)
        .await?
        .expect("config a exists");
    assert_eq!(config_a.last_reset, date(2024, 6, 10));

    let config_b = ResetConfiguration::find_by_id(dealership_b)
        .one(&db)
        .await?
        .expect("config b exists");
    assert_eq!(config_b.last_reset, SENTINEL_LAST_RESET);

    Ok(())
}

#[tokio::test]
async fn repeated_execution_succeeds_on_empty_data() -> Result<()> {
    let db = setup_test_db().await?;

    let dealership_id = create_test_dealership(&db, None).await?;
    let user_id = insert_profile(&db, dealership_id, "associate").await?;
    insert_submission(&db, dealership_id, user_id).await?;
    insert_reset_configuration(&db, dealership_id, "daily", "12:00:00", SENTINEL_LAST_RESET)
        .await?;

    let executor = ResetExecutor::new(&db);
    let first = executor.execute(dealership_id, date(2024, 6, 10)).await?;
    assert!(first.stamp_updated());

    // Re-running against already-cleared data is a no-op that still succeeds.
    let second = executor.execute(dealership_id, date(2024, 6, 10)).await?;
    assert!(second.stamp_updated());
    assert_eq!(count_rows(&db, "SELECT COUNT(*) FROM submissions").await?, 0);

    Ok(())
}

#[tokio::test]
async fn executor_succeeds_without_configuration_row() -> Result<()> {
    let db = setup_test_db().await?;

    let dealership_id = create_test_dealership(&db, None).await?;
    let user_id = insert_profile(&db, dealership_id, "associate").await?;
    insert_submission(&db, dealership_id, user_id).await?;

    // A dealership reset manually before ever saving a schedule has no
    // configuration row; the stamp update matches zero rows and the reset
    // still completes.
    let executor = ResetExecutor::new(&db);
    let outcome = executor.execute(dealership_id, date(2024, 6, 10)).await?;
    assert!(outcome.stamp_updated());
    assert_eq!(count_rows(&db, "SELECT COUNT(*) FROM submissions").await?, 0);

    Ok(())
}

#[tokio::test]
async fn sweep_handles_mixed_schedules() -> Result<()> {
    let db = setup_test_db().await?;

    // Due: daily schedule last reset yesterday, reset time already passed.
    let due_daily = create_test_dealership(&db, None).await?;
    insert_reset_configuration(&db, due_daily, "daily", "08:00:00", date(2024, 6, 9)).await?;

    // Not due: weekly schedule reset three days ago.
    let fresh_weekly = create_test_dealership(&db, None).await?;
    insert_reset_configuration(&db, fresh_weekly, "weekly", "08:00:00", date(2024, 6, 7)).await?;

    // Due: weekly schedule whose reset day count reached seven.
    let due_weekly = create_test_dealership(&db, None).await?;
    insert_reset_configuration(&db, due_weekly, "weekly", "08:00:00", date(2024, 6, 4)).await?;

    // Skipped quietly: unknown cadence text.
    let bad_cadence = create_test_dealership(&db, None).await?;
    insert_reset_configuration(&db, bad_cadence, "sometimes", "08:00:00", date(2024, 1, 1)).await?;

    let sweep = ResetSweep::new(Arc::new(AppConfig::default()), Arc::new(db.clone()));
    let now = date(2024, 6, 10).and_time(NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"));
    let report = sweep.run(now).await?;

    assert_eq!(report.processed, 2);
    assert_eq!(report.successful, 2);
    assert_eq!(report.failed, 0);

    let reset_ids: Vec<Uuid> = report
        .details
        .iter()
        .map(|detail| detail.dealership_id)
        .collect();
    assert!(reset_ids.contains(&due_daily));
    assert!(reset_ids.contains(&due_weekly));
    assert!(!reset_ids.contains(&fresh_weekly));
    assert!(!reset_ids.contains(&bad_cadence));

    // The due dealerships are stamped with the sweep date.
    for id in [due_daily, due_weekly] {
        let config = ResetConfiguration::find_by_id(id)
            .one(&db)
            .await?
            .expect("config exists");
        assert_eq!(config.last_reset, date(2024, 6, 10));
    }

    Ok(())
}

#[tokio::test]
async fn sweep_pages_through_every_configuration() -> Result<()> {
    let db = setup_test_db().await?;

    let mut dealerships = Vec::new();
    for _ in 0..5 {
        let dealership_id = create_test_dealership(&db, None).await?;
        insert_reset_configuration(&db, dealership_id, "daily", "00:00:00", SENTINEL_LAST_RESET)
            .await?;
        dealerships.push(dealership_id);
    }

    // A batch size smaller than the table forces multiple pages; every due
    // configuration must still be reset in one run, with none left behind.
    let config = AppConfig {
        sweep: resets::config::SweepConfig { batch_size: 2 },
        ..Default::default()
    };

    let sweep = ResetSweep::new(Arc::new(config), Arc::new(db.clone()));
    let now = date(2024, 6, 10).and_time(NaiveTime::from_hms_opt(12, 0, 0).expect("valid time"));
    let report = sweep.run(now).await?;

    assert_eq!(report.processed, 5);
    assert_eq!(report.successful, 5);

    for id in dealerships {
        let config = ResetConfiguration::find_by_id(id)
            .one(&db)
            .await?
            .expect("config exists");
        assert_eq!(config.last_reset, date(2024, 6, 10));
    }

    // A second trigger at the same instant finds everything freshly stamped.
    let config = AppConfig {
        sweep: resets::config::SweepConfig { batch_size: 2 },
        ..Default::default()
    };
    let sweep = ResetSweep::new(Arc::new(config), Arc::new(db.clone()));
    let second = sweep.run(now).await?;
    assert_eq!(second.processed, 0);

    Ok(())
}
