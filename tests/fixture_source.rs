use std::time::{Duration, Instant};

use etlmon::core::fixture::{Fixture, RECENT_EXECUTIONS_CAP};
use etlmon::core::source::DataSource;
use etlmon::sources::FixtureSource;
use tokio::time::timeout;

fn instant_source() -> FixtureSource {
    FixtureSource::new(Fixture::demo()).with_delay(Duration::ZERO)
}

#[tokio::test]
async fn dashboard_snapshot_matches_reference_totals() {
    let source = instant_source();
    let snapshot = source.dashboard().await.unwrap();

    assert_eq!(snapshot.kpis.total_records, 80601);
    assert_eq!(snapshot.kpis.success_records, 79985);
    assert_eq!(snapshot.kpis.error_records, 616);
    assert!((snapshot.kpis.success_rate - 99.24).abs() < 0.01);

    assert_eq!(snapshot.time_series.len(), 6);
    assert_eq!(snapshot.time_series[0].date.to_string(), "2024-02-05");
    assert_eq!(snapshot.time_series[5].date.to_string(), "2024-02-10");

    let distributed: u64 = snapshot.status_distribution.iter().map(|s| s.value).sum();
    assert_eq!(distributed, snapshot.kpis.total_records);

    assert_eq!(snapshot.recent_executions.len(), RECENT_EXECUTIONS_CAP);
}

#[tokio::test]
async fn repeated_fetches_yield_identical_snapshots() {
    let source = instant_source();

    let first = source.dashboard().await.unwrap();
    let second = source.dashboard().await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn limit_truncates_history_to_leading_records() {
    let source = instant_source();

    let limited = source.executions(Some(5)).await.unwrap();
    assert_eq!(limited.len(), 5);
    assert_eq!(limited[0].id, "exec-001");
    assert_eq!(limited[4].id, "exec-005");

    let oversized = source.executions(Some(10)).await.unwrap();
    assert_eq!(oversized.len(), 6);

    let none = source.executions(Some(0)).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn unlimited_fetch_returns_all_records_in_source_order() {
    let source = instant_source();
    let records = source.executions(None).await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        ["exec-001", "exec-002", "exec-003", "exec-004", "exec-005", "exec-006"]
    );
}

#[tokio::test]
async fn execution_lookup_by_id() {
    let source = instant_source();

    let found = source.execution("exec-004").await.unwrap();
    assert_eq!(found.records_error, 476);

    let missing = source.execution("exec-999").await;
    assert!(missing.is_err());
}

#[tokio::test]
async fn trigger_returns_a_fresh_receipt() {
    let source = instant_source();

    let first = source.trigger().await.unwrap();
    let second = source.trigger().await.unwrap();

    assert_eq!(first.message, "ETL execution started");
    assert!(!first.execution_id.is_empty());
    assert_ne!(first.execution_id, second.execution_id);
}

#[tokio::test]
async fn simulated_delay_is_applied() {
    let source = FixtureSource::new(Fixture::demo()).with_delay(Duration::from_millis(100));

    let start = Instant::now();
    timeout(Duration::from_secs(1), source.dashboard())
        .await
        .expect("timeout waiting for fixture response")
        .unwrap();

    assert!(start.elapsed() >= Duration::from_millis(100));
}

#[tokio::test]
async fn injected_fixture_replaces_the_demo_dataset() {
    let mut fixture = Fixture::demo();
    fixture.executions.truncate(2);
    let source = FixtureSource::new(fixture).with_delay(Duration::ZERO);

    let records = source.executions(None).await.unwrap();
    assert_eq!(records.len(), 2);

    // The demo dataset is untouched by the truncated copy.
    assert_eq!(Fixture::demo().executions.len(), 6);
}
