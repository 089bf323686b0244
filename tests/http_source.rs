use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use etlmon::core::fixture::Fixture;
use etlmon::core::source::DataSource;
use etlmon::sources::HttpSource;
use etlmon::web;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Serve the fixture API on an ephemeral port, returning its base URL.
async fn spawn_fixture_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = web::router(Arc::new(Fixture::demo()));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}/api")
}

#[tokio::test]
async fn dashboard_decodes_the_reference_snapshot() {
    let base = spawn_fixture_api().await;
    let source = HttpSource::new(base, TIMEOUT).unwrap();

    let snapshot = source.dashboard().await.unwrap();
    assert_eq!(snapshot.kpis.total_records, 80601);
    assert_eq!(snapshot.kpis.success_records, 79985);
    assert_eq!(snapshot.kpis.error_records, 616);
    assert_eq!(snapshot.time_series.len(), 6);
    assert_eq!(snapshot.recent_executions.len(), 5);
}

#[tokio::test]
async fn limit_is_forwarded_as_a_query_parameter() {
    let base = spawn_fixture_api().await;
    let source = HttpSource::new(base, TIMEOUT).unwrap();

    let limited = source.executions(Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].id, "exec-001");
    assert_eq!(limited[1].id, "exec-002");

    let all = source.executions(None).await.unwrap();
    assert_eq!(all.len(), 6);
}

#[tokio::test]
async fn single_execution_roundtrips_and_unknown_ids_fail() {
    let base = spawn_fixture_api().await;
    let source = HttpSource::new(base, TIMEOUT).unwrap();

    let found = source.execution("exec-002").await.unwrap();
    assert_eq!(found.records_success, 14750);
    assert_eq!(found.records_error, 140);

    assert!(source.execution("exec-999").await.is_err());
}

#[tokio::test]
async fn trigger_posts_and_decodes_the_receipt() {
    let base = spawn_fixture_api().await;
    let source = HttpSource::new(base, TIMEOUT).unwrap();

    let receipt = source.trigger().await.unwrap();
    assert_eq!(receipt.message, "ETL execution started");
    assert!(!receipt.execution_id.is_empty());
}

#[tokio::test]
async fn connection_refused_surfaces_as_an_error() {
    // Grab a free port, then release it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = HttpSource::new(format!("http://{addr}/api"), TIMEOUT).unwrap();
    assert!(source.dashboard().await.is_err());
}

#[tokio::test]
async fn malformed_body_surfaces_as_an_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/api/dashboard", get(|| async { "not json" }));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let source = HttpSource::new(format!("http://{addr}/api"), TIMEOUT).unwrap();
    assert!(source.dashboard().await.is_err());
}
