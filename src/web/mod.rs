//! Fixture API server.
//!
//! Serves the demo fixture over the same HTTP contract the live pipeline
//! API exposes, for local development of live-mode clients and for
//! integration tests of the HTTP source.
//!
//! ## Endpoints
//!
//! - `GET /api/dashboard` - full dashboard snapshot
//! - `GET /api/etl/executions?limit={n}` - execution history
//! - `GET /api/etl/executions/{id}` - single execution
//! - `POST /api/etl/trigger` - manual pipeline trigger

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use serde::Deserialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::core::fixture::Fixture;
use crate::core::models::{DashboardSnapshot, EtlExecution, TriggerReceipt};

#[derive(Clone)]
struct ApiState {
    fixture: Arc<Fixture>,
}

/// Build the API router over the given fixture.
pub fn router(fixture: Arc<Fixture>) -> Router {
    let api = Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/etl/executions", get(list_executions))
        .route("/etl/executions/{id}", get(get_execution))
        .route("/etl/trigger", post(trigger_execution))
        .with_state(ApiState { fixture });

    Router::new().nest("/api", api)
}

/// HTTP server for the fixture API.
pub struct WebServer {
    bind_addr: SocketAddr,
    fixture: Arc<Fixture>,
    shutdown_tx: broadcast::Sender<()>,
}

impl WebServer {
    pub fn new(fixture: Arc<Fixture>, bind_addr: SocketAddr) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            bind_addr,
            fixture,
            shutdown_tx,
        }
    }

    /// Start the server. Runs until shutdown() is called.
    pub async fn start(&self) -> anyhow::Result<()> {
        let app = router(Arc::clone(&self.fixture));

        let listener = tokio::net::TcpListener::bind(self.bind_addr).await?;
        tracing::info!(addr = %self.bind_addr, "Fixture API listening");

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        Ok(())
    }

    /// Signal the server to shut down gracefully.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

async fn get_dashboard(State(state): State<ApiState>) -> Json<DashboardSnapshot> {
    Json(state.fixture.dashboard.clone())
}

#[derive(Deserialize)]
struct ListParams {
    limit: Option<usize>,
}

async fn list_executions(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Json<Vec<EtlExecution>> {
    let executions = match params.limit {
        Some(n) => state.fixture.executions.iter().take(n).cloned().collect(),
        None => state.fixture.executions.clone(),
    };
    Json(executions)
}

async fn get_execution(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<EtlExecution>, StatusCode> {
    state
        .fixture
        .executions
        .iter()
        .find(|e| e.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn trigger_execution() -> Json<TriggerReceipt> {
    Json(TriggerReceipt {
        message: "ETL execution started".to_string(),
        execution_id: Uuid::now_v7().to_string(),
    })
}
