use async_trait::async_trait;
use thiserror::Error;

use super::models::{DashboardSnapshot, EtlExecution, TriggerReceipt};

/// Failure of a data-source operation.
///
/// Every transport-level problem (connect, timeout, non-2xx, decode) folds
/// into one generic condition; callers decide whether and how to retry.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0} not found")]
    NotFound(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

/// Uniform contract over the dashboard's data origin.
///
/// Two implementations exist: a fixture-backed source for offline/demo
/// operation and an HTTP-backed source for a live API. Selection happens
/// once at construction (`sources::from_config`), never at call sites.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch the full dashboard payload (KPIs, charts, recent executions).
    async fn dashboard(&self) -> SourceResult<DashboardSnapshot>;

    /// Fetch execution history, truncated to the `limit` leading records
    /// when one is given. Source order is preserved.
    async fn executions(&self, limit: Option<u32>) -> SourceResult<Vec<EtlExecution>>;

    /// Fetch a single execution by id.
    async fn execution(&self, id: &str) -> SourceResult<EtlExecution>;

    /// Request a manual pipeline run.
    async fn trigger(&self) -> SourceResult<TriggerReceipt>;
}
