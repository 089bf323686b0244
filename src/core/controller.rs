//! Loading-state controllers for asynchronously fetched resources.
//!
//! A `ResourceController` owns the lifecycle of one fetched value: pending,
//! settled-with-data, or settled-with-error, plus manual refetch and an
//! optional periodic auto-refresh. It is shared by cloning; all clones see
//! the same state.
//!
//! Overlapping `load()` calls are not deduplicated. Each attempt takes a
//! ticket from a monotonically increasing counter and only the latest issued
//! attempt may apply its result; stale settlements are discarded. Teardown
//! cancels the refresh task and turns any still-in-flight settlement into a
//! no-op.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use super::models::{DashboardSnapshot, EtlExecution};
use super::source::{DataSource, SourceResult};

pub type FetchFuture<T> = Pin<Box<dyn Future<Output = SourceResult<T>> + Send>>;
type FetchFn<T> = Arc<dyn Fn() -> FetchFuture<T> + Send + Sync>;

/// Observable state of one fetched resource.
///
/// `error` is cleared at the start of every attempt, so a current error and
/// an in-flight load are never persisted together. `data` survives a failed
/// refresh; it only changes on a successful settlement.
#[derive(Debug, Clone)]
pub struct ResourceState<T> {
    pub data: Option<T>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            data: None,
            is_loading: false,
            error: None,
        }
    }
}

impl<T> ResourceState<T> {
    pub fn is_settled(&self) -> bool {
        !self.is_loading
    }
}

pub struct ResourceController<T> {
    label: &'static str,
    fetch: FetchFn<T>,
    state: Arc<RwLock<ResourceState<T>>>,
    issued: Arc<AtomicU64>,
    cancel: CancellationToken,
}

impl<T> Clone for ResourceController<T> {
    fn clone(&self) -> Self {
        Self {
            label: self.label,
            fetch: Arc::clone(&self.fetch),
            state: Arc::clone(&self.state),
            issued: Arc::clone(&self.issued),
            cancel: self.cancel.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ResourceController<T> {
    pub fn new(label: &'static str, fetch: FetchFn<T>) -> Self {
        Self {
            label,
            fetch,
            state: Arc::new(RwLock::new(ResourceState::default())),
            issued: Arc::new(AtomicU64::new(0)),
            cancel: CancellationToken::new(),
        }
    }

    /// Run one fetch attempt and apply its outcome.
    ///
    /// On failure the previous data is kept and only `error` is set. A
    /// result settling after `shutdown()`, or after a newer attempt was
    /// issued, is dropped without touching state.
    pub async fn load(&self) {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;

        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.error = None;
        }

        let result = (self.fetch)().await;

        if self.cancel.is_cancelled() {
            tracing::debug!(resource = self.label, "discarding fetch settled after shutdown");
            return;
        }

        let mut state = self.state.write().await;
        if ticket != self.issued.load(Ordering::SeqCst) {
            tracing::debug!(resource = self.label, ticket, "discarding stale fetch result");
            return;
        }

        match result {
            Ok(data) => {
                state.data = Some(data);
                state.is_loading = false;
                state.error = None;
                tracing::debug!(resource = self.label, "fetch settled");
            }
            Err(e) => {
                state.is_loading = false;
                state.error = Some(format!("Failed to load {}: {}", self.label, e));
                tracing::warn!(resource = self.label, error = %e, "fetch failed");
            }
        }
    }

    /// Manual retry, exposed to the presentation layer.
    pub async fn refetch(&self) {
        self.load().await;
    }

    /// Snapshot of the current state.
    pub async fn state(&self) -> ResourceState<T> {
        self.state.read().await.clone()
    }

    /// Invoke `load()` on a fixed period until `shutdown()`.
    ///
    /// The interval's immediate first tick is swallowed; the initial load is
    /// the caller's explicit call on activation.
    pub fn spawn_auto_refresh(&self, period: Duration) -> JoinHandle<()> {
        let ctl = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = ctl.cancel.cancelled() => break,
                    _ = ticker.tick() => ctl.load().await,
                }
            }
            tracing::debug!(resource = ctl.label, "auto-refresh stopped");
        })
    }

    /// Tear the controller down: stops auto-refresh and turns in-flight
    /// settlements into no-ops. Idempotent.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl ResourceController<DashboardSnapshot> {
    pub fn dashboard(source: Arc<dyn DataSource>) -> Self {
        Self::new(
            "dashboard",
            Arc::new(move || {
                let source = Arc::clone(&source);
                Box::pin(async move { source.dashboard().await })
            }),
        )
    }
}

impl ResourceController<Vec<EtlExecution>> {
    pub fn executions(source: Arc<dyn DataSource>, limit: Option<u32>) -> Self {
        Self::new(
            "execution history",
            Arc::new(move || {
                let source = Arc::clone(&source);
                Box::pin(async move { source.executions(limit).await })
            }),
        )
    }
}
