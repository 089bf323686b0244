use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use uuid::Uuid;

use crate::core::fixture::Fixture;
use crate::core::models::{DashboardSnapshot, EtlExecution, TriggerReceipt};
use crate::core::source::{DataSource, SourceError, SourceResult};

/// Default artificial latency, roughly what a nearby API responds in.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(600);

/// Mock-mode data source resolving against an injected [`Fixture`].
///
/// Responses are delayed to mimic a network round trip so loading states
/// stay observable during offline/demo operation. Fetches never fail.
pub struct FixtureSource {
    fixture: Fixture,
    delay: Duration,
}

impl FixtureSource {
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture,
            delay: DEFAULT_DELAY,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    async fn simulate_network(&self) {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
    }
}

#[async_trait]
impl DataSource for FixtureSource {
    async fn dashboard(&self) -> SourceResult<DashboardSnapshot> {
        self.simulate_network().await;
        Ok(self.fixture.dashboard.clone())
    }

    async fn executions(&self, limit: Option<u32>) -> SourceResult<Vec<EtlExecution>> {
        self.simulate_network().await;
        let records = match limit {
            Some(n) => self
                .fixture
                .executions
                .iter()
                .take(n as usize)
                .cloned()
                .collect(),
            None => self.fixture.executions.clone(),
        };
        Ok(records)
    }

    async fn execution(&self, id: &str) -> SourceResult<EtlExecution> {
        self.simulate_network().await;
        self.fixture
            .executions
            .iter()
            .find(|e| e.id == id)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(format!("execution {id}")))
    }

    async fn trigger(&self) -> SourceResult<TriggerReceipt> {
        self.simulate_network().await;
        Ok(TriggerReceipt {
            message: "ETL execution started".to_string(),
            execution_id: Uuid::now_v7().to_string(),
        })
    }
}
