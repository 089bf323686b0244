use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

use crate::core::models::{DashboardSnapshot, EtlExecution, TriggerReceipt};
use crate::core::source::{DataSource, SourceResult};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Live-mode data source over the pipeline's HTTP API.
///
/// The client is configured once at construction (base URL, timeout,
/// JSON content type) and read-only afterwards. No retries happen here;
/// retry is a caller decision.
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base_url: String = base_url.into();
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl DataSource for HttpSource {
    async fn dashboard(&self) -> SourceResult<DashboardSnapshot> {
        let response = self
            .client
            .get(self.url("/dashboard"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn executions(&self, limit: Option<u32>) -> SourceResult<Vec<EtlExecution>> {
        let mut request = self.client.get(self.url("/etl/executions"));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json().await?)
    }

    async fn execution(&self, id: &str) -> SourceResult<EtlExecution> {
        let response = self
            .client
            .get(self.url(&format!("/etl/executions/{id}")))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }

    async fn trigger(&self) -> SourceResult<TriggerReceipt> {
        let response = self
            .client
            .post(self.url("/etl/trigger"))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}
