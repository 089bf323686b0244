use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use crate::config::AppConfig;
use crate::core::fixture::Fixture;
use crate::core::source::DataSource;

mod fixture;
mod http;

pub use fixture::FixtureSource;
pub use http::HttpSource;

/// Build the data source the configuration asks for.
///
/// Mode is decided exactly once, here; call sites only ever see the
/// [`DataSource`] contract.
pub fn from_config(config: &AppConfig) -> Result<Arc<dyn DataSource>> {
    if config.mock {
        tracing::info!(delay_ms = config.mock_delay_ms, "using fixture data source");
        let source = FixtureSource::new(Fixture::demo())
            .with_delay(Duration::from_millis(config.mock_delay_ms));
        return Ok(Arc::new(source));
    }

    tracing::info!(base_url = %config.api_base_url, "using live data source");
    let source = HttpSource::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    Ok(Arc::new(source))
}
