use std::sync::Arc;

use crate::config::AppConfig;
use crate::core::source::DataSource;

#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn DataSource>,
}

impl AppContext {
    pub fn new(config: AppConfig, source: Arc<dyn DataSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }
}
