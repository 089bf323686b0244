use std::path::Path;

use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "etlmon.toml";
pub const ENV_PREFIX: &str = "ETLMON_";

/// Default live endpoint for local development.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base endpoint of the live pipeline API.
    pub api_base_url: String,
    /// Resolve data from the built-in fixture instead of the live API.
    pub mock: bool,
    /// Artificial latency applied to fixture responses.
    pub mock_delay_ms: u64,
    pub request_timeout_secs: u64,
    /// Dashboard auto-refresh period. Zero disables periodic refresh.
    pub refresh_interval_secs: u64,
    /// Truncate fetched execution history to this many leading records.
    pub history_limit: Option<u32>,
    /// Port the fixture API server binds.
    pub http_port: u16,
    pub verbose: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            mock: true,
            mock_delay_ms: 600,
            request_timeout_secs: 10,
            refresh_interval_secs: 0,
            history_limit: None,
            http_port: 3000,
            verbose: false,
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, then `etlmon.toml`, then `ETLMON_*` env vars,
    /// then any CLI arguments serialized on top.
    pub fn new<A: Serialize>(args: Option<&A>) -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE), args)
    }

    pub fn load_from<A: Serialize>(config_file: &Path, args: Option<&A>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX));

        if let Some(args) = args {
            figment = figment.merge(Serialized::defaults(args));
        }

        figment.extract().context("Failed to load configuration")
    }
}
