//! Configuration for the Feedback API

use core_config::{AppInfo, FromEnv, app_info, env_required, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 8080;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Base URL of the embedding worker the intake path signals
    pub worker_url: String,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let server = ServerConfig::from_env_with_default_port(DEFAULT_PORT)?;
        let worker_url = env_required("EMBEDDING_WORKER_URL")?;

        Ok(Self {
            app: app_info!(),
            postgres,
            server,
            environment,
            worker_url,
        })
    }
}
