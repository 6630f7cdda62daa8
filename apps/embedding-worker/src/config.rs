//! Configuration for the embedding worker

use core_config::{AppInfo, FromEnv, app_info, embedding::EmbeddingConfig, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

const DEFAULT_PORT: u16 = 8081;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub postgres: PostgresConfig,
    pub embedding: EmbeddingConfig,
    pub server: ServerConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let postgres = PostgresConfig::from_env()?;
        let embedding = EmbeddingConfig::from_env()?;
        let server = ServerConfig::from_env_with_default_port(DEFAULT_PORT)?;

        Ok(Self {
            app: app_info!(),
            postgres,
            embedding,
            server,
            environment,
        })
    }
}
