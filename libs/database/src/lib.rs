//! Database library providing PostgreSQL connectivity for the feedback
//! services.
//!
//! # Examples
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let config = PostgresConfig::from_env()?;
//! let db = postgres::connect_from_config_with_retry(config, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "feedback-api").await?;
//! ```

pub mod common;
pub mod postgres;

pub use common::{RetryConfig, retry, retry_with_backoff};
