use crate::{ConfigError, FromEnv, env_parse_or_default, env_required};
use std::time::Duration;

/// Default timeout for a single embedding computation. The model call is a
/// remote operation and must never hang a worker indefinitely.
const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Configuration for the embedding model endpoint consumed by the worker.
#[derive(Clone, Debug)]
pub struct EmbeddingConfig {
    /// Base URL of the embedding model API
    pub api_url: String,
    /// Timeout applied to each embedding computation
    pub timeout: Duration,
}

impl EmbeddingConfig {
    pub fn new(api_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            api_url: api_url.into(),
            timeout,
        }
    }
}

impl FromEnv for EmbeddingConfig {
    /// Requires EMBEDDING_API_URL; EMBEDDING_TIMEOUT_SECS defaults to 30.
    fn from_env() -> Result<Self, ConfigError> {
        let api_url = env_required("EMBEDDING_API_URL")?;
        let timeout_secs =
            env_parse_or_default("EMBEDDING_TIMEOUT_SECS", DEFAULT_EMBEDDING_TIMEOUT_SECS)?;

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_config_from_env() {
        temp_env::with_vars(
            [
                ("EMBEDDING_API_URL", Some("http://localhost:9000/embed")),
                ("EMBEDDING_TIMEOUT_SECS", Some("5")),
            ],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config.api_url, "http://localhost:9000/embed");
                assert_eq!(config.timeout, Duration::from_secs(5));
            },
        );
    }

    #[test]
    fn test_embedding_config_default_timeout() {
        temp_env::with_vars(
            [
                ("EMBEDDING_API_URL", Some("http://localhost:9000/embed")),
                ("EMBEDDING_TIMEOUT_SECS", None),
            ],
            || {
                let config = EmbeddingConfig::from_env().unwrap();
                assert_eq!(config.timeout, Duration::from_secs(30));
            },
        );
    }

    #[test]
    fn test_embedding_config_requires_api_url() {
        temp_env::with_var_unset("EMBEDDING_API_URL", || {
            let err = EmbeddingConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("EMBEDDING_API_URL"));
        });
    }

    #[test]
    fn test_embedding_config_invalid_timeout() {
        temp_env::with_vars(
            [
                ("EMBEDDING_API_URL", Some("http://localhost:9000/embed")),
                ("EMBEDDING_TIMEOUT_SECS", Some("soon")),
            ],
            || {
                assert!(EmbeddingConfig::from_env().is_err());
            },
        );
    }
}
