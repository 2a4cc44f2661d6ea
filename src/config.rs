//! Layered application configuration.
//!
//! Sources, lowest to highest precedence:
//! 1. Built-in defaults
//! 2. `tasksense.toml` in the working directory, when present
//! 3. `TASKSENSE_*` environment variables (`__` separates nested keys)
//!
//! `TASKSENSE_ALLOWED_ORIGINS` accepts either a TOML-style list or a
//! comma-separated string.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;
use thiserror::Error;

/// Name of the optional configuration file.
pub const CONFIG_FILE: &str = "tasksense.toml";

/// Prefix shared by every configuration environment variable.
pub const ENV_PREFIX: &str = "TASKSENSE_";

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment could not merge or extract the sources.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A field holds a value the server cannot use.
    #[error("invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Deployment environment, e.g. `development` or `production`.
    pub environment: String,
    /// `PostgreSQL` URL; the in-memory store is used when absent.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub database_pool_size: u32,
    /// Origins admitted by CORS.
    #[serde(deserialize_with = "list_or_csv")]
    pub allowed_origins: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 3000,
            environment: "development".to_owned(),
            database_url: None,
            database_pool_size: 8,
            allowed_origins: vec!["http://localhost:3000".to_owned()],
        }
    }
}

impl AppConfig {
    /// Loads configuration from every source.
    ///
    /// Does not read `.env`; the binary does that before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed and
    /// [`ConfigError::InvalidValue`] when a value is unusable.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Builds the provider chain.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if Path::new(CONFIG_FILE).exists() {
            figment = figment.merge(Toml::file(CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns `true` when running in production.
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.database_pool_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database_pool_size",
                reason: "must be at least 1".to_owned(),
            });
        }
        if let Some(url) = &self.database_url
            && url.trim().is_empty()
        {
            return Err(ConfigError::InvalidValue {
                field: "database_url",
                reason: "must not be empty when set".to_owned(),
            });
        }
        Ok(())
    }
}

fn list_or_csv<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Origins {
        List(Vec<String>),
        Csv(String),
    }

    let origins = match Origins::deserialize(deserializer)? {
        Origins::List(list) => list,
        Origins::Csv(csv) => csv.split(',').map(str::to_owned).collect(),
    };
    Ok(origins
        .into_iter()
        .map(|origin| origin.trim().to_owned())
        .filter(|origin| !origin.is_empty())
        .collect())
}
