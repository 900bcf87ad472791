//! API configuration

use serde::Deserialize;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Database URL
    pub database_url: String,
    /// Log level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Comma-separated origins allowed by CORS
    pub cors_allowed_origins: String,
    /// Largest accepted request body, photo uploads included
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/claims".to_string(),
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            cors_allowed_origins: "http://localhost:3000,http://localhost:3001".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_*` environment variables
    ///
    /// `DATABASE_URL` is used when `API_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let database_url = std::env::var("DATABASE_URL").ok();
        Self::from_environment(config::Environment::with_prefix("API"), database_url)
    }

    /// Loads configuration from an explicit environment source
    pub fn from_environment(
        environment: config::Environment,
        fallback_database_url: Option<String>,
    ) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder().add_source(environment).build()?;
        let has_database_url = settings.get_string("database_url").is_ok();

        let mut config: ApiConfig = settings.try_deserialize()?;
        if !has_database_url {
            if let Some(url) = fallback_database_url {
                config.database_url = url;
            }
        }
        Ok(config)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Allowed CORS origins, trimmed, empty entries dropped
    pub fn cors_origins(&self) -> Vec<&str> {
        self.cors_allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}
