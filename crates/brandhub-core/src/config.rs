//! Configuration module
//!
//! Configuration structures for the ingestion services, covering database,
//! local storage, captioning, and upload limits.

use std::env;

/// Application configuration loaded from the environment.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    // Storage configuration
    pub storage_path: String,
    pub storage_base_url: String,
    // Captioning service configuration
    pub captioning_enabled: bool,
    pub captioning_url: Option<String>,
    pub captioning_api_key: Option<String>,
    pub captioning_timeout_seconds: u64,
    // Upload limits
    pub max_file_size_bytes: usize,
    pub allowed_content_types: Vec<String>,
    pub environment: String,
}

const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const MAX_FILE_SIZE_MB: usize = 25;
const CAPTIONING_TIMEOUT_SECS: u64 = 30;

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL must be set"))?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_FILE_SIZE_MB);

        let allowed_content_types = env::var("ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| {
                "image/jpeg,image/png,image/gif,image/webp,image/svg+xml,video/mp4,application/pdf"
                    .to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .collect();

        let captioning_url = env::var("CAPTIONING_URL").ok();
        let captioning_enabled = env::var("CAPTIONING_ENABLED")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(captioning_url.is_some());

        Ok(AppConfig {
            database_url,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            storage_path: env::var("STORAGE_PATH")
                .unwrap_or_else(|_| "./data/assets".to_string()),
            storage_base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:4000/assets".to_string()),
            captioning_enabled,
            captioning_url,
            captioning_api_key: env::var("CAPTIONING_API_KEY").ok(),
            captioning_timeout_seconds: env::var("CAPTIONING_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CAPTIONING_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CAPTIONING_TIMEOUT_SECS),
            max_file_size_bytes: max_file_size_mb * 1024 * 1024,
            allowed_content_types,
            environment,
        })
    }

    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.captioning_enabled && self.captioning_url.is_none() {
            return Err(anyhow::anyhow!(
                "CAPTIONING_URL must be set when CAPTIONING_ENABLED is true"
            ));
        }
        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }
        Ok(())
    }
}
