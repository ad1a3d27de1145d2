//! HTTP captioning provider.

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use brandhub_core::AppConfig;
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{CaptionContext, CaptionSuggestion, Captioner};

/// Configuration for the HTTP captioning provider.
#[derive(Clone)]
pub struct HttpCaptionerConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl HttpCaptionerConfig {
    /// Build from the application config; `None` when captioning is
    /// disabled or no endpoint is set.
    pub fn from_app_config(config: &AppConfig) -> Option<Self> {
        if !config.captioning_enabled {
            return None;
        }
        let endpoint = config.captioning_url.clone()?;
        Some(Self {
            endpoint,
            api_key: config.captioning_api_key.clone(),
            timeout_seconds: config.captioning_timeout_seconds,
        })
    }
}

/// Captioning provider backed by an HTTP vision service.
#[derive(Clone)]
pub struct HttpCaptioner {
    http_client: Client,
    config: HttpCaptionerConfig,
}

#[derive(Serialize)]
struct CaptionRequest<'a> {
    image_base64: String,
    gym_code: &'a str,
    gym_name: Option<&'a str>,
    current_filename: &'a str,
}

#[derive(Deserialize)]
struct CaptionResponse {
    suggested_name: String,
    #[serde(default)]
    analysis: serde_json::Value,
}

impl HttpCaptioner {
    pub fn new(config: HttpCaptionerConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .context("Failed to create HTTP client for captioning")?;

        Ok(Self {
            http_client,
            config,
        })
    }
}

#[async_trait]
impl Captioner for HttpCaptioner {
    async fn suggest_filename(
        &self,
        image: Bytes,
        context: &CaptionContext,
    ) -> Result<CaptionSuggestion> {
        let body = CaptionRequest {
            image_base64: base64::engine::general_purpose::STANDARD.encode(&image),
            gym_code: &context.gym_code,
            gym_name: context.gym_name.as_deref(),
            current_filename: &context.current_filename,
        };

        let mut request = self.http_client.post(&self.config.endpoint).json(&body);
        if let Some(ref api_key) = self.config.api_key {
            request = request.header("x-api-key", api_key);
        }

        let start = std::time::Instant::now();

        let response = request
            .send()
            .await
            .context("Captioning request failed")?
            .error_for_status()
            .context("Captioning service returned an error status")?;

        let parsed: CaptionResponse = response
            .json()
            .await
            .context("Failed to parse captioning response")?;

        tracing::debug!(
            filename = %context.current_filename,
            suggested = %parsed.suggested_name,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Captioning suggestion received"
        );

        Ok(CaptionSuggestion {
            suggested_name: parsed.suggested_name,
            analysis: parsed.analysis,
        })
    }
}
