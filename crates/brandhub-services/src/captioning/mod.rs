//! Captioning provider abstraction.
//!
//! An external vision service proposes descriptive filenames for image
//! assets. Suggestions are best-effort and untrusted: callers re-validate
//! every returned name through the naming codec before acting on it.

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

pub mod http;

pub use http::HttpCaptioner;

/// Context sent along with the image bytes.
#[derive(Debug, Clone)]
pub struct CaptionContext {
    pub gym_code: String,
    pub gym_name: Option<String>,
    pub current_filename: String,
}

/// A filename suggestion from the captioning service.
#[derive(Debug, Clone)]
pub struct CaptionSuggestion {
    pub suggested_name: String,
    /// Raw analysis payload from the provider, kept for display/debugging.
    pub analysis: serde_json::Value,
}

/// Provider of AI filename suggestions for image assets.
#[async_trait]
pub trait Captioner: Send + Sync {
    /// Propose a filename for the given image. Errors are per-item and
    /// non-fatal; batch callers continue with remaining items.
    async fn suggest_filename(
        &self,
        image: Bytes,
        context: &CaptionContext,
    ) -> Result<CaptionSuggestion>;
}
