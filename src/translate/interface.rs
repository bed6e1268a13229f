use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::request::ValidatedRequest;

/// Body of `POST /api/translate`.
///
/// `source_lang` is absent (or `null`) when the caller wants auto-detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub target_lang: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_lang: Option<String>,
}

/// Success body of `POST /api/translate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
    pub source_lang: String,
    pub target_lang: String,
    pub character_count: usize,
}

/// What the upstream provider handed back for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamTranslation {
    pub text: String,
    pub detected_source_language: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("provider rejected the credential")]
    Auth,

    #[error("provider quota or rate limit exceeded")]
    QuotaExceeded,

    #[error("provider rejected the request: {0}")]
    Rejected(String),

    #[error("provider request timed out")]
    Timeout,

    #[error("provider unreachable: {0}")]
    Unavailable(String),

    #[error("provider returned status {0}")]
    Status(u16),

    #[error("provider returned no translation")]
    EmptyResult,

    #[error("could not decode provider response: {0}")]
    Decode(String),
}

/// Translation provider interface
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate an already validated request.
    ///
    /// Implementations must leave the source language out of the outbound
    /// call when `request.source` is `None`.
    async fn translate(
        &self,
        request: &ValidatedRequest,
    ) -> Result<UpstreamTranslation, UpstreamError>;

    /// Provider name for logs.
    fn name(&self) -> &str;
}
