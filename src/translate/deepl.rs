use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::interface::{Translator, UpstreamError, UpstreamTranslation};
use super::request::ValidatedRequest;
use crate::config::DeepLConfig;

/// DeepL answers 456 when the account's character quota is used up.
const QUOTA_EXCEEDED: u16 = 456;

#[derive(Debug, Deserialize)]
struct DeepLResponse {
    #[serde(default)]
    translations: Vec<DeepLTranslation>,
}

#[derive(Debug, Deserialize)]
struct DeepLTranslation {
    text: String,
    detected_source_language: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepLErrorBody {
    message: Option<String>,
}

/// DeepL v2 `/translate` client
pub struct DeepLTranslator {
    client: Client,
    api_url: String,
    api_key: String,
}

impl DeepLTranslator {
    pub fn new(config: &DeepLConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::try_from_secs_f64(config.timeout_secs)?)
            .build()?;

        info!(
            "Initialized DeepLTranslator: api_url={}, timeout={}s",
            config.api_url, config.timeout_secs
        );
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

/// Form fields for one request. `source_lang` is only present when the
/// caller declared a source; DeepL errors on an explicit auto value.
pub(crate) fn form_params(request: &ValidatedRequest) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("text", request.text.clone()),
        ("target_lang", request.target.as_str().to_string()),
    ];
    if let Some(source) = &request.source {
        params.push(("source_lang", source.base().to_string()));
    }
    params
}

fn classify_status(status: u16, body: &str) -> UpstreamError {
    match status {
        401 | 403 => UpstreamError::Auth,
        429 | QUOTA_EXCEEDED => UpstreamError::QuotaExceeded,
        400 => {
            let message = serde_json::from_str::<DeepLErrorBody>(body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| "Unknown error".to_string());
            UpstreamError::Rejected(message)
        }
        other => UpstreamError::Status(other),
    }
}

fn classify_transport(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        request: &ValidatedRequest,
    ) -> Result<UpstreamTranslation, UpstreamError> {
        let params = form_params(request);
        debug!(
            "Sending DeepL request: target={}, source_lang_sent={}",
            request.target,
            params.iter().any(|(k, _)| *k == "source_lang")
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(classify_transport)?;

        if status != 200 {
            warn!("DeepL returned status {}", status);
            return Err(classify_status(status, &body));
        }

        let parsed: DeepLResponse =
            serde_json::from_str(&body).map_err(|e| UpstreamError::Decode(e.to_string()))?;
        let first = parsed
            .translations
            .into_iter()
            .next()
            .ok_or(UpstreamError::EmptyResult)?;

        Ok(UpstreamTranslation {
            text: first.text,
            detected_source_language: first.detected_source_language,
        })
    }

    fn name(&self) -> &str {
        "deepl"
    }
}
