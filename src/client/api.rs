use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::ErrorBody;
use crate::languages::LanguageEntry;
use crate::routes::LanguagesResponse;
use crate::translate::{TranslateRequest, TranslateResponse};

/// Shown when a failure carries no usable `detail`.
pub const GENERIC_ERROR_MESSAGE: &str = "Translation failed. Please try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("proxy returned status {status}")]
    Http { status: u16, detail: Option<String> },

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl ClientError {
    /// The message the form displays for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http {
                detail: Some(detail),
                ..
            } if !detail.trim().is_empty() => detail.clone(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Calls the form makes against the proxy.
#[async_trait]
pub trait ProxyApi: Send + Sync {
    async fn languages(&self) -> Result<Vec<LanguageEntry>, ClientError>;

    async fn translate(&self, request: &TranslateRequest)
        -> Result<TranslateResponse, ClientError>;
}

/// reqwest-backed [`ProxyApi`].
#[derive(Debug, Clone)]
pub struct HttpProxyApi {
    client: Client,
    base_url: String,
}

impl HttpProxyApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn read<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .map(|b| b.detail);
            debug!("Proxy returned {}: detail={:?}", status, detail);
            return Err(ClientError::Http {
                status: status.as_u16(),
                detail,
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ProxyApi for HttpProxyApi {
    async fn languages(&self) -> Result<Vec<LanguageEntry>, ClientError> {
        let url = format!("{}/api/languages", self.base_url);
        let response = self.client.get(&url).send().await?;
        let parsed: LanguagesResponse = Self::read(response).await?;
        Ok(parsed.languages)
    }

    async fn translate(
        &self,
        request: &TranslateRequest,
    ) -> Result<TranslateResponse, ClientError> {
        let url = format!("{}/api/translate", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;
        Self::read(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ClientError::Http {
            status: 429,
            detail: Some("Slow down".to_string()),
        };
        assert_eq!(err.user_message(), "Slow down");
    }

    #[test]
    fn test_user_message_falls_back_to_generic() {
        let cases = [
            ClientError::Http {
                status: 500,
                detail: None,
            },
            ClientError::Http {
                status: 500,
                detail: Some("  ".to_string()),
            },
            ClientError::Decode("expected value".to_string()),
        ];
        for err in cases {
            assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        }
    }
}
