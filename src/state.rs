use axum::http::StatusCode;
use std::sync::Arc;

use crate::config::Config;
use crate::languages::{self, LanguageEntry};
use crate::translate::{DeepLTranslator, Translator};

/// Shared, read-only state. Nothing here changes after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub translator: Arc<dyn Translator>,
    pub languages: Arc<Vec<LanguageEntry>>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let translator = Arc::new(DeepLTranslator::new(&config.deepl)?);
        Ok(Self::with_translator(config, translator))
    }

    pub fn with_translator(config: Config, translator: Arc<dyn Translator>) -> Self {
        Self {
            config,
            translator,
            languages: Arc::new(languages::supported_languages()),
        }
    }

    pub fn auth_error_status(&self) -> StatusCode {
        StatusCode::from_u16(self.config.deepl.auth_error_status)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}
