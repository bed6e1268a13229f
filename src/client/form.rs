use tracing::{debug, warn};

use super::api::ProxyApi;
use crate::languages::{LanguageCode, LanguageEntry};
use crate::translate::TranslateRequest;

pub const EMPTY_TEXT_MESSAGE: &str = "Please enter text to translate";

const DEFAULT_TARGET: &str = "ES";

/// Source selector value. `Auto` is a UI choice only; it becomes an absent
/// `source_lang` when the request is built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SourceSelection {
    #[default]
    Auto,
    Language(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Char(char),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            meta: false,
        }
    }

    fn is_submit_shortcut(&self) -> bool {
        self.key == Key::Enter && (self.ctrl || self.meta)
    }
}

/// Everything the translator form shows. Lives as long as the session.
#[derive(Debug, Clone)]
pub struct FormState {
    pub input_text: String,
    pub source: SourceSelection,
    pub target_lang: String,
    pub result: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub languages: Vec<LanguageEntry>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            input_text: String::new(),
            source: SourceSelection::Auto,
            target_lang: DEFAULT_TARGET.to_string(),
            result: None,
            loading: false,
            error: None,
            languages: Vec::new(),
        }
    }
}

impl FormState {
    pub fn request(&self) -> TranslateRequest {
        TranslateRequest {
            text: self.input_text.clone(),
            target_lang: self.target_lang.clone(),
            source_lang: match &self.source {
                SourceSelection::Auto => None,
                SourceSelection::Language(code) => Some(code.clone()),
            },
        }
    }
}

/// Form controller: owns the state and the proxy handle.
pub struct TranslatorForm<A: ProxyApi> {
    api: A,
    state: FormState,
}

impl<A: ProxyApi> TranslatorForm<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            state: FormState::default(),
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Load the language list once. Failure leaves the selectors empty.
    pub async fn init(&mut self) {
        if !self.state.languages.is_empty() {
            return;
        }
        match self.api.languages().await {
            Ok(languages) => {
                debug!("Loaded {} languages", languages.len());
                self.state.languages = languages;
            }
            Err(e) => warn!("Failed to load languages: {}", e),
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    pub fn set_source(&mut self, source: SourceSelection) {
        self.state.source = source;
    }

    pub fn set_target(&mut self, target: impl Into<String>) {
        self.state.target_lang = target.into();
    }

    pub fn can_submit(&self) -> bool {
        !self.state.loading && !self.state.input_text.trim().is_empty()
    }

    pub async fn translate(&mut self) {
        if self.state.loading {
            return;
        }
        if self.state.input_text.trim().is_empty() {
            self.state.result = None;
            self.state.error = Some(EMPTY_TEXT_MESSAGE.to_string());
            return;
        }

        let request = self.state.request();
        self.state.loading = true;
        self.state.error = None;
        self.state.result = None;

        match self.api.translate(&request).await {
            Ok(response) => self.state.result = Some(response.translated_text),
            Err(e) => {
                warn!("Translation failed: {}", e);
                self.state.error = Some(e.user_message());
            }
        }

        self.state.loading = false;
    }

    /// Ctrl/Cmd+Enter submits, under the same guard as the submit button.
    /// Returns whether a translation was started.
    pub async fn handle_key(&mut self, key: KeyPress) -> bool {
        if !key.is_submit_shortcut() || !self.can_submit() {
            return false;
        }
        self.translate().await;
        true
    }

    /// Swap source and target; the last result becomes the new input.
    /// Needs a concrete source that is also a valid target.
    pub fn swap_languages(&mut self) -> bool {
        let SourceSelection::Language(source) = &self.state.source else {
            return false;
        };
        let Some(new_target) = LanguageCode::target(source) else {
            return false;
        };

        let old_target = std::mem::replace(&mut self.state.target_lang, new_target.to_string());
        self.state.source = SourceSelection::Language(old_target);
        if let Some(result) = self.state.result.take() {
            self.state.input_text = result;
        }
        true
    }
}
