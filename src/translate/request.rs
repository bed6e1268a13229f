use crate::error::ApiError;
use crate::languages::{self, LanguageCode};

use super::interface::TranslateRequest;

pub const MAX_TEXT_CHARS: usize = 50_000;

/// A request that passed validation. The auto-detect sentinel cannot be
/// represented here: an absent `source` is the only way to ask for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub text: String,
    pub target: LanguageCode,
    pub source: Option<LanguageCode>,
}

impl ValidatedRequest {
    pub fn character_count(&self) -> usize {
        self.text.chars().count()
    }
}

impl TranslateRequest {
    pub fn validate(&self) -> Result<ValidatedRequest, ApiError> {
        let text = self.text.trim();
        if text.is_empty() {
            return Err(ApiError::Validation("Text cannot be empty".to_string()));
        }
        if text.chars().count() > MAX_TEXT_CHARS {
            return Err(ApiError::Validation(format!(
                "Text exceeds the maximum length of {} characters",
                MAX_TEXT_CHARS
            )));
        }

        let target = LanguageCode::target(&self.target_lang).ok_or_else(|| {
            ApiError::Validation(format!(
                "Invalid target language. Must be one of: {}",
                languages::supported_codes().collect::<Vec<_>>().join(", ")
            ))
        })?;

        let source = match self.source_lang.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) if languages::is_auto_detect(raw) => None,
            Some(raw) => Some(LanguageCode::source(raw).ok_or_else(|| {
                ApiError::Validation(format!("Invalid source language: {}", raw))
            })?),
        };

        Ok(ValidatedRequest {
            text: text.to_string(),
            target,
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, target: &str, source: Option<&str>) -> TranslateRequest {
        TranslateRequest {
            text: text.to_string(),
            target_lang: target.to_string(),
            source_lang: source.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_request_without_source() {
        let validated = request("hello world", "es", None).validate().unwrap();
        assert_eq!(validated.text, "hello world");
        assert_eq!(validated.target.as_str(), "ES");
        assert!(validated.source.is_none());
        assert_eq!(validated.character_count(), 11);
    }

    #[test]
    fn test_sentinel_and_blank_source_mean_auto_detect() {
        for source in ["auto", "AUTO", " Auto ", ""] {
            let validated = request("hi", "DE", Some(source)).validate().unwrap();
            assert!(validated.source.is_none(), "source {:?}", source);
        }
    }

    #[test]
    fn test_text_is_trimmed_before_counting() {
        let validated = request("  héllo \n", "FR", Some("en-us")).validate().unwrap();
        assert_eq!(validated.text, "héllo");
        assert_eq!(validated.character_count(), 5);
        assert_eq!(validated.source.unwrap().base(), "EN");
    }

    #[test]
    fn test_rejects_blank_text() {
        for text in ["", "   ", "\n\t"] {
            let err = request(text, "ES", None).validate().unwrap_err();
            assert!(matches!(err, ApiError::Validation(ref m) if m == "Text cannot be empty"));
        }
    }

    #[test]
    fn test_rejects_text_over_limit() {
        let at_limit = "a".repeat(MAX_TEXT_CHARS);
        assert!(request(&at_limit, "ES", None).validate().is_ok());

        let padded = format!("  {}\n", at_limit);
        let validated = request(&padded, "ES", None).validate().unwrap();
        assert_eq!(validated.character_count(), MAX_TEXT_CHARS);

        let over = "a".repeat(MAX_TEXT_CHARS + 1);
        let err = request(&over, "ES", None).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.starts_with("Text exceeds")));
    }

    #[test]
    fn test_long_whitespace_is_empty_not_too_long() {
        let blank = " ".repeat(MAX_TEXT_CHARS + 10);
        let err = request(&blank, "ES", None).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m == "Text cannot be empty"));
    }

    #[test]
    fn test_rejects_unknown_languages() {
        let err = request("hi", "XX", None).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.starts_with("Invalid target language")));

        let err = request("hi", "ES", Some("klingon")).validate().unwrap_err();
        assert!(matches!(err, ApiError::Validation(ref m) if m.contains("klingon")));
    }
}
