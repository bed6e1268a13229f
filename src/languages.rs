use serde::{Deserialize, Serialize};

/// Value the UI selector uses for "detect the source language".
/// It is never a language code and must not reach the provider.
pub const AUTO_DETECT: &str = "auto";

const SUPPORTED: &[(&str, &str)] = &[
    ("EN-US", "English (US)"),
    ("EN-GB", "English (UK)"),
    ("DE", "German"),
    ("FR", "French"),
    ("ES", "Spanish"),
    ("IT", "Italian"),
    ("JA", "Japanese"),
    ("ZH", "Chinese"),
    ("PT-PT", "Portuguese (Portugal)"),
    ("PT-BR", "Portuguese (Brazil)"),
    ("RU", "Russian"),
    ("NL", "Dutch"),
    ("PL", "Polish"),
    ("TR", "Turkish"),
    ("SV", "Swedish"),
    ("DA", "Danish"),
    ("FI", "Finnish"),
    ("NO", "Norwegian"),
    ("CS", "Czech"),
    ("RO", "Romanian"),
    ("HU", "Hungarian"),
    ("BG", "Bulgarian"),
    ("EL", "Greek"),
    ("AR", "Arabic"),
    ("KO", "Korean"),
    ("ID", "Indonesian"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub code: String,
    pub name: String,
}

/// The reference language list, in display order.
pub fn supported_languages() -> Vec<LanguageEntry> {
    SUPPORTED
        .iter()
        .map(|(code, name)| LanguageEntry {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

pub fn supported_codes() -> impl Iterator<Item = &'static str> {
    SUPPORTED.iter().map(|(code, _)| *code)
}

pub fn is_auto_detect(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case(AUTO_DETECT)
}

/// A validated, upper-cased language code from the supported table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// Accepts a target code exactly as listed (case-insensitive).
    pub fn target(raw: &str) -> Option<Self> {
        let code = raw.trim().to_ascii_uppercase();
        supported_codes()
            .any(|c| c == code)
            .then_some(Self(code))
    }

    /// Accepts a listed code or the bare base of one (`EN`, `PT`).
    pub fn source(raw: &str) -> Option<Self> {
        let code = raw.trim().to_ascii_uppercase();
        supported_codes()
            .any(|c| c == code || base_of(c) == code)
            .then_some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Provider source languages carry no region: `EN-US` becomes `EN`.
    pub fn base(&self) -> &str {
        base_of(&self.0)
    }
}

impl std::fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

fn base_of(code: &str) -> &str {
    code.split('-').next().unwrap_or(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_complete_and_unique() {
        let languages = supported_languages();
        assert_eq!(languages.len(), 26);

        let mut codes: Vec<_> = languages.iter().map(|l| l.code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), 26);
    }

    #[test]
    fn test_target_codes_are_case_insensitive() {
        assert_eq!(LanguageCode::target("es").unwrap().as_str(), "ES");
        assert_eq!(LanguageCode::target(" pt-br ").unwrap().as_str(), "PT-BR");
        assert!(LanguageCode::target("EN").is_none());
        assert!(LanguageCode::target("XX").is_none());
    }

    #[test]
    fn test_auto_is_never_a_code() {
        assert!(is_auto_detect("AUTO"));
        assert!(is_auto_detect(" auto "));
        assert!(LanguageCode::target("auto").is_none());
        assert!(LanguageCode::source("auto").is_none());
    }

    #[test]
    fn test_source_accepts_base_and_strips_region() {
        assert_eq!(LanguageCode::source("en").unwrap().base(), "EN");
        assert_eq!(LanguageCode::source("EN-US").unwrap().base(), "EN");
        assert_eq!(LanguageCode::source("pt-br").unwrap().base(), "PT");
        assert_eq!(LanguageCode::source("DE").unwrap().base(), "DE");
        assert!(LanguageCode::source("EN-AU").is_none());
    }
}
