pub mod interface;
pub mod deepl;
pub mod request;

pub use interface::{
    TranslateRequest, TranslateResponse, Translator, UpstreamError, UpstreamTranslation,
};
pub use deepl::DeepLTranslator;
pub use request::{ValidatedRequest, MAX_TEXT_CHARS};
