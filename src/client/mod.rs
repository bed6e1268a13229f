pub mod api;
pub mod form;

pub use api::{ClientError, HttpProxyApi, ProxyApi, GENERIC_ERROR_MESSAGE};
pub use form::{FormState, Key, KeyPress, SourceSelection, TranslatorForm, EMPTY_TEXT_MESSAGE};
