use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::languages::{LanguageEntry, AUTO_DETECT};
use crate::state::AppState;
use crate::translate::{TranslateRequest, TranslateResponse};

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct LanguagesResponse {
    pub languages: Vec<LanguageEntry>,
}

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/languages", get(get_languages))
        .route("/api/translate", post(translate_text))
}

/// Full application: routes, CORS for the configured origins, request tracing.
pub fn build_app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(create_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "lingo-proxy"
    }))
}

async fn get_languages(State(state): State<AppState>) -> Json<LanguagesResponse> {
    Json(LanguagesResponse {
        languages: state.languages.as_ref().clone(),
    })
}

async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslateRequest>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::Validation(e.body_text()))?;
    let validated = request.validate()?;

    let request_id = Uuid::new_v4();
    info!(
        "Translation request {}: source={}, target={}, text_len={}, provider={}",
        request_id,
        validated.source.as_ref().map(|s| s.as_str()).unwrap_or(AUTO_DETECT),
        validated.target,
        validated.character_count(),
        state.translator.name()
    );

    let upstream = state
        .translator
        .translate(&validated)
        .await
        .map_err(|e| ApiError::from_upstream(e, state.auth_error_status()))?;

    let source_lang = upstream
        .detected_source_language
        .or_else(|| validated.source.as_ref().map(|s| s.to_string()))
        .unwrap_or_else(|| AUTO_DETECT.to_ascii_uppercase());

    info!("Translation request {} completed: detected={}", request_id, source_lang);

    Ok(Json(TranslateResponse {
        translated_text: upstream.text,
        source_lang,
        target_lang: validated.target.to_string(),
        character_count: validated.character_count(),
    }))
}
