//! HTTP boundary for the trigger classifier.

use std::any::Any;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{BytesRejection, QueryRejection};
use axum::extract::{DefaultBodyLimit, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::classifier::classify;
use super::codec::{parse_rows, write_cards};
use super::model::Language;
use super::rules::RuleTable;
use crate::error::ClassifyError;

/// Path of the upload endpoint.
pub const CLASSIFY_PATH: &str = "/api/classify";

/// Shared state for classifier routes.
#[derive(Clone)]
pub struct ClassifyState {
    pub rules: Arc<RuleTable>,
}

/// Optional query parameters on the upload endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ClassifyParams {
    /// Response language code (`en`, `es`).
    pub lang: Option<String>,
    /// Only return cards for this category.
    pub category: Option<String>,
    /// `json` (default) or `csv`.
    pub format: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Csv,
}

/// Validated form of [`ClassifyParams`].
struct ClassifyOptions {
    language: Language,
    category: Option<String>,
    format: OutputFormat,
}

impl ClassifyParams {
    fn validate(self, rules: &RuleTable) -> Result<ClassifyOptions, ClassifyError> {
        let language = match self.lang.as_deref() {
            Some(code) => code.parse::<Language>().map_err(ClassifyError::InvalidRequest)?,
            None => Language::default(),
        };

        if let Some(name) = self.category.as_deref() {
            if rules.category(name).is_none() {
                return Err(ClassifyError::InvalidRequest(format!(
                    "Unknown category: {}",
                    name
                )));
            }
        }

        let format = match self.format.as_deref().map(str::to_lowercase).as_deref() {
            None | Some("json") => OutputFormat::Json,
            Some("csv") => OutputFormat::Csv,
            Some(other) => {
                return Err(ClassifyError::InvalidRequest(format!(
                    "Unknown format: {}",
                    other
                )));
            }
        };

        Ok(ClassifyOptions {
            language,
            category: self.category,
            format,
        })
    }
}

/// Build the classifier routes with their middleware stack.
pub fn classify_routes(rules: Arc<RuleTable>, max_body_bytes: usize) -> Router {
    let state = ClassifyState { rules };

    let router = Router::new()
        .route("/health", get(health))
        .route(
            CLASSIFY_PATH,
            post(classify_upload).fallback(method_not_allowed),
        )
        .with_state(state);

    with_middleware(router, max_body_bytes)
}

/// Body limit, request tracing, CORS, and panic-to-500 conversion.
fn with_middleware(router: Router, max_body_bytes: usize) -> Router {
    router.layer(DefaultBodyLimit::max(max_body_bytes)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "coach-cards"
    }))
}

// ── Classify ────────────────────────────────────────────────────────────

/// POST /api/classify
///
/// Body is a CSV table with a `content` column. Returns one card per
/// matching row, as JSON (default) or CSV.
async fn classify_upload(
    State(state): State<ClassifyState>,
    params: Result<Query<ClassifyParams>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let params = match params {
        Ok(Query(params)) => params,
        Err(rejection) => {
            let e = ClassifyError::InvalidRequest(rejection.body_text());
            warn!(error = %e, "Rejected query string");
            return e.into_response();
        }
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected upload body");
            return (
                rejection.status(),
                Json(serde_json::json!({"error": rejection.body_text()})),
            )
                .into_response();
        }
    };

    match run_classification(&state.rules, params, &body) {
        Ok(response) => response,
        Err(e) => {
            warn!(error = %e, "Classification request failed");
            e.into_response()
        }
    }
}

fn run_classification(
    rules: &RuleTable,
    params: ClassifyParams,
    body: &[u8],
) -> Result<Response, ClassifyError> {
    let options = params.validate(rules)?;

    let text = std::str::from_utf8(body)
        .map_err(|e| ClassifyError::Parse(format!("Body is not valid UTF-8: {}", e)))?;
    let rows = parse_rows(text)?;

    let mut cards = classify(rules, &rows, options.language);
    if let Some(category) = options.category.as_deref() {
        cards.retain(|card| card.category() == category);
    }

    info!(
        bytes = body.len(),
        rows = rows.len(),
        cards = cards.len(),
        "Upload classified"
    );

    let response = match options.format {
        OutputFormat::Json => (StatusCode::OK, Json(cards)).into_response(),
        OutputFormat::Csv => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"live_coach_cards.csv\"",
                ),
            ],
            write_cards(&cards)?,
        )
            .into_response(),
    };
    Ok(response)
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(serde_json::json!({"error": "Method not allowed"})),
    )
}

/// Turn a handler panic into the standard 500 error body.
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    error!(panic = %message, "Request handler panicked");
    ClassifyError::Internal(message).into_response()
}
