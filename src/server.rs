// HTTP surface: static page shells plus the JSON API they fetch from.
// Handlers never mutate data; the only write-shaped endpoint is the
// explicit cache refresh.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::components::Filters;
use crate::error::LoadError;
use crate::loader::{DataLoader, TableName};
use crate::pages;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<DataLoader>,
}

/// API response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> ApiResponse<T> {
    fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
            error: None,
        }
    }
}

impl ApiResponse<()> {
    fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: (),
            error: Some(message.into()),
        }
    }
}

fn load_failure(context: &str, err: LoadError) -> Response {
    error!("{context}: {err}");
    let status = match &err {
        LoadError::MissingRequired { .. } | LoadError::DataDirMissing { .. } => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::err(err.to_string()))).into_response()
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::ok("OK"))
}

/// GET /api/status - availability of every data file
async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::ok(state.loader.status()))
}

/// GET /api/naics - NAICS segment rankings
async fn get_naics(State(state): State<AppState>) -> Response {
    match pages::naics_rankings::build(&state.loader) {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::ok(page))).into_response(),
        Err(e) => load_failure("building NAICS rankings", e),
    }
}

/// GET /api/companies - filtered rankings table plus map markers
async fn get_companies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let filters = Filters::from_query(&params);
    match pages::ranked_companies::build(&state.loader, &filters) {
        Ok(page) => (StatusCode::OK, Json(ApiResponse::ok(page))).into_response(),
        Err(e) => load_failure("building company rankings", e),
    }
}

/// GET /api/companies/:id - one company with buildings and research
async fn get_company_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let decoded_id = urlencoding::decode(&id)
        .unwrap_or_else(|_| id.clone().into())
        .into_owned();

    match pages::company_detail::build(&state.loader, &decoded_id) {
        Ok(Some(page)) => (StatusCode::OK, Json(ApiResponse::ok(page))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(ApiResponse::err(format!("no company with id '{decoded_id}'"))),
        )
            .into_response(),
        Err(e) => load_failure("building company detail", e),
    }
}

/// POST /api/refresh - drop cache entries so the next request re-reads
/// from disk. `?table=companies` refreshes one table, default is all.
async fn refresh_cache(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("table") {
        Some(raw) => match TableName::parse(raw) {
            Some(table) => {
                state.loader.invalidate(table);
                Json(ApiResponse::ok(format!("{} cache refreshed", table.as_str())))
                    .into_response()
            }
            None => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::err(format!("unknown table '{raw}'"))),
            )
                .into_response(),
        },
        None => {
            state.loader.invalidate_all();
            Json(ApiResponse::ok("all caches refreshed")).into_response()
        }
    }
}

// ============================================================================
// Page Shells
// ============================================================================

/// GET / - overview
async fn serve_index() -> impl IntoResponse {
    Html(include_str!("../web/index.html"))
}

/// GET /rankings - NAICS rankings page
async fn serve_rankings() -> impl IntoResponse {
    Html(include_str!("../web/rankings.html"))
}

/// GET /companies - company rankings page
async fn serve_companies() -> impl IntoResponse {
    Html(include_str!("../web/companies.html"))
}

/// GET /company-detail - company detail page
async fn serve_company_detail() -> impl IntoResponse {
    Html(include_str!("../web/company-detail.html"))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/status", get(get_status))
        .route("/naics", get(get_naics))
        .route("/companies", get(get_companies))
        .route("/companies/:id", get(get_company_detail))
        .route("/refresh", post(refresh_cache))
        .with_state(state);

    Router::new()
        .route("/", get(serve_index))
        .route("/rankings", get(serve_rankings))
        .route("/companies", get(serve_companies))
        .route("/company-detail", get(serve_company_detail))
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}
