use std::sync::Arc;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tokio::task;
use tradeboard_core::{
    dashboard::{DashboardView, LinkBuilder, SessionView},
    metrics::DerivedMetrics,
    snapshot::Snapshot,
};

const FILES_PATH: &str = "/files";

/// Base URL for download links.
///
/// The configured public URL wins; otherwise the scheme comes from
/// `X-Forwarded-Proto` (`http` unless it says `https`) and the host from `Host` (default
/// `localhost`).
pub fn files_base_url(public_base_url: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = public_base_url {
        return base.to_string();
    }

    let scheme = match first_header_value(headers, "x-forwarded-proto") {
        Some(proto) if proto.eq_ignore_ascii_case("https") => "https",
        _ => "http",
    };
    let host = first_header_value(headers, header::HOST.as_str()).unwrap_or("localhost");
    format!("{}://{}{}", scheme, host, FILES_PATH)
}

/// First comma-separated value of a header, trimmed.
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> ApiResult<Json<DashboardView>> {
    let links = LinkBuilder::new(files_base_url(
        state.public_base_url.as_deref(),
        &headers,
    ));
    let service = state.dashboard_service.clone();
    let now = Utc::now();
    let view = task::spawn_blocking(move || service.build(now, &links)).await?;
    Ok(Json(view))
}

async fn get_snapshot(State(state): State<Arc<AppState>>) -> ApiResult<Json<Snapshot>> {
    let service = state.dashboard_service.clone();
    let now = Utc::now();
    let snapshot = task::spawn_blocking(move || service.snapshot(now)).await?;
    Ok(Json(snapshot))
}

async fn get_metrics(State(state): State<Arc<AppState>>) -> ApiResult<Json<DerivedMetrics>> {
    let service = state.dashboard_service.clone();
    let now = Utc::now();
    let metrics = task::spawn_blocking(move || service.metrics(now)).await?;
    Ok(Json(metrics))
}

#[derive(Deserialize)]
struct SessionQuery {
    at: Option<String>,
}

fn parse_at(raw: &str) -> ApiResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ApiError::BadRequest(format!("Invalid 'at' instant '{}': {}", raw, e)))
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
) -> ApiResult<Json<SessionView>> {
    let now = match query.at.as_deref() {
        Some(raw) => parse_at(raw)?,
        None => Utc::now(),
    };
    Ok(Json(state.dashboard_service.session(now)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/snapshot", get(get_snapshot))
        .route("/metrics", get(get_metrics))
        .route("/session", get(get_session))
}
