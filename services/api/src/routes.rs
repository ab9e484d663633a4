use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Extension;
use axum::Json;
use mastering_money::delivery::{delivery_router, ReportOutbox};
use mastering_money::error::AppError;
use mastering_money::reasons::ReasonsResult;
use mastering_money::report::ReportBundle;
use mastering_money::survey::{score, ResponseImporter, ResponseMap, Theme};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

/// Body of `POST /api/score`.
#[derive(Debug, Deserialize)]
pub(crate) struct ScoreRequest {
    #[serde(default)]
    pub(crate) responses: ResponseMap,
    #[serde(default)]
    pub(crate) reasons: Option<ReasonsResult>,
}

pub(crate) fn with_survey_routes<O>(outbox: Arc<O>) -> axum::Router
where
    O: ReportOutbox + 'static,
{
    delivery_router(outbox)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/catalog", get(catalog_endpoint))
        .route("/api/score", post(score_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn catalog_endpoint(Extension(state): Extension<AppState>) -> Json<Vec<Theme>> {
    Json(state.catalog.themes().to_vec())
}

/// Scores a full response set and returns the report bundle for it. Answers to
/// catalog questions must be one of that question's option values.
pub(crate) async fn score_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ReportBundle>, AppError> {
    let ScoreRequest { responses, reasons } = request;
    ResponseImporter::check_values(&responses, &state.catalog)?;
    let result = score(&responses, state.catalog.themes());
    debug!(
        answered = responses.len(),
        overall_percent = result.overall_percent,
        "scored submitted responses"
    );

    Ok(Json(ReportBundle::assemble(
        result,
        &responses,
        &state.catalog,
        reasons,
    )))
}
