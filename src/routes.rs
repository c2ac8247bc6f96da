use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::charts::{ChartWindow, ChartsOverview, FailuresByTypes, HeatmapEntry, TimestampValue};
use crate::error::ApiError;
use crate::store::ChecksStore;

pub fn router(store: ChecksStore) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/charts", get(overview))
        .route("/charts/failures", get(failures))
        .route("/charts/response-time", get(response_time))
        .route("/charts/failures-by-types", get(failures_by_types))
        .route("/charts/heatmap", get(heatmap))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

async fn health() -> &'static str {
    "ok"
}

async fn failures(
    State(store): State<ChecksStore>,
    Query(window): Query<ChartWindow>,
) -> Result<Json<Vec<TimestampValue>>, ApiError> {
    Ok(Json(store.get_failures(&window).await?))
}

async fn response_time(
    State(store): State<ChecksStore>,
    Query(window): Query<ChartWindow>,
) -> Result<Json<Vec<TimestampValue>>, ApiError> {
    Ok(Json(store.get_response_time(&window).await?))
}

async fn failures_by_types(
    State(store): State<ChecksStore>,
    Query(window): Query<ChartWindow>,
) -> Result<Json<FailuresByTypes>, ApiError> {
    store
        .calculate_failures_by_types(&window)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("no severity counts for {}", window.url)))
}

async fn heatmap(
    State(store): State<ChecksStore>,
    Query(window): Query<ChartWindow>,
) -> Result<Json<Vec<HeatmapEntry>>, ApiError> {
    Ok(Json(store.get_heatmap_entry(&window).await?))
}

async fn overview(
    State(store): State<ChecksStore>,
    Query(window): Query<ChartWindow>,
) -> Result<Json<ChartsOverview>, ApiError> {
    let (failures, response_time, failures_by_types, heatmap) = futures_util::try_join!(
        store.get_failures(&window),
        store.get_response_time(&window),
        store.calculate_failures_by_types(&window),
        store.get_heatmap_entry(&window),
    )?;

    Ok(Json(ChartsOverview {
        failures,
        response_time,
        failures_by_types,
        heatmap,
    }))
}
