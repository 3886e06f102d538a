// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the map front end.

use crate::error::{AppError, Result};
use crate::models::analysis::FieldConditions;
use crate::models::shape::{DrawnGeometry, Shape, ShapeId};
use crate::services::export::export_shapes;
use crate::services::visualization::{panel_summary, PanelSummary};
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// API routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/shapes", get(list_shapes).post(create_shape).delete(clear_shapes))
        .route("/api/shapes/{id}", put(edit_shape).delete(delete_shape))
        .route("/api/shapes/{id}/select", post(select_shape))
        .route("/api/panel", get(get_panel))
        .route("/api/analyze", post(analyze))
        .route("/api/analyze/status", get(analysis_status))
        .route("/api/export", get(export))
        .route("/api/geocode", get(geocode))
}

// ─── Shapes ──────────────────────────────────────────────────

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ShapesResponse {
    pub shapes: Vec<Shape>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub selected: Option<ShapeId>,
}

async fn list_shapes(State(state): State<Arc<AppState>>) -> Json<ShapesResponse> {
    let workspace = state.session.workspace().await;
    Json(ShapesResponse {
        shapes: workspace.shapes().to_vec(),
        selected: workspace.selected_id().cloned(),
    })
}

/// Draw gesture finished on the map.
async fn create_shape(
    State(state): State<Arc<AppState>>,
    Json(geometry): Json<DrawnGeometry>,
) -> (StatusCode, Json<Shape>) {
    let mut workspace = state.session.workspace().await;
    let shape = workspace.on_shape_created(geometry).clone();
    (StatusCode::CREATED, Json(shape))
}

/// Vertices edited on the map.
async fn edit_shape(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(geometry): Json<DrawnGeometry>,
) -> Result<Json<Shape>> {
    let mut workspace = state.session.workspace().await;
    let shape = workspace.on_shape_edited(&ShapeId::new(id), geometry)?;
    Ok(Json(shape.clone()))
}

async fn delete_shape(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    let id = ShapeId::new(id);
    let mut workspace = state.session.workspace().await;
    workspace
        .delete_shape(&id)
        .ok_or_else(|| AppError::NotFound(format!("Shape not found: {}", id)))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Drawing layer cleared.
async fn clear_shapes(State(state): State<Arc<AppState>>) -> StatusCode {
    state.session.workspace().await.clear();
    StatusCode::NO_CONTENT
}

async fn select_shape(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PanelSummary>> {
    let mut workspace = state.session.workspace().await;
    let shape = workspace.select(&ShapeId::new(id))?;
    Ok(Json(panel_summary(shape)))
}

async fn get_panel(State(state): State<Arc<AppState>>) -> Result<Json<PanelSummary>> {
    let workspace = state.session.workspace().await;
    let shape = workspace
        .selected()
        .ok_or_else(|| AppError::NotFound("No shape selected".to_string()))?;
    Ok(Json(panel_summary(shape)))
}

// ─── Analysis ────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// Crop identifier; the configured default when absent or blank
    #[validate(length(max = 64, message = "crop_type must be at most 64 characters"))]
    #[serde(default)]
    pub crop_type: Option<String>,
    #[serde(default)]
    pub field_data: Option<FieldConditions>,
}

async fn analyze(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AnalyzeRequest>,
) -> Result<Json<PanelSummary>> {
    let body = AnalyzeRequest {
        crop_type: body
            .crop_type
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty()),
        field_data: body.field_data,
    };
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let crop_type = body
        .crop_type
        .as_deref()
        .unwrap_or(&state.config.default_crop_type);

    let summary = state.session.analyze(crop_type, body.field_data).await?;
    Ok(Json(summary))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalysisStatusResponse {
    pub loading: bool,
}

async fn analysis_status(State(state): State<Arc<AppState>>) -> Json<AnalysisStatusResponse> {
    Json(AnalysisStatusResponse {
        loading: state.session.is_loading(),
    })
}

// ─── Export ──────────────────────────────────────────────────

async fn export(State(state): State<Arc<AppState>>) -> Json<FeatureCollection> {
    let workspace = state.session.workspace().await;
    let exported_at = format_utc_rfc3339(chrono::Utc::now());
    Json(export_shapes(workspace.shapes(), &exported_at))
}

// ─── Geocoding ───────────────────────────────────────────────

#[derive(Deserialize, Validate)]
struct GeocodeQuery {
    #[validate(length(min = 1, max = 200, message = "q must be 1-200 characters"))]
    q: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GeocodeResponse {
    pub lat: f64,
    pub lng: f64,
}

async fn geocode(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>> {
    let query = GeocodeQuery {
        q: params.q.trim().to_string(),
    };
    query
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let point = state
        .geocoder
        .search(&query.q)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No place matches '{}'", query.q)))?;

    Ok(Json(GeocodeResponse {
        lat: point.lat,
        lng: point.lng,
    }))
}
