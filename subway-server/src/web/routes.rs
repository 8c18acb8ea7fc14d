//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::domain::{LineId, StationId};
use crate::service::ServiceError;
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", post(create_station).get(list_stations))
        .route("/stations/:id", delete(delete_station))
        .route("/lines", post(create_line).get(list_lines))
        .route(
            "/lines/:id",
            get(get_line).put(update_line).delete(delete_line),
        )
        .route("/lines/:id/sections", post(add_section).delete(remove_section))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Register a station.
async fn create_station(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: StationRequest = parse_json(&body)?;
    let station = state.stations.create(req.name).await;

    let location = format!("/stations/{}", station.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(StationResponse::from_station(&station)),
    )
        .into_response())
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.stations.list().await;
    Json(stations.iter().map(StationResponse::from_station).collect())
}

/// Delete a station.
async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.stations.remove(StationId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a line with its first section.
async fn create_line(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: LineCreateRequest = parse_json(&body)?;

    let details = state
        .lines
        .create_line(
            req.name,
            req.color,
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .await?;

    let location = format!("/lines/{}", details.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(LineResponse::from_details(&details)),
    )
        .into_response())
}

/// List all lines with their ordered stations.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let lines = state.lines.list_lines().await?;
    Ok(Json(lines.iter().map(LineResponse::from_details).collect()))
}

/// A single line with its ordered stations.
async fn get_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<LineResponse>, AppError> {
    let details = state.lines.get_line(LineId(id)).await?;
    Ok(Json(LineResponse::from_details(&details)))
}

/// Update a line's display fields.
async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let req: LineUpdateRequest = parse_json(&body)?;
    state.lines.update_line(LineId(id), req.name, req.color).await?;
    Ok(StatusCode::OK)
}

/// Delete a line and its sections.
async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, AppError> {
    state.lines.delete_line(LineId(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Append a section at the tail of a line.
async fn add_section(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
    body: Bytes,
) -> Result<Response, AppError> {
    let req: SectionRequest = parse_json(&body)?;

    let details = state
        .lines
        .add_section(
            LineId(line_id),
            StationId(req.up_station_id),
            StationId(req.down_station_id),
            req.distance,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(LineResponse::from_details(&details))).into_response())
}

/// Detach a line's terminal station.
async fn remove_section(
    State(state): State<AppState>,
    Path(line_id): Path<u64>,
    Query(query): Query<SectionRemovalQuery>,
) -> Result<StatusCode, AppError> {
    state
        .lines
        .remove_section(LineId(line_id), StationId(query.station_id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Parse a JSON body, logging the payload on failure.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("JSON parse error: {e}; body: {}", String::from_utf8_lossy(body));
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::StationNotFound(_) | StoreError::LineNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::CorruptLine { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Rule(err) => AppError::BadRequest {
                message: err.to_string(),
            },
            ServiceError::InvalidSection(err) => AppError::BadRequest {
                message: err.to_string(),
            },
            ServiceError::Store(err) => err.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!("[{status}] {message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
