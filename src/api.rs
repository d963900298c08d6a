//! JSON REST API for the settlement core.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/settlements` | All events with costed contributions |
//! | `GET`  | `/events/{id}/settlement` | One event's settlement view |
//! | `POST` | `/events/{id}/settlement/toggle` | Body: [`ToggleBody`]; flips a pair's settled flag |
//! | `GET`  | `/settlements/activity` | Append-only ledger, newest first |
//!
//! Monetary values are decimal strings at this boundary.

use crate::error::AppError;
use crate::models::{EventSettlement, SettlementActivityEntry, Transfer};
use crate::services::SettlementService;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// An error returned by an API handler
pub struct ApiError(AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Build the API router for the settlement service
pub fn api_router(service: Arc<SettlementService>) -> Router<()> {
    Router::new()
        .route("/settlements", get(list_settlements))
        .route("/settlements/activity", get(list_activity))
        .route("/events/{id}/settlement", get(get_event_settlement))
        .route("/events/{id}/settlement/toggle", post(toggle_settlement))
        .with_state(service)
}

/// `GET /settlements`
async fn list_settlements(
    State(service): State<Arc<SettlementService>>,
) -> Result<Json<Vec<EventSettlement>>, ApiError> {
    let settlements = service.compute_all_settlements().await?;
    Ok(Json(settlements))
}

/// `GET /events/{id}/settlement`
async fn get_event_settlement(
    State(service): State<Arc<SettlementService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<EventSettlement>, ApiError> {
    let settlement = service.compute_event_settlement(id).await?;
    Ok(Json(settlement))
}

/// JSON body accepted by `POST /events/{id}/settlement/toggle`
#[derive(Debug, Deserialize)]
pub struct ToggleBody {
    pub debtor_id: Uuid,
    pub creditor_id: Uuid,
}

/// `POST /events/{id}/settlement/toggle`
async fn toggle_settlement(
    State(service): State<Arc<SettlementService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<ToggleBody>,
) -> Result<Json<Transfer>, ApiError> {
    let transfer = service
        .toggle_settlement(id, body.debtor_id, body.creditor_id)
        .await?;
    Ok(Json(transfer))
}

/// `GET /settlements/activity`
async fn list_activity(
    State(service): State<Arc<SettlementService>>,
) -> Result<Json<Vec<SettlementActivityEntry>>, ApiError> {
    let entries = service.list_activity().await?;
    Ok(Json(entries))
}
