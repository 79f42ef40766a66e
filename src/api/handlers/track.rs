//! `GET /track/{code}` handler.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::TrackResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the aggregated click history for a code. Codes with no recorded
/// clicks (unknown, never visited, or already swept) answer with empty
/// lists, never an error.
pub async fn track_handler(
    State(st): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<TrackResponse>, AppError> {
    let data = st.tracking.track(&code).await?;
    Ok(Json(data.into()))
}
