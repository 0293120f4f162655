//! Axum route handler for appending a section to an artifact.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AttachSectionRequest {
    pub section_id: i32,
    /// Appends past the current maximum when omitted.
    #[serde(default)]
    pub section_order: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct AttachSectionResponse {
    pub artifact_id: i32,
    pub section_id: i32,
    pub section_order: i32,
}

/// POST /api/v1/artifacts/:id/sections
pub async fn handle_attach_section(
    State(state): State<AppState>,
    Path(artifact_id): Path<i32>,
    Json(request): Json<AttachSectionRequest>,
) -> Result<Json<AttachSectionResponse>, AppError> {
    let section_order = state
        .sections
        .attach_section(artifact_id, request.section_id, request.section_order)
        .await?;

    info!(
        "Attached section {} to artifact {artifact_id} at order {section_order}",
        request.section_id
    );
    Ok(Json(AttachSectionResponse {
        artifact_id,
        section_id: request.section_id,
        section_order,
    }))
}
