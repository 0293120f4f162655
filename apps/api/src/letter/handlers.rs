//! Axum route handlers for the cover-letter path.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::convert::pandoc::DEFAULT_PDF_ENGINE;
use crate::errors::AppError;
use crate::letter::composer::compose;
use crate::models::artifact::ArtifactType;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub username: String,
    pub application_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct CoverLetterConvertRequest {
    pub application_id: i32,
    #[serde(default)]
    pub engine: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MarkdownResponse {
    pub path: String,
    pub markdown: String,
}

#[derive(Debug, Serialize)]
pub struct ConversionResponse {
    pub path: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letter/markdown
///
/// Composes the letter from persisted sections and writes it to storage,
/// namespaced by application id.
pub async fn handle_cover_letter_markdown(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<MarkdownResponse>, AppError> {
    if request.username.trim().is_empty() {
        return Err(AppError::Validation("username cannot be empty".to_string()));
    }

    let markdown = compose(
        state.letters.as_ref(),
        &request.username,
        request.application_id,
    )
    .await?;

    let path = state
        .converter
        .markdown_path(ArtifactType::CoverLetter, Some(request.application_id));
    tokio::fs::write(&path, &markdown).await?;
    info!(
        "Wrote cover letter markdown for application {} to {}",
        request.application_id,
        path.display()
    );

    Ok(Json(MarkdownResponse {
        path: path.display().to_string(),
        markdown,
    }))
}

/// POST /api/v1/cover-letter/odt
pub async fn handle_cover_letter_odt(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterConvertRequest>,
) -> Result<Json<ConversionResponse>, AppError> {
    let markdown_path = state
        .converter
        .markdown_path(ArtifactType::CoverLetter, Some(request.application_id));
    let output_path = state.converter.output_path(
        ArtifactType::CoverLetter,
        Some(request.application_id),
        "odt",
    );
    state.converter.to_odt(&markdown_path, &output_path).await?;

    Ok(Json(ConversionResponse {
        path: output_path.display().to_string(),
    }))
}

/// POST /api/v1/cover-letter/pdf
pub async fn handle_cover_letter_pdf(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterConvertRequest>,
) -> Result<Json<ConversionResponse>, AppError> {
    let engine = request
        .engine
        .unwrap_or_else(|| DEFAULT_PDF_ENGINE.to_string());

    let markdown_path = state
        .converter
        .markdown_path(ArtifactType::CoverLetter, Some(request.application_id));
    let output_path = state.converter.output_path(
        ArtifactType::CoverLetter,
        Some(request.application_id),
        "pdf",
    );
    state
        .converter
        .to_pdf(
            ArtifactType::CoverLetter,
            &markdown_path,
            &output_path,
            &engine,
        )
        .await?;

    Ok(Json(ConversionResponse {
        path: output_path.display().to_string(),
    }))
}
