//! Axum route handlers for the resume path.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assembly::document::build_markdown;
use crate::assembly::resume_data::ResumeData;
use crate::assembly::tag_filter::{TagFilterSpec, MODE_ANY};
use crate::convert::pandoc::DEFAULT_PDF_ENGINE;
use crate::errors::AppError;
use crate::models::artifact::ArtifactType;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResumeMarkdownRequest {
    /// Comma-separated tag list.
    #[serde(default)]
    pub include: String,
    #[serde(default)]
    pub exclude: String,
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    MODE_ANY.to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct PdfRequest {
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

/// POST /api/v1/resume/markdown
///
/// Re-reads the declarative resume document, filters it through the
/// requested tag spec, and writes the assembled markdown to storage.
pub async fn handle_resume_markdown(
    State(state): State<AppState>,
    Json(request): Json<ResumeMarkdownRequest>,
) -> Result<Json<MarkdownResponse>, AppError> {
    let spec = TagFilterSpec::from_raw(&request.include, &request.exclude, &request.mode)?;
    let data = ResumeData::load(&state.config.resume_data_path).await?;
    let markdown = build_markdown(&data, &spec)?;

    let path = state.converter.markdown_path(ArtifactType::Resume, None);
    tokio::fs::write(&path, &markdown).await?;
    info!("Wrote resume markdown to {}", path.display());

    Ok(Json(MarkdownResponse {
        path: path.display().to_string(),
        markdown,
    }))
}

/// POST /api/v1/resume/odt
pub async fn handle_resume_odt(
    State(state): State<AppState>,
) -> Result<Json<ConversionResponse>, AppError> {
    let markdown_path = state.converter.markdown_path(ArtifactType::Resume, None);
    let output_path = state.converter.output_path(ArtifactType::Resume, None, "odt");
    state.converter.to_odt(&markdown_path, &output_path).await?;

    Ok(Json(ConversionResponse {
        path: output_path.display().to_string(),
    }))
}

/// POST /api/v1/resume/pdf
pub async fn handle_resume_pdf(
    State(state): State<AppState>,
    request: Option<Json<PdfRequest>>,
) -> Result<Json<ConversionResponse>, AppError> {
    let engine = request
        .and_then(|Json(r)| r.engine)
        .unwrap_or_else(|| DEFAULT_PDF_ENGINE.to_string());

    let markdown_path = state.converter.markdown_path(ArtifactType::Resume, None);
    let output_path = state.converter.output_path(ArtifactType::Resume, None, "pdf");
    state
        .converter
        .to_pdf(ArtifactType::Resume, &markdown_path, &output_path, &engine)
        .await?;

    Ok(Json(ConversionResponse {
        path: output_path.display().to_string(),
    }))
}
