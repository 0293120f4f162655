pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assembly;
use crate::letter;
use crate::sections;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume path — tag-filtered assembly from the YAML document
        .route(
            "/api/v1/resume/markdown",
            post(assembly::handlers::handle_resume_markdown),
        )
        .route(
            "/api/v1/resume/odt",
            post(assembly::handlers::handle_resume_odt),
        )
        .route(
            "/api/v1/resume/pdf",
            post(assembly::handlers::handle_resume_pdf),
        )
        // Cover-letter path — composed from persisted, ordered sections
        .route(
            "/api/v1/cover-letter/markdown",
            post(letter::handlers::handle_cover_letter_markdown),
        )
        .route(
            "/api/v1/cover-letter/odt",
            post(letter::handlers::handle_cover_letter_odt),
        )
        .route(
            "/api/v1/cover-letter/pdf",
            post(letter::handlers::handle_cover_letter_pdf),
        )
        // Section association append
        .route(
            "/api/v1/artifacts/:id/sections",
            post(sections::handlers::handle_attach_section),
        )
        .with_state(state)
}
