//! Persistence lookups the composer depends on, behind a trait so the
//! composition logic is testable without a live database.
//!
//! Carried in `AppState` as `Arc<dyn LetterSource>`.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::artifact::{ArtifactRow, ArtifactType, SectionRow};
use crate::models::tracker::{ApplicationRow, JobRow};
use crate::models::user::UserRow;
use crate::sections::store::SectionStore;

#[async_trait]
pub trait LetterSource: Send + Sync {
    async fn user_by_username(&self, username: &str) -> Result<Option<UserRow>, AppError>;
    async fn application_by_id(&self, id: i32) -> Result<Option<ApplicationRow>, AppError>;
    async fn job_by_id(&self, id: i32) -> Result<Option<JobRow>, AppError>;
    /// The application's cover-letter artifact. Deterministic when several
    /// exist: lowest id wins.
    async fn cover_letter_artifact(
        &self,
        application_id: i32,
    ) -> Result<Option<ArtifactRow>, AppError>;
    async fn ordered_sections(&self, artifact_id: i32) -> Result<Vec<SectionRow>, AppError>;
}

/// sqlx-backed lookup implementation.
pub struct PgLetterSource {
    db: PgPool,
    sections: SectionStore,
}

impl PgLetterSource {
    pub fn new(db: PgPool) -> Self {
        Self {
            sections: SectionStore::new(db.clone()),
            db,
        }
    }
}

#[async_trait]
impl LetterSource for PgLetterSource {
    async fn user_by_username(&self, username: &str) -> Result<Option<UserRow>, AppError> {
        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, username, full_name, email, phone, address, city, state, postal_code,
                    is_active, created_at, updated_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn application_by_id(&self, id: i32) -> Result<Option<ApplicationRow>, AppError> {
        let application = sqlx::query_as::<_, ApplicationRow>(
            "SELECT id, job_id, date_sent, contact, contact_address, response,
                    next_action_date, notes, active, created_at, updated_at
             FROM applications WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(application)
    }

    async fn job_by_id(&self, id: i32) -> Result<Option<JobRow>, AppError> {
        let job = sqlx::query_as::<_, JobRow>(
            "SELECT id, company, title, posting_url, required_skills, date_found, status,
                    fit_score, notes, role_id, created_at, updated_at
             FROM jobs WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(job)
    }

    async fn cover_letter_artifact(
        &self,
        application_id: i32,
    ) -> Result<Option<ArtifactRow>, AppError> {
        let artifact = sqlx::query_as::<_, ArtifactRow>(
            "SELECT id, application_id, artifact_type, version_name, location, notes, active,
                    created_at, updated_at
             FROM artifacts
             WHERE application_id = $1 AND artifact_type = $2
             ORDER BY id ASC
             LIMIT 1",
        )
        .bind(application_id)
        .bind(ArtifactType::CoverLetter.as_str())
        .fetch_optional(&self.db)
        .await?;
        Ok(artifact)
    }

    async fn ordered_sections(&self, artifact_id: i32) -> Result<Vec<SectionRow>, AppError> {
        self.sections.ordered_sections(artifact_id).await
    }
}
