#![allow(dead_code)]

//! Artifact rows and the artifact↔section association.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Kind of generated document. Drives file naming and PDF template
/// selection in the converter; stored as text in `artifacts.artifact_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactType {
    Resume,
    Bullets,
    CoverLetter,
}

impl ArtifactType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtifactType::Resume => "resume",
            ArtifactType::Bullets => "bullets",
            ArtifactType::CoverLetter => "cover_letter",
        }
    }
}

/// A generated document instance tied to one application.
/// Created by the CRUD layer; read-only to the assembly engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArtifactRow {
    pub id: i32,
    pub application_id: i32,
    pub artifact_type: String,
    pub version_name: String,
    pub location: Option<String>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ArtifactMetricRow {
    pub id: i32,
    pub artifact_id: i32,
    pub name: String,
    pub notes: Option<String>,
    pub active: bool,
    pub truth_level: Option<String>,
    pub prompt_strictness: Option<String>,
    pub ai_generated: bool,
    pub bullet_points: Option<bool>,
    pub artifact_format_details: Option<String>,
    pub font_size: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A persisted content block attachable to multiple artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SectionRow {
    pub id: i32,
    pub name: String,
    /// header | text | bullets
    pub section_type: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// One row of the `artifact_sections` association. `section_order` is
/// advisory — ties are broken by `section_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct SectionLink {
    pub artifact_id: i32,
    pub section_id: i32,
    pub section_order: i32,
}
