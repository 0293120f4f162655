//! Document Assembler — invokes the section renderers in a fixed order and
//! joins the surviving fragments into one markdown document.
//!
//! Deterministic: no clocks or randomness, and no dependence on map
//! iteration order. Identical inputs always produce byte-identical output,
//! so regeneration is reproducible and tests can compare on equality.

use crate::assembly::render::{
    render_certification, render_education, render_experience, render_header, render_projects,
    render_skills, render_summary,
};
use crate::assembly::resume_data::ResumeData;
use crate::assembly::tag_filter::TagFilterSpec;
use crate::errors::AppError;

/// Builds the full resume markdown. Non-empty fragments are joined in the
/// fixed section order; output is trimmed and ends with exactly one newline.
pub fn build_markdown(data: &ResumeData, spec: &TagFilterSpec) -> Result<String, AppError> {
    let parts = [
        render_header(data),
        render_summary(data, spec)?,
        render_certification(data, spec)?,
        render_skills(data, spec)?,
        render_experience(data, spec)?,
        render_projects(data, spec)?,
        render_education(data),
    ];

    let joined = parts
        .iter()
        .filter(|p| !p.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    Ok(format!("{}\n", joined.trim()))
}
