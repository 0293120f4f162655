//! The declarative resume document — a YAML file grouped into named
//! sections, loaded once per render request. No in-process caching.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Deserializer};

use crate::assembly::tag_filter::normalize_tags;
use crate::errors::AppError;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResumeData {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub summary: Vec<TextEntry>,
    #[serde(default)]
    pub certification: Vec<CertificationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillEntry>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

/// A filterable free-text fragment (summary item or bullet).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextEntry {
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "de_tags")]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CertificationEntry {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "de_tags")]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SkillEntry {
    #[serde(default)]
    pub header: String,
    #[serde(default)]
    pub skill: String,
    #[serde(default, deserialize_with = "de_tags")]
    pub tags: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<TextEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<TextEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub detail: String,
    /// Often a bare number in the YAML, so it is stringified on load.
    #[serde(default, deserialize_with = "de_scalar_string")]
    pub year: String,
}

impl ResumeData {
    pub async fn load(path: &Path) -> Result<Self, AppError> {
        let raw = tokio::fs::read_to_string(path).await?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

fn de_tags<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(normalize_tags(value.as_ref()))
}

fn de_scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_yaml::Value::String(s)) => s,
        Some(serde_yaml::Value::Number(n)) => n.to_string(),
        Some(serde_yaml::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_tag_shapes() {
        let yaml = r#"
name: Jane Doe
summary:
  - text: Seasoned engineer.
    tags: devops
  - text: Builder of teams.
    tags: [Leadership, " Mentoring "]
  - text: Untagged line.
"#;
        let data: ResumeData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(data.name, "Jane Doe");
        assert_eq!(data.summary.len(), 3);
        assert!(data.summary[0].tags.contains("devops"));
        assert!(data.summary[1].tags.contains("leadership"));
        assert!(data.summary[1].tags.contains("mentoring"));
        assert!(data.summary[2].tags.is_empty());
    }

    #[test]
    fn test_numeric_education_year_stringified() {
        let yaml = r#"
education:
  - school: State University
    detail: BSc Computer Science
    year: 2016
"#;
        let data: ResumeData = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(data.education[0].year, "2016");
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let data: ResumeData = serde_yaml::from_str("name: Jane Doe").unwrap();
        assert!(data.summary.is_empty());
        assert!(data.experience.is_empty());
        assert!(data.education.is_empty());
    }

    #[tokio::test]
    async fn test_load_reads_document_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.yaml");
        std::fs::write(&path, "name: Jane Doe\n").unwrap();
        let data = ResumeData::load(&path).await.unwrap();
        assert_eq!(data.name, "Jane Doe");
    }

    #[tokio::test]
    async fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ResumeData::load(&dir.path().join("absent.yaml"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Io(_)));
    }
}
