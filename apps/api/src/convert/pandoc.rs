//! Format Converter — turns an assembled markdown file into ODT or PDF by
//! driving the external pandoc binary.
//!
//! The invocation blocks until pandoc exits; a non-zero exit surfaces as
//! `AppError::Conversion` carrying the exit code and captured diagnostics.
//! No retries — a partial output file is left in place and overwritten by
//! the next successful attempt.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, info};

use crate::config::Config;
use crate::errors::AppError;
use crate::models::artifact::ArtifactType;

pub const DEFAULT_PDF_ENGINE: &str = "tectonic";

const REFERENCE_DOC: &str = "custom-reference.odt";
const RESUME_TEMPLATE: &str = "resume_template.tex";
const COVER_LETTER_TEMPLATE: &str = "cover_letter_template.tex";
const FONT_OPTIONS: [&str; 3] = [
    "fontsize=10pt",
    "mainfont=DejaVu Sans",
    "sansfont=DejaVu Sans",
];

/// Pandoc driver configured once at startup — binary, storage directory,
/// and template directory are explicit construction inputs.
#[derive(Debug, Clone)]
pub struct DocumentConverter {
    pandoc_bin: PathBuf,
    storage_dir: PathBuf,
    template_dir: PathBuf,
}

impl DocumentConverter {
    pub fn new(config: &Config) -> Self {
        Self {
            pandoc_bin: config.pandoc_bin.clone(),
            storage_dir: config.storage_dir.clone(),
            template_dir: config.template_dir.clone(),
        }
    }

    /// Cover letters namespace their files by application id; every other
    /// artifact type shares one fixed name. Concurrent resume builds
    /// therefore race on the same path — a known limitation of the resume
    /// path, documented rather than fixed.
    pub fn file_base_name(artifact_type: ArtifactType, application_id: Option<i32>) -> String {
        match (artifact_type, application_id) {
            (ArtifactType::CoverLetter, Some(id)) => {
                format!("{}_{id}", ArtifactType::CoverLetter.as_str())
            }
            (other, _) => other.as_str().to_string(),
        }
    }

    pub fn markdown_path(&self, artifact_type: ArtifactType, application_id: Option<i32>) -> PathBuf {
        self.artifact_path(artifact_type, application_id, "md")
    }

    pub fn output_path(
        &self,
        artifact_type: ArtifactType,
        application_id: Option<i32>,
        extension: &str,
    ) -> PathBuf {
        self.artifact_path(artifact_type, application_id, extension)
    }

    fn artifact_path(
        &self,
        artifact_type: ArtifactType,
        application_id: Option<i32>,
        extension: &str,
    ) -> PathBuf {
        let base = Self::file_base_name(artifact_type, application_id);
        self.storage_dir.join(format!("{base}.{extension}"))
    }

    /// Markdown → ODT with the fixed reference document for styling; no
    /// per-artifact template selection on this path.
    pub async fn to_odt(&self, markdown_path: &Path, output_path: &Path) -> Result<(), AppError> {
        let reference_doc = self.template_dir.join(REFERENCE_DOC);
        let args = odt_args(markdown_path, &reference_doc, output_path);
        self.run(args).await?;
        info!("Converted {} to ODT", markdown_path.display());
        Ok(())
    }

    /// Markdown → PDF with a LaTeX template keyed by artifact type and
    /// fixed font options; `engine` is passed straight through to pandoc.
    pub async fn to_pdf(
        &self,
        artifact_type: ArtifactType,
        markdown_path: &Path,
        output_path: &Path,
        engine: &str,
    ) -> Result<(), AppError> {
        let template = self.template_dir.join(pdf_template(artifact_type));
        let args = pdf_args(markdown_path, engine, &template, output_path);
        self.run(args).await?;
        info!(
            "Converted {} to PDF via {engine}",
            markdown_path.display()
        );
        Ok(())
    }

    async fn run(&self, args: Vec<OsString>) -> Result<(), AppError> {
        debug!("Invoking {} {:?}", self.pandoc_bin.display(), args);
        let output = Command::new(&self.pandoc_bin).args(&args).output().await?;
        if output.status.success() {
            return Ok(());
        }

        let status = output.status.code().unwrap_or(-1);
        let mut diagnostics = String::from_utf8_lossy(&output.stderr).into_owned();
        if diagnostics.trim().is_empty() {
            diagnostics = String::from_utf8_lossy(&output.stdout).into_owned();
        }
        Err(AppError::Conversion {
            status,
            output: diagnostics,
        })
    }
}

fn pdf_template(artifact_type: ArtifactType) -> &'static str {
    match artifact_type {
        ArtifactType::CoverLetter => COVER_LETTER_TEMPLATE,
        _ => RESUME_TEMPLATE,
    }
}

fn odt_args(markdown_path: &Path, reference_doc: &Path, output_path: &Path) -> Vec<OsString> {
    vec![
        markdown_path.into(),
        "--reference-doc".into(),
        reference_doc.into(),
        "-t".into(),
        "odt".into(),
        "-o".into(),
        output_path.into(),
    ]
}

fn pdf_args(
    markdown_path: &Path,
    engine: &str,
    template: &Path,
    output_path: &Path,
) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        markdown_path.into(),
        "--pdf-engine".into(),
        engine.into(),
        "--template".into(),
        template.into(),
    ];
    for option in FONT_OPTIONS {
        args.push("-V".into());
        args.push(option.into());
    }
    args.push("-o".into());
    args.push(output_path.into());
    args
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_files_namespaced_by_application() {
        assert_eq!(
            DocumentConverter::file_base_name(ArtifactType::CoverLetter, Some(42)),
            "cover_letter_42"
        );
    }

    #[test]
    fn test_resume_uses_fixed_base_name() {
        assert_eq!(
            DocumentConverter::file_base_name(ArtifactType::Resume, None),
            "resume"
        );
        // an application id does not namespace the resume path
        assert_eq!(
            DocumentConverter::file_base_name(ArtifactType::Resume, Some(42)),
            "resume"
        );
    }

    #[test]
    fn test_pdf_template_keyed_by_artifact_type() {
        assert_eq!(pdf_template(ArtifactType::CoverLetter), COVER_LETTER_TEMPLATE);
        assert_eq!(pdf_template(ArtifactType::Resume), RESUME_TEMPLATE);
        assert_eq!(pdf_template(ArtifactType::Bullets), RESUME_TEMPLATE);
    }

    #[test]
    fn test_odt_args_shape() {
        let args = odt_args(
            Path::new("storage/resume.md"),
            Path::new("config/custom-reference.odt"),
            Path::new("storage/resume.odt"),
        );
        let expected: Vec<OsString> = [
            "storage/resume.md",
            "--reference-doc",
            "config/custom-reference.odt",
            "-t",
            "odt",
            "-o",
            "storage/resume.odt",
        ]
        .iter()
        .map(OsString::from)
        .collect();
        assert_eq!(args, expected);
    }

    #[test]
    fn test_pdf_args_carry_engine_template_and_fonts() {
        let args = pdf_args(
            Path::new("storage/cover_letter_42.md"),
            DEFAULT_PDF_ENGINE,
            Path::new("config/cover_letter_template.tex"),
            Path::new("storage/cover_letter_42.pdf"),
        );
        let rendered: Vec<String> = args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        assert!(rendered.contains(&"--pdf-engine".to_string()));
        assert!(rendered.contains(&"tectonic".to_string()));
        assert!(rendered.contains(&"fontsize=10pt".to_string()));
        assert!(rendered.contains(&"mainfont=DejaVu Sans".to_string()));
        assert_eq!(rendered.last().unwrap(), "storage/cover_letter_42.pdf");
    }

    #[test]
    fn test_paths_land_in_storage_dir() {
        let converter = DocumentConverter {
            pandoc_bin: PathBuf::from("pandoc"),
            storage_dir: PathBuf::from("/var/storage"),
            template_dir: PathBuf::from("/etc/templates"),
        };
        assert_eq!(
            converter.markdown_path(ArtifactType::CoverLetter, Some(7)),
            PathBuf::from("/var/storage/cover_letter_7.md")
        );
        assert_eq!(
            converter.output_path(ArtifactType::Resume, None, "pdf"),
            PathBuf::from("/var/storage/resume.pdf")
        );
    }
}
