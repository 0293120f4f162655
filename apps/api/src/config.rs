use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Directory where generated markdown/ODT/PDF files land.
    pub storage_dir: PathBuf,
    /// The declarative resume document, re-read on every render request.
    pub resume_data_path: PathBuf,
    /// Directory holding the pandoc reference doc and LaTeX templates.
    pub template_dir: PathBuf,
    pub pandoc_bin: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            storage_dir: env_path("STORAGE_DIR", "storage"),
            resume_data_path: env_path("RESUME_DATA_PATH", "config/resume.yaml"),
            template_dir: env_path("TEMPLATE_DIR", "config"),
            pandoc_bin: env_path("PANDOC_BIN", "pandoc"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_path(key: &str, default: &str) -> PathBuf {
    PathBuf::from(std::env::var(key).unwrap_or_else(|_| default.to_string()))
}
