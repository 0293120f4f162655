use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::convert::pandoc::DocumentConverter;
use crate::letter::source::LetterSource;
use crate::sections::store::SectionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Shared pool handle; the stores below hold their own clones.
    #[allow(dead_code)]
    pub db: PgPool,
    pub config: Config,
    /// Ordered artifact↔section association access for the cover-letter path.
    pub sections: SectionStore,
    /// Persistence lookups behind a trait so the composer stays testable
    /// without a live database.
    pub letters: Arc<dyn LetterSource>,
    /// Pandoc driver, configured once at startup with binary/storage/template
    /// paths — no global state.
    pub converter: DocumentConverter,
}
