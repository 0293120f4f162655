//! Section Store Adapter — resolves the ordered sequence of sections
//! attached to an artifact through the `artifact_sections` association.
//!
//! Ordering is advisory via `section_order`; the store sorts association
//! rows itself, breaking ties by `section_id`, rather than leaning on the
//! database for the tie-break.

use std::collections::HashMap;

use sqlx::PgPool;
use tracing::debug;

use crate::errors::AppError;
use crate::models::artifact::{SectionLink, SectionRow};

#[derive(Clone)]
pub struct SectionStore {
    db: PgPool,
}

impl SectionStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Returns the artifact's sections sorted by `(section_order, section_id)`.
    pub async fn ordered_sections(&self, artifact_id: i32) -> Result<Vec<SectionRow>, AppError> {
        let mut links: Vec<SectionLink> = sqlx::query_as(
            "SELECT artifact_id, section_id, section_order
             FROM artifact_sections WHERE artifact_id = $1",
        )
        .bind(artifact_id)
        .fetch_all(&self.db)
        .await?;

        if links.is_empty() {
            return Ok(Vec::new());
        }
        sort_by_association_order(&mut links);

        let ids: Vec<i32> = links.iter().map(|l| l.section_id).collect();
        let rows: Vec<SectionRow> = sqlx::query_as(
            "SELECT id, name, section_type, content, created_at, updated_at
             FROM sections WHERE id = ANY($1)",
        )
        .bind(&ids)
        .fetch_all(&self.db)
        .await?;

        let mut by_id: HashMap<i32, SectionRow> = rows.into_iter().map(|r| (r.id, r)).collect();
        let ordered: Vec<SectionRow> = links
            .iter()
            .filter_map(|link| by_id.remove(&link.section_id))
            .collect();

        debug!(
            "Resolved {} ordered sections for artifact {artifact_id}",
            ordered.len()
        );
        Ok(ordered)
    }

    /// One past the current maximum `section_order` for the artifact, or 1
    /// when no sections are attached yet.
    pub async fn next_order_value(&self, artifact_id: i32) -> Result<i32, AppError> {
        let current_max: Option<i32> = sqlx::query_scalar(
            "SELECT MAX(section_order) FROM artifact_sections WHERE artifact_id = $1",
        )
        .bind(artifact_id)
        .fetch_one(&self.db)
        .await?;
        Ok(next_order(current_max))
    }

    /// Attaches a section to an artifact, appending past the current maximum
    /// order when the caller does not specify a position. Returns the order
    /// value used.
    pub async fn attach_section(
        &self,
        artifact_id: i32,
        section_id: i32,
        section_order: Option<i32>,
    ) -> Result<i32, AppError> {
        let order = match section_order {
            Some(order) => order,
            None => self.next_order_value(artifact_id).await?,
        };

        sqlx::query(
            "INSERT INTO artifact_sections (artifact_id, section_id, section_order)
             VALUES ($1, $2, $3)",
        )
        .bind(artifact_id)
        .bind(section_id)
        .bind(order)
        .execute(&self.db)
        .await?;

        Ok(order)
    }
}

/// Total preorder over `(section_order, section_id)`.
pub(crate) fn sort_by_association_order(links: &mut [SectionLink]) {
    links.sort_by_key(|link| (link.section_order, link.section_id));
}

pub(crate) fn next_order(current_max: Option<i32>) -> i32 {
    current_max.unwrap_or(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(section_id: i32, section_order: i32) -> SectionLink {
        SectionLink {
            artifact_id: 1,
            section_id,
            section_order,
        }
    }

    #[test]
    fn test_sorts_ascending_by_order_value() {
        // ids [A(3), B(1), C(2)] → [B, C, A]
        let mut links = vec![link(10, 3), link(11, 1), link(12, 2)];
        sort_by_association_order(&mut links);
        let ids: Vec<i32> = links.iter().map(|l| l.section_id).collect();
        assert_eq!(ids, vec![11, 12, 10]);
    }

    #[test]
    fn test_order_ties_broken_by_section_id() {
        let mut links = vec![link(9, 2), link(3, 2), link(5, 1)];
        sort_by_association_order(&mut links);
        let ids: Vec<i32> = links.iter().map(|l| l.section_id).collect();
        assert_eq!(ids, vec![5, 3, 9]);
    }

    #[test]
    fn test_next_order_appends_past_max() {
        // existing orders {1, 2, 4} → 5
        assert_eq!(next_order(Some(4)), 5);
    }

    #[test]
    fn test_next_order_starts_at_one() {
        assert_eq!(next_order(None), 1);
    }
}
