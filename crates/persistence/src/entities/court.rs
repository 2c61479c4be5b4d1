//! Court entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Court;

/// Database row mapping for the courts table.
#[derive(Debug, Clone, FromRow)]
pub struct CourtEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub name: String,
    pub indoor: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CourtEntity> for Court {
    fn from(entity: CourtEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            name: entity.name,
            indoor: entity.indoor,
            created_at: entity.created_at,
        }
    }
}
