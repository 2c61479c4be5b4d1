//! Club entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Club;

/// Database row mapping for the clubs table.
#[derive(Debug, Clone, FromRow)]
pub struct ClubEntity {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClubEntity> for Club {
    fn from(entity: ClubEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            city: entity.city,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
