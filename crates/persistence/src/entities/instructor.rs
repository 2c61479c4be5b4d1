//! Instructor entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::Instructor;

/// Database row mapping for the instructors table.
#[derive(Debug, Clone, FromRow)]
pub struct InstructorEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<InstructorEntity> for Instructor {
    fn from(entity: InstructorEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            user_id: entity.user_id,
            bio: entity.bio,
            created_at: entity.created_at,
        }
    }
}
