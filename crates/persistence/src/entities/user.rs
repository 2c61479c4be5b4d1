//! User entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::{User, UserRole};

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub level: String,
    pub category: String,
    pub credit_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserEntity> for User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            display_name: entity.display_name,
            email: entity.email,
            role: entity.role,
            level: entity.level,
            category: entity.category,
            credit_cents: entity.credit_cents,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
