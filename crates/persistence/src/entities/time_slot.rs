//! Time slot entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use domain::models::TimeSlot;

/// Database row mapping for the time_slots table.
#[derive(Debug, Clone, FromRow)]
pub struct TimeSlotEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TimeSlotEntity> for TimeSlot {
    fn from(entity: TimeSlotEntity) -> Self {
        Self {
            id: entity.id,
            club_id: entity.club_id,
            court_id: entity.court_id,
            instructor_id: entity.instructor_id,
            start_at: entity.start_at,
            end_at: entity.end_at,
            max_players: entity.max_players,
            total_price_cents: entity.total_price_cents,
            level: entity.level,
            category: entity.category,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// A time slot row joined with its aggregated booking counts, for the day
/// listing.
#[derive(Debug, Clone, FromRow)]
pub struct TimeSlotWithCountsEntity {
    pub id: Uuid,
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub confirmed_players: i64,
    pub pending_requests: i64,
}
