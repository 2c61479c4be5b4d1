//! Time slot repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::entities::{TimeSlotEntity, TimeSlotWithCountsEntity};
use crate::metrics::QueryTimer;
use domain::services::slot_grid::SlotBlueprint;

/// Repository for time-slot-related database operations.
#[derive(Clone)]
pub struct TimeSlotRepository {
    pool: SqlitePool,
}

impl TimeSlotRepository {
    /// Creates a new TimeSlotRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a single slot. Fails with a unique violation when the natural
    /// key `(club_id, instructor_id, start_at)` is taken.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        club_id: Uuid,
        court_id: Option<Uuid>,
        instructor_id: Option<Uuid>,
        start_at: DateTime<Utc>,
        end_at: DateTime<Utc>,
        max_players: i64,
        total_price_cents: i64,
        level: &str,
        category: &str,
    ) -> Result<TimeSlotEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_time_slot");
        let now = Utc::now();
        let result = sqlx::query_as::<_, TimeSlotEntity>(
            r#"
            INSERT INTO time_slots (id, club_id, court_id, instructor_id, start_at, end_at,
                                    max_players, total_price_cents, level, category,
                                    created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id)
        .bind(court_id)
        .bind(instructor_id)
        .bind(start_at)
        .bind(end_at)
        .bind(max_players)
        .bind(total_price_cents)
        .bind(level)
        .bind(category)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Insert a generated slot unless its grid position is already taken.
    ///
    /// Returns true when a row was inserted; a conflict on the natural key is
    /// a silent skip, not an error.
    pub async fn insert_if_absent(&self, blueprint: &SlotBlueprint) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("insert_time_slot_if_absent");
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO time_slots (id, club_id, court_id, instructor_id, start_at, end_at,
                                    max_players, total_price_cents, level, category,
                                    created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ON CONFLICT (club_id, instructor_id, start_at) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(blueprint.club_id)
        .bind(blueprint.court_id)
        .bind(blueprint.instructor_id)
        .bind(blueprint.start_at)
        .bind(blueprint.end_at)
        .bind(blueprint.max_players)
        .bind(blueprint.total_price_cents)
        .bind(&blueprint.level)
        .bind(&blueprint.category)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await;
        timer.record();
        Ok(result?.rows_affected() > 0)
    }

    /// Find slot by UUID.
    pub async fn find_by_id(
        &self,
        time_slot_id: Uuid,
    ) -> Result<Option<TimeSlotEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_time_slot_by_id");
        let result = sqlx::query_as::<_, TimeSlotEntity>(
            r#"
            SELECT * FROM time_slots WHERE id = $1
            "#,
        )
        .bind(time_slot_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List a club's slots starting within `[day_start, day_end)`, with
    /// aggregated booking counts per slot.
    pub async fn list_by_club_and_day(
        &self,
        club_id: Uuid,
        day_start: DateTime<Utc>,
        day_end: DateTime<Utc>,
    ) -> Result<Vec<TimeSlotWithCountsEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_time_slots_by_club_and_day");
        let result = sqlx::query_as::<_, TimeSlotWithCountsEntity>(
            r#"
            SELECT ts.*,
                   (SELECT COUNT(*) FROM bookings b
                    WHERE b.time_slot_id = ts.id AND b.status = 'confirmed') AS confirmed_players,
                   (SELECT COUNT(*) FROM bookings b
                    WHERE b.time_slot_id = ts.id AND b.status = 'pending') AS pending_requests
            FROM time_slots ts
            WHERE ts.club_id = $1 AND ts.start_at >= $2 AND ts.start_at < $3
            ORDER BY ts.start_at ASC
            "#,
        )
        .bind(club_id)
        .bind(day_start)
        .bind(day_end)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
