//! Booking repository for database operations.
//!
//! Holds booking intake writes and the transactional modality-confirmation
//! pass. Counting pending bookings and flipping statuses happens inside one
//! transaction so two racing requests cannot both observe a near-full
//! modality and overshoot it.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{BookingEntity, BookingWithUserEntity};
use crate::metrics::QueryTimer;
use domain::services::confirmation::{modality_fills, ModalityConfirmation};

/// Repository for booking-related database operations.
#[derive(Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a pending booking.
    ///
    /// The partial unique index on live bookings rejects a second
    /// non-cancelled booking for the same `(user, slot, group_size)`.
    pub async fn create(
        &self,
        user_id: Uuid,
        time_slot_id: Uuid,
        group_size: i64,
    ) -> Result<BookingEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_booking");
        let now = Utc::now();
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            INSERT INTO bookings (id, user_id, time_slot_id, group_size, status,
                                  created_at, updated_at)
            VALUES ($1, $2, $3, $4, 'pending', $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(time_slot_id)
        .bind(group_size)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find booking by UUID.
    pub async fn find_by_id(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_booking_by_id");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            SELECT * FROM bookings WHERE id = $1
            "#,
        )
        .bind(booking_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Whether the user already holds a non-cancelled booking for this
    /// modality.
    pub async fn has_live_booking(
        &self,
        user_id: Uuid,
        time_slot_id: Uuid,
        group_size: i64,
    ) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("has_live_booking");
        let result = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM bookings
                WHERE user_id = $1 AND time_slot_id = $2 AND group_size = $3
                  AND status <> 'cancelled'
            )
            "#,
        )
        .bind(user_id)
        .bind(time_slot_id)
        .bind(group_size)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Count confirmed bookings for a `(slot, group_size)` modality.
    pub async fn count_confirmed(
        &self,
        time_slot_id: Uuid,
        group_size: i64,
    ) -> Result<i64, sqlx::Error> {
        let timer = QueryTimer::new("count_confirmed_bookings");
        let result = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE time_slot_id = $1 AND group_size = $2 AND status = 'confirmed'
            "#,
        )
        .bind(time_slot_id)
        .bind(group_size)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List bookings on a slot with each member's display name.
    pub async fn list_by_slot(
        &self,
        time_slot_id: Uuid,
    ) -> Result<Vec<BookingWithUserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_by_slot");
        let result = sqlx::query_as::<_, BookingWithUserEntity>(
            r#"
            SELECT b.id, b.user_id, b.time_slot_id, b.group_size, b.status,
                   b.created_at, b.updated_at, u.display_name
            FROM bookings b
            JOIN users u ON u.id = b.user_id
            WHERE b.time_slot_id = $1
            ORDER BY b.created_at ASC
            "#,
        )
        .bind(time_slot_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    /// A user's booking history, newest first, keyset-paginated on
    /// `(created_at, id)`.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        cursor: Option<(DateTime<Utc>, Uuid)>,
        limit: i64,
    ) -> Result<Vec<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_bookings_by_user");
        let result = if let Some((created_at, id)) = cursor {
            sqlx::query_as::<_, BookingEntity>(
                r#"
                SELECT * FROM bookings
                WHERE user_id = $1
                  AND (created_at < $2 OR (created_at = $2 AND id < $3))
                ORDER BY created_at DESC, id DESC
                LIMIT $4
                "#,
            )
            .bind(user_id)
            .bind(created_at)
            .bind(id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, BookingEntity>(
                r#"
                SELECT * FROM bookings
                WHERE user_id = $1
                ORDER BY created_at DESC, id DESC
                LIMIT $2
                "#,
            )
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
        };
        timer.record();
        result
    }

    /// Cancel a pending booking.
    ///
    /// Returns the updated row, or None when the booking is no longer
    /// pending (already confirmed or cancelled in the meantime).
    pub async fn mark_cancelled(
        &self,
        booking_id: Uuid,
    ) -> Result<Option<BookingEntity>, sqlx::Error> {
        let timer = QueryTimer::new("cancel_booking");
        let result = sqlx::query_as::<_, BookingEntity>(
            r#"
            UPDATE bookings SET status = 'cancelled', updated_at = $2
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            "#,
        )
        .bind(booking_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Run the confirmation pass for one `(slot, group_size)` modality.
    ///
    /// Inside a single transaction: count pending bookings, and when the
    /// count reaches the group size, confirm them all and cancel the
    /// confirmed users' pending bookings in other modalities of the same
    /// slot. Re-running on a confirmed modality is a no-op (no pending rows
    /// left to match).
    pub async fn confirm_modality(
        &self,
        time_slot_id: Uuid,
        group_size: i64,
    ) -> Result<ModalityConfirmation, sqlx::Error> {
        let timer = QueryTimer::new("confirm_modality");
        let mut tx = self.pool.begin().await?;

        let pending_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM bookings
            WHERE time_slot_id = $1 AND group_size = $2 AND status = 'pending'
            "#,
        )
        .bind(time_slot_id)
        .bind(group_size)
        .fetch_one(&mut *tx)
        .await?;

        if !modality_fills(pending_count, group_size) {
            tx.rollback().await?;
            timer.record();
            return Ok(ModalityConfirmation::not_filled(pending_count));
        }

        let now = Utc::now();
        let confirmed_user_ids: Vec<Uuid> = sqlx::query_scalar(
            r#"
            UPDATE bookings SET status = 'confirmed', updated_at = $3
            WHERE time_slot_id = $1 AND group_size = $2 AND status = 'pending'
            RETURNING user_id
            "#,
        )
        .bind(time_slot_id)
        .bind(group_size)
        .bind(now)
        .fetch_all(&mut *tx)
        .await?;

        // A confirmed user cannot keep pending requests in other modalities
        // of the same slot.
        let cancelled_competing = sqlx::query(
            r#"
            UPDATE bookings SET status = 'cancelled', updated_at = $3
            WHERE time_slot_id = $1 AND status = 'pending' AND group_size <> $2
              AND user_id IN (
                  SELECT user_id FROM bookings
                  WHERE time_slot_id = $1 AND group_size = $2 AND status = 'confirmed'
              )
            "#,
        )
        .bind(time_slot_id)
        .bind(group_size)
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        tx.commit().await?;
        timer.record();

        debug!(
            time_slot_id = %time_slot_id,
            group_size,
            confirmed = confirmed_user_ids.len(),
            cancelled_competing,
            "Modality confirmed"
        );

        Ok(ModalityConfirmation {
            filled: true,
            pending_count,
            confirmed_user_ids,
            cancelled_competing,
        })
    }
}

/// True when the error is SQLite lock contention worth retrying.
pub fn is_busy_error(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some("5") | Some("6") | Some("261") | Some("517")
        ),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::{
        ClubRepository, InstructorRepository, TimeSlotRepository, UserRepository,
    };
    use chrono::Duration;
    use domain::models::{BookingStatus, UserRole};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database");
        crate::db::MIGRATOR
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    struct Fixture {
        pool: SqlitePool,
        slot_id: Uuid,
        user_a: Uuid,
        user_b: Uuid,
    }

    async fn fixture() -> Fixture {
        let pool = test_pool().await;
        let club = ClubRepository::new(pool.clone())
            .create("Padel Nord", "Barcelona")
            .await
            .unwrap();
        let users = UserRepository::new(pool.clone());
        let user_a = users
            .create(club.id, "Ana", "ana@test.example", UserRole::Player, "open", "mixed")
            .await
            .unwrap();
        let user_b = users
            .create(club.id, "Ben", "ben@test.example", UserRole::Player, "open", "mixed")
            .await
            .unwrap();
        let coach = users
            .create(club.id, "Marta", "marta@test.example", UserRole::Instructor, "open", "mixed")
            .await
            .unwrap();
        let instructor = InstructorRepository::new(pool.clone())
            .create(club.id, coach.id, None)
            .await
            .unwrap();

        let start = Utc::now() + Duration::days(1);
        let slot = TimeSlotRepository::new(pool.clone())
            .create(
                club.id,
                None,
                Some(instructor.id),
                start,
                start + Duration::minutes(90),
                4,
                6000,
                "open",
                "mixed",
            )
            .await
            .unwrap();

        Fixture {
            pool,
            slot_id: slot.id,
            user_a: user_a.id,
            user_b: user_b.id,
        }
    }

    #[tokio::test]
    async fn test_confirm_below_threshold_is_noop() {
        let f = fixture().await;
        let repo = BookingRepository::new(f.pool.clone());

        repo.create(f.user_a, f.slot_id, 2).await.unwrap();
        let outcome = repo.confirm_modality(f.slot_id, 2).await.unwrap();

        assert!(!outcome.filled);
        assert_eq!(outcome.pending_count, 1);
    }

    #[tokio::test]
    async fn test_confirm_fills_modality_and_cancels_competitors() {
        let f = fixture().await;
        let repo = BookingRepository::new(f.pool.clone());

        // User A hedges across two modalities of the same slot.
        let hedge = repo.create(f.user_a, f.slot_id, 3).await.unwrap();
        let a = repo.create(f.user_a, f.slot_id, 2).await.unwrap();
        let b = repo.create(f.user_b, f.slot_id, 2).await.unwrap();

        let outcome = repo.confirm_modality(f.slot_id, 2).await.unwrap();

        assert!(outcome.filled);
        assert_eq!(outcome.confirmed_user_ids.len(), 2);
        assert_eq!(outcome.cancelled_competing, 1);

        let a = repo.find_by_id(a.id).await.unwrap().unwrap();
        let b = repo.find_by_id(b.id).await.unwrap().unwrap();
        let hedge = repo.find_by_id(hedge.id).await.unwrap().unwrap();
        assert_eq!(a.status, BookingStatus::Confirmed);
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert_eq!(hedge.status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_confirm_rerun_is_idempotent() {
        let f = fixture().await;
        let repo = BookingRepository::new(f.pool.clone());

        let a = repo.create(f.user_a, f.slot_id, 2).await.unwrap();
        repo.create(f.user_b, f.slot_id, 2).await.unwrap();
        repo.confirm_modality(f.slot_id, 2).await.unwrap();

        let rerun = repo.confirm_modality(f.slot_id, 2).await.unwrap();
        assert!(!rerun.filled);
        assert_eq!(rerun.pending_count, 0);

        let a = repo.find_by_id(a.id).await.unwrap().unwrap();
        assert_eq!(a.status, BookingStatus::Confirmed);
        assert_eq!(repo.count_confirmed(f.slot_id, 2).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_live_booking_rejected_until_cancelled() {
        let f = fixture().await;
        let repo = BookingRepository::new(f.pool.clone());

        let first = repo.create(f.user_a, f.slot_id, 2).await.unwrap();
        let duplicate = repo.create(f.user_a, f.slot_id, 2).await;
        assert!(duplicate.is_err());

        repo.mark_cancelled(first.id).await.unwrap().unwrap();
        // A cancelled row no longer blocks rebooking the modality.
        assert!(repo.create(f.user_a, f.slot_id, 2).await.is_ok());
    }

    #[test]
    fn test_is_busy_error_ignores_other_errors() {
        assert!(!is_busy_error(&sqlx::Error::RowNotFound));
    }
}
