//! Club repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::entities::ClubEntity;
use crate::metrics::QueryTimer;

/// Repository for club-related database operations.
#[derive(Clone)]
pub struct ClubRepository {
    pool: SqlitePool,
}

impl ClubRepository {
    /// Creates a new ClubRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new club.
    pub async fn create(&self, name: &str, city: &str) -> Result<ClubEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_club");
        let now = Utc::now();
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            INSERT INTO clubs (id, name, city, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(city)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find club by UUID.
    pub async fn find_by_id(&self, club_id: Uuid) -> Result<Option<ClubEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_club_by_id");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            SELECT * FROM clubs WHERE id = $1
            "#,
        )
        .bind(club_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// List all clubs, oldest first. Used by the slot top-up job.
    pub async fn list_all(&self) -> Result<Vec<ClubEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_clubs");
        let result = sqlx::query_as::<_, ClubEntity>(
            r#"
            SELECT * FROM clubs ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
