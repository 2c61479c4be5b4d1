//! Court repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::entities::CourtEntity;
use crate::metrics::QueryTimer;

/// Repository for court-related database operations.
#[derive(Clone)]
pub struct CourtRepository {
    pool: SqlitePool,
}

impl CourtRepository {
    /// Creates a new CourtRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new court for a club.
    pub async fn create(
        &self,
        club_id: Uuid,
        name: &str,
        indoor: bool,
    ) -> Result<CourtEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_court");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            INSERT INTO courts (id, club_id, name, indoor, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id)
        .bind(name)
        .bind(indoor)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find court by UUID.
    pub async fn find_by_id(&self, court_id: Uuid) -> Result<Option<CourtEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_court_by_id");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            SELECT * FROM courts WHERE id = $1
            "#,
        )
        .bind(court_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find all courts of a club, by name.
    pub async fn find_by_club_id(&self, club_id: Uuid) -> Result<Vec<CourtEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_courts_by_club");
        let result = sqlx::query_as::<_, CourtEntity>(
            r#"
            SELECT * FROM courts WHERE club_id = $1 ORDER BY name ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
