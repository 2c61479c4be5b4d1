//! Instructor repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::entities::InstructorEntity;
use crate::metrics::QueryTimer;

/// Repository for instructor-related database operations.
#[derive(Clone)]
pub struct InstructorRepository {
    pool: SqlitePool,
}

impl InstructorRepository {
    /// Creates a new InstructorRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register a user as an instructor of a club.
    pub async fn create(
        &self,
        club_id: Uuid,
        user_id: Uuid,
        bio: Option<&str>,
    ) -> Result<InstructorEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_instructor");
        let result = sqlx::query_as::<_, InstructorEntity>(
            r#"
            INSERT INTO instructors (id, club_id, user_id, bio, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id)
        .bind(user_id)
        .bind(bio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find instructor by UUID.
    pub async fn find_by_id(
        &self,
        instructor_id: Uuid,
    ) -> Result<Option<InstructorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_instructor_by_id");
        let result = sqlx::query_as::<_, InstructorEntity>(
            r#"
            SELECT * FROM instructors WHERE id = $1
            "#,
        )
        .bind(instructor_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find all instructors of a club, oldest first.
    pub async fn find_by_club_id(
        &self,
        club_id: Uuid,
    ) -> Result<Vec<InstructorEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_instructors_by_club");
        let result = sqlx::query_as::<_, InstructorEntity>(
            r#"
            SELECT * FROM instructors WHERE club_id = $1 ORDER BY created_at ASC
            "#,
        )
        .bind(club_id)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }
}
