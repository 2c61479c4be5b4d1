//! User repository for database operations.

use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;
use domain::models::UserRole;

/// Repository for user-related database operations.
#[derive(Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user.
    pub async fn create(
        &self,
        club_id: Uuid,
        display_name: &str,
        email: &str,
        role: UserRole,
        level: &str,
        category: &str,
    ) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let now = Utc::now();
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (id, club_id, display_name, email, role, level, category,
                               credit_cents, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, 0, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(club_id)
        .bind(display_name)
        .bind(email)
        .bind(role)
        .bind(level)
        .bind(category)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find user by UUID.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT * FROM users WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }
}
