//! User domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Represents a club member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub club_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    /// Free-text skill tier ("open", "beginner", ...).
    pub level: String,
    pub category: String,
    /// Credit balance used for payment, in cents.
    pub credit_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Role a user holds within their club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Player,
    Instructor,
    Admin,
}

impl UserRole {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
        }
    }
}

fn default_role() -> UserRole {
    UserRole::Player
}

fn default_level() -> String {
    "open".to_string()
}

fn default_category() -> String {
    "mixed".to_string()
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub club_id: Uuid,

    #[validate(length(min = 1, max = 100, message = "Display name must be 1-100 characters"))]
    pub display_name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default = "default_role")]
    pub role: UserRole,

    #[serde(default = "default_level")]
    #[validate(custom(function = "shared::validation::validate_skill_level"))]
    pub level: String,

    #[serde(default = "default_category")]
    #[validate(custom(function = "shared::validation::validate_category"))]
    pub category: String,
}

/// Response payload for user operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub club_id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: UserRole,
    pub level: String,
    pub category: String,
    pub credit_cents: i64,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            club_id: user.club_id,
            display_name: user.display_name,
            email: user.email,
            role: user.role,
            level: user.level,
            category: user.category,
            credit_cents: user.credit_cents,
            created_at: user.created_at,
        }
    }
}
