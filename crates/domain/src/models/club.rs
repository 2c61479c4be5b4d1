//! Club domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A venue operating courts, instructors and bookable classes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request payload for creating a club.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClubRequest {
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 100, message = "City must be at most 100 characters"))]
    pub city: String,
}

/// Response payload for club operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubResponse {
    pub club_id: Uuid,
    pub name: String,
    pub city: String,
    pub created_at: DateTime<Utc>,
}

impl From<Club> for ClubResponse {
    fn from(club: Club) -> Self {
        Self {
            club_id: club.id,
            name: club.name,
            city: club.city,
            created_at: club.created_at,
        }
    }
}
