//! Court domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A physical court belonging to one club.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Court {
    pub id: Uuid,
    pub club_id: Uuid,
    pub name: String,
    pub indoor: bool,
    pub created_at: DateTime<Utc>,
}

/// Request payload for adding a court to a club.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourtRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    pub indoor: bool,
}

/// Response payload for court operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtResponse {
    pub court_id: Uuid,
    pub club_id: Uuid,
    pub name: String,
    pub indoor: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Court> for CourtResponse {
    fn from(court: Court) -> Self {
        Self {
            court_id: court.id,
            club_id: court.club_id,
            name: court.name,
            indoor: court.indoor,
            created_at: court.created_at,
        }
    }
}

/// List response for a club's courts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListCourtsResponse {
    pub courts: Vec<CourtResponse>,
    pub total: usize,
}
