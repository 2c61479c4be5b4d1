//! Instructor domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A teaching profile, linked 1:1 to a user and belonging to one club.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instructor {
    pub id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for registering an existing user as a club instructor.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInstructorRequest {
    pub user_id: Uuid,

    #[validate(length(max = 500, message = "Bio must be at most 500 characters"))]
    pub bio: Option<String>,
}

/// Response payload for instructor operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstructorResponse {
    pub instructor_id: Uuid,
    pub club_id: Uuid,
    pub user_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Instructor> for InstructorResponse {
    fn from(instructor: Instructor) -> Self {
        Self {
            instructor_id: instructor.id,
            club_id: instructor.club_id,
            user_id: instructor.user_id,
            bio: instructor.bio,
            created_at: instructor.created_at,
        }
    }
}

/// List response for a club's instructors.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListInstructorsResponse {
    pub instructors: Vec<InstructorResponse>,
    pub total: usize,
}
