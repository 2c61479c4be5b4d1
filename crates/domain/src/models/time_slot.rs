//! Time slot domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A bookable interval `[start_at, end_at)` at a club.
///
/// A slot can be filled through several modalities: each `group_size` a
/// booking names is a different way to split the slot (1 player pays the
/// full price alone, 4 players split it).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: Uuid,
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn default_max_players() -> i64 {
    4
}

fn default_level() -> String {
    "open".to_string()
}

fn default_category() -> String {
    "mixed".to_string()
}

/// Request payload for creating a single slot by hand.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTimeSlotRequest {
    pub club_id: Uuid,

    pub court_id: Option<Uuid>,

    pub instructor_id: Option<Uuid>,

    pub start_at: DateTime<Utc>,

    pub end_at: DateTime<Utc>,

    #[serde(default = "default_max_players")]
    #[validate(range(min = 1, max = 8, message = "Capacity must be 1-8 players"))]
    pub max_players: i64,

    #[validate(custom(function = "shared::validation::validate_price_cents"))]
    pub total_price_cents: i64,

    #[serde(default = "default_level")]
    #[validate(custom(function = "shared::validation::validate_skill_level"))]
    pub level: String,

    #[serde(default = "default_category")]
    #[validate(custom(function = "shared::validation::validate_category"))]
    pub category: String,
}

/// Request payload for generating open slots across the schedule grid.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSlotsRequest {
    pub club_id: Uuid,

    /// First day to cover; defaults to today (UTC).
    pub start_date: Option<NaiveDate>,

    /// Number of days to cover; defaults to the configured horizon.
    #[validate(range(min = 1, max = 60, message = "Days must be 1-60"))]
    pub days: Option<u32>,
}

/// Response payload for slot generation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateSlotsResponse {
    /// Slots inserted by this run.
    pub created: u64,
    /// Grid positions that already had a slot.
    pub skipped: u64,
}

/// Query parameters for listing a club's slots on one day.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTimeSlotsQuery {
    pub club_id: Uuid,
    pub date: NaiveDate,
}

/// Response payload for a single slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotResponse {
    pub time_slot_id: Uuid,
    pub club_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
    pub created_at: DateTime<Utc>,
}

impl From<TimeSlot> for TimeSlotResponse {
    fn from(slot: TimeSlot) -> Self {
        Self {
            time_slot_id: slot.id,
            club_id: slot.club_id,
            court_id: slot.court_id,
            instructor_id: slot.instructor_id,
            start_at: slot.start_at,
            end_at: slot.end_at,
            max_players: slot.max_players,
            total_price_cents: slot.total_price_cents,
            level: slot.level,
            category: slot.category,
            created_at: slot.created_at,
        }
    }
}

/// One slot in the day listing, with aggregated booking counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotSummary {
    pub time_slot_id: Uuid,
    pub club_id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub court_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructor_id: Option<Uuid>,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
    /// Players locked in through a confirmed modality.
    pub confirmed_players: i64,
    /// Pending booking requests across all modalities.
    pub pending_requests: i64,
}

/// List response for a club's slots on one day.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTimeSlotsResponse {
    pub time_slots: Vec<TimeSlotSummary>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_time_slot_request_defaults() {
        let json = r#"{
            "clubId": "550e8400-e29b-41d4-a716-446655440000",
            "startAt": "2026-09-01T10:00:00Z",
            "endAt": "2026-09-01T11:30:00Z",
            "totalPriceCents": 6000
        }"#;

        let request: CreateTimeSlotRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.max_players, 4);
        assert_eq!(request.level, "open");
        assert_eq!(request.category, "mixed");
        assert!(request.court_id.is_none());
    }

    #[test]
    fn test_generate_slots_request_rejects_zero_days() {
        use validator::Validate;

        let request = GenerateSlotsRequest {
            club_id: Uuid::new_v4(),
            start_date: None,
            days: Some(0),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_list_time_slots_query_deserialization() {
        let query: ListTimeSlotsQuery = serde_json::from_str(
            r#"{"clubId": "550e8400-e29b-41d4-a716-446655440000", "date": "2026-09-01"}"#,
        )
        .unwrap();
        assert_eq!(query.date, NaiveDate::from_ymd_opt(2026, 9, 1).unwrap());
    }
}
