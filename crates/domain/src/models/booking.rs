//! Booking domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Links a user to a time slot with a chosen group size ("modality").
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    /// Number of players that fills this modality (1 = solo, 2 = doubles, ...).
    pub group_size: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle state of a booking.
///
/// Pending bookings confirm when their modality fills, and are cancelled when
/// the user backs out or a competing modality on the same slot wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Converts to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

/// Request payload for booking a modality on a time slot.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub user_id: Uuid,

    pub time_slot_id: Uuid,

    #[validate(range(min = 1, message = "Group size must be at least 1"))]
    pub group_size: i64,
}

/// Response payload for a single booking.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub time_slot_id: Uuid,
    pub group_size: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            booking_id: booking.id,
            user_id: booking.user_id,
            time_slot_id: booking.time_slot_id,
            group_size: booking.group_size,
            status: booking.status,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}

/// What the synchronous confirmation pass did, reported back to the caller
/// whose booking filled the modality.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationSummary {
    pub confirmed_user_ids: Vec<Uuid>,
    pub cancelled_competing: u64,
}

/// Response payload for booking intake.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingResponse {
    pub booking: BookingResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<ConfirmationSummary>,
}

/// One booking on a slot, with the member's name for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBookingEntry {
    pub user_id: Uuid,
    pub display_name: String,
    pub group_size: i64,
    pub status: BookingStatus,
}

/// List response for the bookings on one time slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotBookingsResponse {
    pub bookings: Vec<SlotBookingEntry>,
    pub total: usize,
}

/// Query parameters for a user's booking history.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUserBookingsQuery {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
}

/// Cursor-paginated booking history for one user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingsResponse {
    pub bookings: Vec<BookingResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_cursor: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_status_as_str() {
        assert_eq!(BookingStatus::Pending.as_str(), "pending");
        assert_eq!(BookingStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(BookingStatus::Cancelled.as_str(), "cancelled");
    }

    #[test]
    fn test_booking_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Confirmed).unwrap(),
            r#""confirmed""#
        );
    }

    #[test]
    fn test_create_booking_request_deserialization() {
        let json = r#"{
            "userId": "550e8400-e29b-41d4-a716-446655440000",
            "timeSlotId": "650e8400-e29b-41d4-a716-446655440000",
            "groupSize": 2
        }"#;

        let request: CreateBookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.group_size, 2);
    }

    #[test]
    fn test_create_booking_request_rejects_zero_group_size() {
        use validator::Validate;

        let request = CreateBookingRequest {
            user_id: Uuid::new_v4(),
            time_slot_id: Uuid::new_v4(),
            group_size: 0,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_create_booking_response_omits_empty_confirmation() {
        let response = CreateBookingResponse {
            booking: BookingResponse {
                booking_id: Uuid::new_v4(),
                user_id: Uuid::new_v4(),
                time_slot_id: Uuid::new_v4(),
                group_size: 2,
                status: BookingStatus::Pending,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            confirmation: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("confirmation"));
        assert!(json.contains(r#""status":"pending""#));
    }
}
