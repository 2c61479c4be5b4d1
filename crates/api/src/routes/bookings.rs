//! Booking endpoint handlers.
//!
//! Intake validates fast and fails before any write; once the pending row is
//! committed, the confirmation pass runs synchronously in the same request
//! and its failure degrades the response instead of rolling the booking back.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::{record_booking_created, record_bookings_confirmed};
use domain::models::booking::{
    BookingResponse, ConfirmationSummary, CreateBookingRequest, CreateBookingResponse,
};
use domain::models::{Booking, BookingStatus};
use domain::services::confirmation::{ModalityConfirmation, RetryPolicy};
use persistence::repositories::{
    is_busy_error, BookingRepository, TimeSlotRepository, UserRepository,
};

/// Book a modality on a time slot.
///
/// POST /api/v1/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<CreateBookingResponse>), ApiError> {
    request.validate()?;

    let slot_repo = TimeSlotRepository::new(state.pool.clone());
    let slot = slot_repo
        .find_by_id(request.time_slot_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Time slot not found".to_string()))?;

    let user_repo = UserRepository::new(state.pool.clone());
    user_repo
        .find_by_id(request.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if request.group_size > slot.max_players {
        return Err(ApiError::Validation(format!(
            "Group size {} exceeds slot capacity {}",
            request.group_size, slot.max_players
        )));
    }

    let booking_repo = BookingRepository::new(state.pool.clone());

    if booking_repo
        .has_live_booking(request.user_id, request.time_slot_id, request.group_size)
        .await?
    {
        return Err(ApiError::Conflict(
            "User already booked this modality".to_string(),
        ));
    }

    let confirmed = booking_repo
        .count_confirmed(request.time_slot_id, request.group_size)
        .await?;
    if confirmed >= request.group_size {
        return Err(ApiError::Conflict("Modality is already full".to_string()));
    }

    // The partial unique index backs the duplicate check against races; a
    // violation here surfaces as Conflict through the sqlx error mapping.
    let entity = booking_repo
        .create(request.user_id, request.time_slot_id, request.group_size)
        .await?;

    record_booking_created();

    let confirmation =
        run_confirmation(&state, request.time_slot_id, request.group_size).await;
    if let Some(outcome) = confirmation.as_ref().filter(|o| o.filled) {
        record_bookings_confirmed(outcome.confirmed_user_ids.len());
    }

    // Re-read so the response reflects what confirmation did to this booking.
    let entity = booking_repo.find_by_id(entity.id).await?.unwrap_or(entity);

    info!(
        booking_id = %entity.id,
        user_id = %entity.user_id,
        time_slot_id = %entity.time_slot_id,
        group_size = entity.group_size,
        status = entity.status.as_str(),
        "Booking created"
    );

    let summary = confirmation
        .filter(|o| o.filled)
        .map(|o| ConfirmationSummary {
            confirmed_user_ids: o.confirmed_user_ids,
            cancelled_competing: o.cancelled_competing,
        });

    Ok((
        StatusCode::CREATED,
        Json(CreateBookingResponse {
            booking: Booking::from(entity).into(),
            confirmation: summary,
        }),
    ))
}

/// Get a single booking by ID.
///
/// GET /api/v1/bookings/:booking_id
pub async fn get_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let repo = BookingRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    Ok(Json(Booking::from(entity).into()))
}

/// Cancel a pending booking.
///
/// POST /api/v1/bookings/:booking_id/cancel
///
/// Confirmed bookings are locked in and cannot be cancelled here; cancelling
/// an already-cancelled booking is a no-op.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<BookingResponse>, ApiError> {
    let repo = BookingRepository::new(state.pool.clone());
    let entity = repo
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;

    match entity.status {
        BookingStatus::Cancelled => Ok(Json(Booking::from(entity).into())),
        BookingStatus::Confirmed => Err(ApiError::Conflict(
            "Booking is already confirmed".to_string(),
        )),
        BookingStatus::Pending => {
            let cancelled = repo.mark_cancelled(booking_id).await?.ok_or_else(|| {
                ApiError::Conflict("Booking is no longer pending".to_string())
            })?;

            info!(booking_id = %booking_id, "Booking cancelled");
            Ok(Json(Booking::from(cancelled).into()))
        }
    }
}

/// Run the confirmation pass for a modality, retrying on lock contention.
///
/// Returns None when the pass ultimately failed; the committed booking
/// stands either way.
async fn run_confirmation(
    state: &AppState,
    time_slot_id: Uuid,
    group_size: i64,
) -> Option<ModalityConfirmation> {
    let policy = RetryPolicy::new(
        state.config.booking.confirmation_max_attempts,
        Duration::from_millis(state.config.booking.confirmation_backoff_ms),
    );
    let repo = BookingRepository::new(state.pool.clone());

    let mut attempt = 1;
    loop {
        match repo.confirm_modality(time_slot_id, group_size).await {
            Ok(outcome) => return Some(outcome),
            Err(err) if attempt < policy.max_attempts && is_busy_error(&err) => {
                warn!(
                    time_slot_id = %time_slot_id,
                    group_size,
                    attempt,
                    error = %err,
                    "Confirmation hit lock contention, retrying"
                );
                tokio::time::sleep(policy.delay(attempt)).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(
                    time_slot_id = %time_slot_id,
                    group_size,
                    error = %err,
                    "Confirmation pass failed; booking stands"
                );
                return None;
            }
        }
    }
}
