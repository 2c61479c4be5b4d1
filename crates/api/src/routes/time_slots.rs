//! Time slot endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, NaiveTime, Utc};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_time_slots_generated;
use domain::models::booking::{SlotBookingEntry, SlotBookingsResponse};
use domain::models::time_slot::{
    CreateTimeSlotRequest, GenerateSlotsRequest, GenerateSlotsResponse, ListTimeSlotsQuery,
    ListTimeSlotsResponse, TimeSlotResponse, TimeSlotSummary,
};
use domain::models::TimeSlot;
use domain::services::slot_grid;
use persistence::repositories::{
    BookingRepository, ClubRepository, CourtRepository, InstructorRepository, TimeSlotRepository,
};

/// Create a single slot by hand.
///
/// POST /api/v1/time-slots
pub async fn create_time_slot(
    State(state): State<AppState>,
    Json(request): Json<CreateTimeSlotRequest>,
) -> Result<(StatusCode, Json<TimeSlotResponse>), ApiError> {
    request.validate()?;

    if request.start_at >= request.end_at {
        return Err(ApiError::Validation(
            "Start must be before end".to_string(),
        ));
    }

    let club_repo = ClubRepository::new(state.pool.clone());
    club_repo
        .find_by_id(request.club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    if let Some(court_id) = request.court_id {
        let court = CourtRepository::new(state.pool.clone())
            .find_by_id(court_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Court not found".to_string()))?;
        if court.club_id != request.club_id {
            return Err(ApiError::Validation(
                "Court belongs to a different club".to_string(),
            ));
        }
    }

    if let Some(instructor_id) = request.instructor_id {
        let instructor = InstructorRepository::new(state.pool.clone())
            .find_by_id(instructor_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Instructor not found".to_string()))?;
        if instructor.club_id != request.club_id {
            return Err(ApiError::Validation(
                "Instructor belongs to a different club".to_string(),
            ));
        }
    }

    // A taken (club, instructor, start) grid position surfaces as Conflict.
    let entity = TimeSlotRepository::new(state.pool.clone())
        .create(
            request.club_id,
            request.court_id,
            request.instructor_id,
            request.start_at,
            request.end_at,
            request.max_players,
            request.total_price_cents,
            &request.level,
            &request.category,
        )
        .await?;

    info!(
        time_slot_id = %entity.id,
        club_id = %entity.club_id,
        start_at = %entity.start_at,
        "Time slot created"
    );

    Ok((
        StatusCode::CREATED,
        Json(TimeSlot::from(entity).into()),
    ))
}

/// Generate open slots across the schedule grid.
///
/// POST /api/v1/time-slots/generate
///
/// Idempotent: grid positions that already hold a slot are counted as
/// skipped, never duplicated.
pub async fn generate_slots(
    State(state): State<AppState>,
    Json(request): Json<GenerateSlotsRequest>,
) -> Result<(StatusCode, Json<GenerateSlotsResponse>), ApiError> {
    request.validate()?;

    let club_repo = ClubRepository::new(state.pool.clone());
    let club = club_repo
        .find_by_id(request.club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    let instructors = InstructorRepository::new(state.pool.clone())
        .find_by_club_id(club.id)
        .await?;
    if instructors.is_empty() {
        return Err(ApiError::Validation(
            "Club has no instructors to schedule".to_string(),
        ));
    }
    let courts = CourtRepository::new(state.pool.clone())
        .find_by_club_id(club.id)
        .await?;

    let grid = state
        .config
        .generator
        .schedule_grid()
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    let band = state.config.generator.price_band();
    let defaults = state.config.generator.slot_defaults();

    let start_date = request
        .start_date
        .unwrap_or_else(|| Utc::now().date_naive());
    let days = request.days.unwrap_or(state.config.generator.days_ahead);

    let instructor_ids: Vec<Uuid> = instructors.iter().map(|i| i.id).collect();
    let court_ids: Vec<Uuid> = courts.iter().map(|c| c.id).collect();

    let blueprints = {
        let mut rng = rand::thread_rng();
        slot_grid::expand_grid(
            club.id,
            start_date,
            days,
            &grid,
            &band,
            &defaults,
            &instructor_ids,
            &court_ids,
            &mut rng,
        )
    };

    let repo = TimeSlotRepository::new(state.pool.clone());
    let mut created = 0u64;
    let mut skipped = 0u64;
    for blueprint in &blueprints {
        if repo.insert_if_absent(blueprint).await? {
            created += 1;
        } else {
            skipped += 1;
        }
    }

    record_time_slots_generated(created);

    info!(
        club_id = %club.id,
        start_date = %start_date,
        days,
        created,
        skipped,
        "Open slots generated"
    );

    Ok((
        StatusCode::CREATED,
        Json(GenerateSlotsResponse { created, skipped }),
    ))
}

/// List a club's slots for one day, with aggregated booking counts.
///
/// GET /api/v1/time-slots?clubId=<uuid>&date=<YYYY-MM-DD>
pub async fn list_time_slots(
    State(state): State<AppState>,
    Query(query): Query<ListTimeSlotsQuery>,
) -> Result<Json<ListTimeSlotsResponse>, ApiError> {
    let day_start = query.date.and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let entities = TimeSlotRepository::new(state.pool.clone())
        .list_by_club_and_day(query.club_id, day_start, day_end)
        .await?;

    let time_slots: Vec<TimeSlotSummary> = entities
        .into_iter()
        .map(|e| TimeSlotSummary {
            time_slot_id: e.id,
            club_id: e.club_id,
            court_id: e.court_id,
            instructor_id: e.instructor_id,
            start_at: e.start_at,
            end_at: e.end_at,
            max_players: e.max_players,
            total_price_cents: e.total_price_cents,
            level: e.level,
            category: e.category,
            confirmed_players: e.confirmed_players,
            pending_requests: e.pending_requests,
        })
        .collect();

    let total = time_slots.len();

    Ok(Json(ListTimeSlotsResponse { time_slots, total }))
}

/// List the bookings on one slot, with member names for rendering.
///
/// GET /api/v1/time-slots/:time_slot_id/bookings
pub async fn get_slot_bookings(
    State(state): State<AppState>,
    Path(time_slot_id): Path<Uuid>,
) -> Result<Json<SlotBookingsResponse>, ApiError> {
    TimeSlotRepository::new(state.pool.clone())
        .find_by_id(time_slot_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Time slot not found".to_string()))?;

    let entities = BookingRepository::new(state.pool.clone())
        .list_by_slot(time_slot_id)
        .await?;

    let bookings: Vec<SlotBookingEntry> = entities
        .into_iter()
        .map(|e| SlotBookingEntry {
            user_id: e.user_id,
            display_name: e.display_name,
            group_size: e.group_size,
            status: e.status,
        })
        .collect();

    let total = bookings.len();

    Ok(Json(SlotBookingsResponse { bookings, total }))
}
