//! Club directory endpoint handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::club::{ClubResponse, CreateClubRequest};
use domain::models::court::{CourtResponse, CreateCourtRequest, ListCourtsResponse};
use domain::models::instructor::{
    CreateInstructorRequest, InstructorResponse, ListInstructorsResponse,
};
use domain::models::{Club, Court, Instructor, UserRole};
use persistence::repositories::{
    ClubRepository, CourtRepository, InstructorRepository, UserRepository,
};

/// Create a new club.
///
/// POST /api/v1/clubs
pub async fn create_club(
    State(state): State<AppState>,
    Json(request): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<ClubResponse>), ApiError> {
    request.validate()?;

    let entity = ClubRepository::new(state.pool.clone())
        .create(&request.name, &request.city)
        .await?;

    info!(club_id = %entity.id, name = %entity.name, "Club created");

    Ok((StatusCode::CREATED, Json(Club::from(entity).into())))
}

/// Get a single club by ID.
///
/// GET /api/v1/clubs/:club_id
pub async fn get_club(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
) -> Result<Json<ClubResponse>, ApiError> {
    let entity = ClubRepository::new(state.pool.clone())
        .find_by_id(club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    Ok(Json(Club::from(entity).into()))
}

/// Add a court to a club.
///
/// POST /api/v1/clubs/:club_id/courts
pub async fn create_court(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    Json(request): Json<CreateCourtRequest>,
) -> Result<(StatusCode, Json<CourtResponse>), ApiError> {
    request.validate()?;

    ClubRepository::new(state.pool.clone())
        .find_by_id(club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    // Duplicate court names within a club surface as Conflict.
    let entity = CourtRepository::new(state.pool.clone())
        .create(club_id, &request.name, request.indoor)
        .await?;

    info!(court_id = %entity.id, club_id = %club_id, name = %entity.name, "Court created");

    Ok((StatusCode::CREATED, Json(Court::from(entity).into())))
}

/// List a club's courts.
///
/// GET /api/v1/clubs/:club_id/courts
pub async fn list_courts(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
) -> Result<Json<ListCourtsResponse>, ApiError> {
    let entities = CourtRepository::new(state.pool.clone())
        .find_by_club_id(club_id)
        .await?;

    let courts: Vec<CourtResponse> = entities
        .into_iter()
        .map(|e| Court::from(e).into())
        .collect();

    let total = courts.len();

    Ok(Json(ListCourtsResponse { courts, total }))
}

/// Register an existing user as a club instructor.
///
/// POST /api/v1/clubs/:club_id/instructors
pub async fn create_instructor(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
    Json(request): Json<CreateInstructorRequest>,
) -> Result<(StatusCode, Json<InstructorResponse>), ApiError> {
    request.validate()?;

    ClubRepository::new(state.pool.clone())
        .find_by_id(club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    let user = UserRepository::new(state.pool.clone())
        .find_by_id(request.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if user.club_id != club_id {
        return Err(ApiError::Validation(
            "User belongs to a different club".to_string(),
        ));
    }
    if user.role != UserRole::Instructor {
        return Err(ApiError::Validation(
            "User does not have the instructor role".to_string(),
        ));
    }

    // A user can hold at most one instructor profile.
    let entity = InstructorRepository::new(state.pool.clone())
        .create(club_id, request.user_id, request.bio.as_deref())
        .await?;

    info!(
        instructor_id = %entity.id,
        club_id = %club_id,
        user_id = %request.user_id,
        "Instructor registered"
    );

    Ok((StatusCode::CREATED, Json(Instructor::from(entity).into())))
}

/// List a club's instructors.
///
/// GET /api/v1/clubs/:club_id/instructors
pub async fn list_instructors(
    State(state): State<AppState>,
    Path(club_id): Path<Uuid>,
) -> Result<Json<ListInstructorsResponse>, ApiError> {
    let entities = InstructorRepository::new(state.pool.clone())
        .find_by_club_id(club_id)
        .await?;

    let instructors: Vec<InstructorResponse> = entities
        .into_iter()
        .map(|e| Instructor::from(e).into())
        .collect();

    let total = instructors.len();

    Ok(Json(ListInstructorsResponse { instructors, total }))
}
