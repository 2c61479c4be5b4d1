//! User endpoint handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use domain::models::booking::{
    BookingResponse, ListUserBookingsQuery, UserBookingsResponse,
};
use domain::models::user::{CreateUserRequest, UserResponse};
use domain::models::{Booking, User};
use persistence::repositories::{BookingRepository, ClubRepository, UserRepository};

/// Default page size for booking history.
const DEFAULT_PAGE_SIZE: i64 = 50;

/// Maximum page size for booking history.
const MAX_PAGE_SIZE: i64 = 200;

/// Create a new user.
///
/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    ClubRepository::new(state.pool.clone())
        .find_by_id(request.club_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Club not found".to_string()))?;

    // Duplicate emails surface as Conflict.
    let entity = UserRepository::new(state.pool.clone())
        .create(
            request.club_id,
            &request.display_name,
            &request.email,
            request.role,
            &request.level,
            &request.category,
        )
        .await?;

    info!(user_id = %entity.id, club_id = %entity.club_id, "User created");

    Ok((StatusCode::CREATED, Json(User::from(entity).into())))
}

/// Get a single user by ID.
///
/// GET /api/v1/users/:user_id
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ApiError> {
    let entity = UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    Ok(Json(User::from(entity).into()))
}

/// A user's booking history, newest first, cursor-paginated.
///
/// GET /api/v1/users/:user_id/bookings?limit=<n>&cursor=<cursor>
pub async fn list_user_bookings(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(query): Query<ListUserBookingsQuery>,
) -> Result<Json<UserBookingsResponse>, ApiError> {
    UserRepository::new(state.pool.clone())
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);

    let cursor = match query.cursor.as_deref() {
        Some(raw) => Some(
            shared::pagination::decode_cursor(raw)
                .map_err(|e| ApiError::Validation(e.to_string()))?,
        ),
        None => None,
    };

    let repo = BookingRepository::new(state.pool.clone());
    // Fetch one extra row to learn whether another page exists.
    let mut entities = repo.list_by_user(user_id, cursor, limit + 1).await?;

    let next_cursor = if entities.len() as i64 > limit {
        entities.truncate(limit as usize);
        entities
            .last()
            .map(|b| shared::pagination::encode_cursor(b.created_at, b.id))
    } else {
        None
    };

    let bookings: Vec<BookingResponse> = entities
        .into_iter()
        .map(|e| Booking::from(e).into())
        .collect();

    Ok(Json(UserBookingsResponse {
        bookings,
        next_cursor,
    }))
}
