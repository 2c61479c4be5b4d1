//! Common test utilities for integration tests.
//!
//! Each test runs against its own in-memory SQLite database with the
//! embedded migrations applied, so tests are fully isolated and need no
//! external services.

// Allow dead code in this module - these are helper utilities that may not be
// used by all integration tests but are intentionally available for all.
#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::{DateTime, Duration, Utc};
use fake::faker::name::en::Name;
use fake::Fake;
use padel_club_api::{app::create_app, config};
use persistence::db::MIGRATOR;
use persistence::repositories::{
    ClubRepository, CourtRepository, InstructorRepository, TimeSlotRepository, UserRepository,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tower::ServiceExt;
use uuid::Uuid;

use domain::models::UserRole;

/// Create an isolated in-memory database with migrations applied.
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid sqlite URL")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    MIGRATOR.run(&pool).await.expect("Failed to run migrations");
    pool
}

/// Test configuration: a tiny schedule grid (09:00-10:00 every 30 minutes),
/// fixed pricing, and the top-up job disabled.
pub fn test_config() -> config::Config {
    config::Config {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0, // Use random port
            request_timeout_secs: 30,
        },
        database: config::DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
            connect_timeout_secs: 10,
            idle_timeout_secs: 600,
            busy_timeout_secs: 5,
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
        },
        security: config::SecurityConfig {
            cors_origins: Vec::new(),
        },
        booking: config::BookingConfig {
            confirmation_max_attempts: 3,
            confirmation_backoff_ms: 5,
        },
        generator: config::GeneratorConfig {
            days_ahead: 2,
            first_start: "09:00".to_string(),
            last_start: "10:00".to_string(),
            step_minutes: 30,
            duration_minutes: 90,
            max_players: 4,
            price_min_cents: 6000,
            price_max_cents: 6000,
            level: "open".to_string(),
            category: "mixed".to_string(),
            topup_enabled: false,
        },
    }
}

/// Build the application router for tests.
pub fn create_test_app(config: config::Config, pool: SqlitePool) -> Router {
    create_app(config, pool)
}

/// Build a JSON request.
pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&body).expect("Failed to serialize body"),
        ))
        .expect("Failed to build request")
}

/// Build a GET request.
pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("Failed to build request")
}

/// Read and deserialize a response body.
pub async fn parse_response_body<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&bytes).expect("Failed to parse response body")
}

/// A seeded club with its courts and instructors.
pub struct TestClub {
    pub id: Uuid,
    pub court_ids: Vec<Uuid>,
    pub instructor_ids: Vec<Uuid>,
}

/// Seed a club with the given number of courts and instructors.
pub async fn seed_club(pool: &SqlitePool, courts: usize, instructors: usize) -> TestClub {
    let club = ClubRepository::new(pool.clone())
        .create("Padel Nord", "Barcelona")
        .await
        .expect("Failed to seed club");

    let court_repo = CourtRepository::new(pool.clone());
    let mut court_ids = Vec::new();
    for i in 0..courts {
        let court = court_repo
            .create(club.id, &format!("Court {}", i + 1), i % 2 == 0)
            .await
            .expect("Failed to seed court");
        court_ids.push(court.id);
    }

    let instructor_repo = InstructorRepository::new(pool.clone());
    let mut instructor_ids = Vec::new();
    for _ in 0..instructors {
        let coach_id = seed_user_with_role(pool, club.id, UserRole::Instructor).await;
        let instructor = instructor_repo
            .create(club.id, coach_id, None)
            .await
            .expect("Failed to seed instructor");
        instructor_ids.push(instructor.id);
    }

    TestClub {
        id: club.id,
        court_ids,
        instructor_ids,
    }
}

/// Seed a player.
pub async fn seed_user(pool: &SqlitePool, club_id: Uuid) -> Uuid {
    seed_user_with_role(pool, club_id, UserRole::Player).await
}

/// Seed a user with the given role; name is faked, email is unique.
pub async fn seed_user_with_role(pool: &SqlitePool, club_id: Uuid, role: UserRole) -> Uuid {
    let display_name: String = Name().fake();
    let email = format!("{}@test.example", Uuid::new_v4());
    UserRepository::new(pool.clone())
        .create(club_id, &display_name, &email, role, "open", "mixed")
        .await
        .expect("Failed to seed user")
        .id
}

/// Seed a 90-minute slot tomorrow at 10:00 UTC with the given capacity.
pub async fn seed_slot(pool: &SqlitePool, club: &TestClub, max_players: i64) -> Uuid {
    seed_slot_at(pool, club, slot_start(1, 10), max_players).await
}

/// Seed a 90-minute slot at the given start.
pub async fn seed_slot_at(
    pool: &SqlitePool,
    club: &TestClub,
    start: DateTime<Utc>,
    max_players: i64,
) -> Uuid {
    TimeSlotRepository::new(pool.clone())
        .create(
            club.id,
            club.court_ids.first().copied(),
            club.instructor_ids.first().copied(),
            start,
            start + Duration::minutes(90),
            max_players,
            6000,
            "open",
            "mixed",
        )
        .await
        .expect("Failed to seed time slot")
        .id
}

/// Slot start `days` ahead at the given hour UTC.
pub fn slot_start(days: i64, hour: u32) -> DateTime<Utc> {
    (Utc::now() + Duration::days(days))
        .date_naive()
        .and_hms_opt(hour, 0, 0)
        .expect("Invalid hour")
        .and_utc()
}

/// Send a booking request through the app.
pub async fn book(
    app: &Router,
    user_id: Uuid,
    time_slot_id: Uuid,
    group_size: i64,
) -> Response<Body> {
    app.clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/bookings",
            serde_json::json!({
                "userId": user_id,
                "timeSlotId": time_slot_id,
                "groupSize": group_size,
            }),
        ))
        .await
        .expect("Request failed")
}

/// Count all booking rows.
pub async fn count_bookings(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM bookings")
        .fetch_one(pool)
        .await
        .expect("Failed to count bookings")
}
