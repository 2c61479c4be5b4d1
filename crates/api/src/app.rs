use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{
    metrics_handler, metrics_middleware, security_headers_middleware, trace_id,
};
use crate::routes::{bookings, clubs, health, time_slots, users};

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<Config>,
}

pub fn create_app(config: Config, pool: SqlitePool) -> Router {
    let config = Arc::new(config);

    let state = AppState {
        pool,
        config: config.clone(),
    };

    // Build CORS layer based on configuration
    let cors = if config.security.cors_origins.is_empty() {
        // Default: allow any origin (for development)
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        // Production: only allow specified origins
        use tower_http::cors::AllowOrigin;
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // Versioned API routes
    let api_routes = Router::new()
        // Club directory (v1)
        .route("/api/v1/clubs", post(clubs::create_club))
        .route("/api/v1/clubs/:club_id", get(clubs::get_club))
        .route(
            "/api/v1/clubs/:club_id/courts",
            post(clubs::create_court).get(clubs::list_courts),
        )
        .route(
            "/api/v1/clubs/:club_id/instructors",
            post(clubs::create_instructor).get(clubs::list_instructors),
        )
        // Users (v1)
        .route("/api/v1/users", post(users::create_user))
        .route("/api/v1/users/:user_id", get(users::get_user))
        .route("/api/v1/users/:user_id/bookings", get(users::list_user_bookings))
        // Time slots (v1)
        .route(
            "/api/v1/time-slots",
            post(time_slots::create_time_slot).get(time_slots::list_time_slots),
        )
        .route("/api/v1/time-slots/generate", post(time_slots::generate_slots))
        .route(
            "/api/v1/time-slots/:time_slot_id/bookings",
            get(time_slots::get_slot_bookings),
        )
        // Bookings (v1)
        .route("/api/v1/bookings", post(bookings::create_booking))
        .route("/api/v1/bookings/:booking_id", get(bookings::get_booking))
        .route(
            "/api/v1/bookings/:booking_id/cancel",
            post(bookings::cancel_booking),
        );

    // Public routes (health probes and metrics)
    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    // Merge all routes
    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
