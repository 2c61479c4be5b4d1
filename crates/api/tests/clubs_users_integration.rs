//! Integration tests for the club and user directory endpoints.
//!
//! Run with: cargo test --test clubs_users_integration

mod common;

use axum::http::{Method, StatusCode};
use common::{
    create_test_app, create_test_pool, get_request, json_request, parse_response_body, seed_club,
    test_config,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn test_create_and_get_club() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/clubs",
            json!({"name": "Padel Indoor Sur", "city": "Sevilla"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = parse_response_body(response).await;
    let club_id = created["clubId"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/clubs/{}", club_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = parse_response_body(response).await;
    assert_eq!(body["name"], "Padel Indoor Sur");
    assert_eq!(body["city"], "Sevilla");
}

#[tokio::test]
async fn test_create_club_empty_name_rejected() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/clubs",
            json!({"name": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_unknown_club_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(get_request(&format!("/api/v1/clubs/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_court_and_duplicate_name_conflict() {
    let pool = create_test_pool().await;
    let club = seed_club(&pool, 0, 0).await;
    let app = create_test_app(test_config(), pool.clone());

    let uri = format!("/api/v1/clubs/{}/courts", club.id);
    let payload = json!({"name": "Center Court", "indoor": true});

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, &uri, payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let duplicate = app
        .clone()
        .oneshot(json_request(Method::POST, &uri, payload))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let listing: Value = parse_response_body(
        app.clone().oneshot(get_request(&uri)).await.unwrap(),
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["courts"][0]["indoor"], true);
}

#[tokio::test]
async fn test_create_court_unknown_club_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/clubs/{}/courts", Uuid::new_v4()),
            json!({"name": "Court 1"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_user_and_duplicate_email_conflict() {
    let pool = create_test_pool().await;
    let club = seed_club(&pool, 0, 0).await;
    let app = create_test_app(test_config(), pool.clone());

    let payload = json!({
        "clubId": club.id,
        "displayName": "Ana Ruiz",
        "email": "ana@example.com",
        "level": "intermediate",
    });

    let response = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/users", payload.clone()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = parse_response_body(response).await;
    assert_eq!(created["role"], "player");
    assert_eq!(created["level"], "intermediate");
    assert_eq!(created["creditCents"], 0);

    let duplicate = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/users", payload))
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_create_user_invalid_category_rejected() {
    let pool = create_test_pool().await;
    let club = seed_club(&pool, 0, 0).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users",
            json!({
                "clubId": club.id,
                "displayName": "Ana Ruiz",
                "email": "ana@example.com",
                "category": "juniors",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_user_unknown_club_not_found() {
    let pool = create_test_pool().await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/users",
            json!({
                "clubId": Uuid::new_v4(),
                "displayName": "Ana Ruiz",
                "email": "ana@example.com",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_instructor_requires_instructor_role() {
    let pool = create_test_pool().await;
    let club = seed_club(&pool, 0, 0).await;
    let app = create_test_app(test_config(), pool.clone());

    // A player cannot be registered as an instructor.
    let player: Value = parse_response_body(
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({
                    "clubId": club.id,
                    "displayName": "Ben Soler",
                    "email": "ben@example.com",
                }),
            ))
            .await
            .unwrap(),
    )
    .await;

    let uri = format!("/api/v1/clubs/{}/instructors", club.id);
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &uri,
            json!({"userId": player["userId"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // With the instructor role it works.
    let coach: Value = parse_response_body(
        app.clone()
            .oneshot(json_request(
                Method::POST,
                "/api/v1/users",
                json!({
                    "clubId": club.id,
                    "displayName": "Marta Gil",
                    "email": "marta@example.com",
                    "role": "instructor",
                }),
            ))
            .await
            .unwrap(),
    )
    .await;

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &uri,
            json!({"userId": coach["userId"], "bio": "Former WPT player"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let listing: Value = parse_response_body(
        app.clone().oneshot(get_request(&uri)).await.unwrap(),
    )
    .await;
    assert_eq!(listing["total"], 1);
    assert_eq!(listing["instructors"][0]["bio"], "Former WPT player");
}

#[tokio::test]
async fn test_register_instructor_unknown_user_not_found() {
    let pool = create_test_pool().await;
    let club = seed_club(&pool, 0, 0).await;
    let app = create_test_app(test_config(), pool.clone());

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            &format!("/api/v1/clubs/{}/instructors", club.id),
            json!({"userId": Uuid::new_v4()}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
