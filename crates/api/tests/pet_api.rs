//! HTTP tests for `/api/v1/pets` and the delete policy.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, create_pet, delete, get, post_json, put, put_json, send, token_for};
use serde_json::json;
use sqlx::PgPool;

async fn book(app: axum::Router, pet_id: i64) -> i64 {
    let response = post_json(
        app,
        "/api/v1/appointments",
        json!({ "pet_id": pet_id, "date": "2099-06-01", "time": "10:00", "service": "Consulta General" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_get_update_pet(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/pets",
        json!({ "name": " Max ", "species": "Perro", "breed": "Labrador", "age_years": 3, "weight_kg": 28.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["data"]["name"], "Max");
    assert!(created["data"]["owner_id"].is_null());

    let response = put_json(
        app.clone(),
        &format!("/api/v1/pets/{id}"),
        json!({ "age_years": 4 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["data"]["age_years"], 4);
    assert_eq!(updated["data"]["breed"], "Labrador");

    let fetched = body_json(get(app, &format!("/api/v1/pets/{id}")).await).await;
    assert_eq!(fetched["data"]["weight_kg"], 28.5);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_profile_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/pets",
        json!({ "name": "", "species": "Gato", "age_years": 120, "weight_kg": -1.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    let fields: Vec<&str> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "age_years", "weight_kg"]);

    let id = create_pet(app.clone(), "Luna").await;
    let response = put_json(
        app,
        &format!("/api/v1/pets/{id}"),
        json!({ "species": "  " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn authenticated_owner_sees_only_their_pets(pool: PgPool) {
    let owner_a = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password_hash) VALUES ('Ana', 'ana@example.com', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let owner_b = sqlx::query_scalar::<_, i64>(
        "INSERT INTO users (name, email, password_hash) VALUES ('Beto', 'beto@example.com', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let app = common::build_test_app(pool);
    let token_a = token_for(owner_a);
    let token_b = token_for(owner_b);

    let response = send(
        app.clone(),
        Method::POST,
        "/api/v1/pets",
        Some(json!({ "name": "Max", "species": "Perro", "age_years": 3 })),
        Some(&token_a),
    )
    .await;
    let pet = body_json(response).await;
    assert_eq!(pet["data"]["owner_id"], owner_a);
    let pet_id = pet["id"].as_i64().unwrap();

    let mine = body_json(send(app.clone(), Method::GET, "/api/v1/pets", None, Some(&token_a)).await).await;
    assert_eq!(mine["data"].as_array().unwrap().len(), 1);

    let theirs = body_json(send(app.clone(), Method::GET, "/api/v1/pets", None, Some(&token_b)).await).await;
    assert!(theirs["data"].as_array().unwrap().is_empty());

    let response = send(
        app,
        Method::DELETE,
        &format!("/api/v1/pets/{pet_id}"),
        None,
        Some(&token_b),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_is_blocked_while_appointments_are_active(pool: PgPool) {
    let app = common::build_test_app(pool);
    let max = create_pet(app.clone(), "Max").await;
    let appointment = book(app.clone(), max).await;

    let response = delete(app.clone(), &format!("/api/v1/pets/{max}")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "CONFLICT");

    let response = put(app.clone(), &format!("/api/v1/appointments/{appointment}/cancel")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = delete(app.clone(), &format!("/api/v1/pets/{max}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/pets/{max}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "PET_NOT_FOUND");

    let response = get(app, &format!("/api/v1/appointments/{appointment}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_token_is_rejected_even_on_public_reads(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = send(app, Method::GET, "/api/v1/pets", None, Some("not-a-jwt")).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}
