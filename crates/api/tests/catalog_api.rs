//! HTTP tests for the service catalog and medical records.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_pet, get, post_json};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn services_are_listed_in_catalog_order(pool: PgPool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app.clone(), "/api/v1/services").await).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec![
            "Consulta General",
            "Vacunación",
            "Estética Canina",
            "Cirugía Menor",
            "Desparasitación"
        ]
    );
    assert_eq!(json["data"][2]["includes"].as_array().unwrap().len(), 4);

    let response = get(app, "/api/v1/services/999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn medical_records_round_trip_newest_first(pool: PgPool) {
    let app = common::build_test_app(pool);
    let max = create_pet(app.clone(), "Max").await;

    for (date, title) in [("2024-01-10", "Revisión anual"), ("2024-03-05", "Rabia")] {
        let record_type = if title == "Rabia" { "vaccine" } else { "checkup" };
        let response = post_json(
            app.clone(),
            "/api/v1/medical-records",
            json!({
                "pet_id": max,
                "record_type": record_type,
                "title": title,
                "description": "Sin novedades",
                "date": date,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get(app, &format!("/api/v1/pets/{max}/medical-records")).await).await;
    let titles: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Rabia", "Revisión anual"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn next_date_only_for_vaccines(pool: PgPool) {
    let app = common::build_test_app(pool);
    let max = create_pet(app.clone(), "Max").await;

    let response = post_json(
        app,
        "/api/v1/medical-records",
        json!({
            "pet_id": max,
            "record_type": "checkup",
            "title": "Revisión",
            "description": "Ok",
            "date": "2024-01-10",
            "next_date": "2025-01-10",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["fields"][0]["field"], "next_date");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn medical_record_for_unknown_pet(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(
        app.clone(),
        "/api/v1/medical-records",
        json!({
            "pet_id": 999,
            "record_type": "other",
            "title": "Nota",
            "description": "Texto",
            "date": "2024-01-10",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "PET_NOT_FOUND");

    let response = get(app, "/api/v1/pets/999/medical-records").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_record_type_and_bad_dates_are_field_errors(pool: PgPool) {
    let app = common::build_test_app(pool);
    let max = create_pet(app.clone(), "Max").await;

    let response = post_json(
        app,
        "/api/v1/medical-records",
        json!({
            "pet_id": max,
            "record_type": "grooming",
            "title": "Baño",
            "description": "Corte",
            "date": "10/01/2024",
            "next_date": "soon",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    let fields: Vec<_> = json["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| (f["field"].as_str().unwrap(), f["message"].as_str().unwrap()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("record_type", "must be one of: checkup, vaccine, surgery, other"),
            ("date", "must be formatted as YYYY-MM-DD"),
            ("next_date", "must be formatted as YYYY-MM-DD"),
        ]
    );
}
