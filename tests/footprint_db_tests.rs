//! Footprint persistence against a real database. Skipped unless
//! TEST_DATABASE_URL points at a disposable Postgres.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::{Days, Utc};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

mod common;

async fn register(app: &Router) -> String {
    let name = format!("user{}", &Uuid::new_v4().simple().to_string()[..12]);
    let response = app
        .clone()
        .oneshot(common::json_request(
            "POST",
            "/api/auth/register",
            json!({
                "username": name,
                "email": format!("{name}@example.com"),
                "password": "correct horse battery",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    body["access_token"].as_str().unwrap().to_string()
}

async fn list(app: &Router, token: &str) -> Vec<Value> {
    let response = app
        .clone()
        .oneshot(
            Request::get("/api/footprints")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    common::body_json(response).await.as_array().unwrap().clone()
}

#[tokio::test]
async fn test_recurring_entry_creates_series() {
    let (app, _) = require_database!();
    let token = register(&app).await;

    let today = Utc::now().date_naive();
    let end = today.checked_add_days(Days::new(9)).unwrap();

    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            "/api/footprints",
            &token,
            json!({
                "activity_type": "bus",
                "details": {"commute": "medium"},
                "entry_date": today,
                "is_recurring": true,
                "recurrence_frequency": "daily",
                "recurrence_end_date": end,
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["occurrences_created"], 9);
    let seed = &body["entry"];
    assert_eq!(seed["series_id"], seed["id"]);
    assert_eq!(seed["recurrence_frequency"], "daily");

    let entries = list(&app, &token).await;
    assert_eq!(entries.len(), 10);
    for entry in &entries {
        assert_eq!(entry["series_id"], seed["id"]);
        assert_eq!(entry["carbon_kg"], seed["carbon_kg"]);
    }
    let siblings: Vec<_> = entries.iter().filter(|e| e["id"] != seed["id"]).collect();
    assert!(siblings.iter().all(|e| e["is_recurring"] == false));

    let series_id = seed["series_id"].as_str().unwrap();
    let response = app
        .clone()
        .oneshot(
            Request::delete(format!("/api/footprints/series/{series_id}"))
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(common::body_json(response).await["deleted"], 10);
    assert!(list(&app, &token).await.is_empty());
}

#[tokio::test]
async fn test_bad_rule_stores_plain_seeds() {
    let (app, _) = require_database!();
    let token = register(&app).await;

    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            "/api/footprints/batch",
            &token,
            json!({"items": [
                {
                    "activity_type": "train",
                    "is_recurring": true,
                    "recurrence_frequency": "weekly"
                },
                {
                    "activity_type": "gaming",
                    "details": {"hours_per_week": 4},
                    "is_recurring": true,
                    "recurrence_frequency": "fortnightly"
                }
            ]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = common::body_json(response).await;
    assert_eq!(body["occurrences_created"], 0);
    assert!(body["recurrence_error"].is_string());

    let entries = list(&app, &token).await;
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert_eq!(entry["is_recurring"], false);
        assert!(entry["series_id"].is_null());
        assert!(entry["recurrence_frequency"].is_null());
    }
}

#[tokio::test]
async fn test_complete_is_idempotent() {
    let (app, _) = require_database!();
    let token = register(&app).await;

    let response = app
        .clone()
        .oneshot(common::authed_json_request(
            "POST",
            "/api/footprints",
            &token,
            json!({"activity_type": "flight", "details": {"flight_type": "long"}}),
        ))
        .await
        .unwrap();
    let id = common::body_json(response).await["entry"]["id"]
        .as_str()
        .unwrap()
        .to_string();

    let mut completed_at = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(common::authed_json_request(
                "POST",
                &format!("/api/footprints/{id}/complete"),
                &token,
                json!({}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        completed_at.push(common::body_json(response).await["completed_at"].clone());
    }
    assert_eq!(completed_at[0], completed_at[1]);

    let response = app
        .oneshot(
            Request::get("/api/stats/points")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = common::body_json(response).await;
    assert_eq!(body["total_points"], 100);
    assert_eq!(body["completed_entries"], 1);
}
