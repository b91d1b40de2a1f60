// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (`FIRESTORE_EMULATOR_HOST` set); otherwise they are skipped.
//!
//! Every test works on fresh random user ids, so no cleanup is needed.

use axum::http::StatusCode;
use fitdiet_tracker::models::{Diet, User, Workout};
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{authed_request, create_emulator_app, create_test_jwt, read_json, test_db, unique_id};

fn test_user(id: &str) -> User {
    User {
        id: id.to_string(),
        username: format!("user_{id}"),
        email: format!("{id}@example.com"),
        password: "$2b$12$notarealhashnotarealhashnotarealhashnotarealhas".to_string(),
        age: Some(28),
        gender: Some("male".to_string()),
        height: Some(180.0),
        weight: Some(80.0),
        goal: Some("Muscle Gain".to_string()),
        health_conditions: None,
        created_at: fitdiet_tracker::time_utils::now_rfc3339(),
    }
}

fn diet(owner: &str, date: &str, calories: f64) -> Diet {
    Diet {
        id: unique_id("diet"),
        user: owner.to_string(),
        food_name: "Chicken salad".to_string(),
        calories,
        protein: 30.0,
        carbohydrates: 10.0,
        fat: 12.0,
        date: date.to_string(),
    }
}

fn workout(owner: &str, date: &str) -> Workout {
    Workout {
        id: unique_id("workout"),
        user: owner.to_string(),
        exercise_name: "Cycling".to_string(),
        duration: 60.0,
        calories_burned: 500.0,
        date: date.to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// STORE TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_user_roundtrip_and_lookup() {
    require_emulator!();

    let db = test_db().await;
    let user = test_user(&unique_id("u"));
    db.upsert_user(&user).await.unwrap();

    let fetched = db.get_user(&user.id).await.unwrap().expect("user exists");
    assert_eq!(fetched.username, user.username);
    assert_eq!(fetched.height, Some(180.0));

    let by_email = db.find_user_by_email(&user.email).await.unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id.clone()));

    let by_name = db.find_user_by_username(&user.username).await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(user.id));
}

#[tokio::test]
async fn test_list_is_scoped_to_owner_and_newest_first() {
    require_emulator!();

    let db = test_db().await;
    let alice = unique_id("alice");
    let bob = unique_id("bob");

    let older = diet(&alice, "2024-05-01T08:00:00.000Z", 300.0);
    let newer = diet(&alice, "2024-05-03T08:00:00.000Z", 600.0);
    let bobs = diet(&bob, "2024-05-02T08:00:00.000Z", 900.0);
    for d in [&older, &newer, &bobs] {
        db.create_diet(d).await.unwrap();
    }
    db.create_workout(&workout(&bob, "2024-05-02T09:00:00.000Z"))
        .await
        .unwrap();

    let alice_diets = db.list_diets_for_user(&alice).await.unwrap();
    let ids: Vec<&str> = alice_diets.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, vec![newer.id.as_str(), older.id.as_str()]);
    assert!(alice_diets.iter().all(|d| d.user == alice));

    assert!(db.list_workouts_for_user(&alice).await.unwrap().is_empty());
    assert_eq!(db.list_workouts_for_user(&bob).await.unwrap().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// API TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn test_create_workout_returns_record() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let user_id = unique_id("u");
    let token = create_test_jwt(&user_id, &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/workouts",
            &token,
            Some(json!({ "exerciseName": "Run", "duration": 30, "caloriesBurned": 300 })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["exerciseName"], "Run");
    assert_eq!(body["duration"], 30.0);
    assert_eq!(body["caloriesBurned"], 300.0);
    assert_eq!(body["user"], user_id.as_str());
    assert!(body["date"].is_string());
    assert!(body["id"].is_string());

    let stored = state.db.list_workouts_for_user(&user_id).await.unwrap();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_delete_other_users_diet_is_refused() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let owner = unique_id("owner");
    let intruder = unique_id("intruder");
    let entry = diet(&owner, "2024-05-01T08:00:00.000Z", 450.0);
    state.db.create_diet(&entry).await.unwrap();

    let token = create_test_jwt(&intruder, &state.config.jwt_signing_key);
    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/diets/{}", entry.id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Not authorized");

    assert!(state.db.get_diet(&entry.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_missing_workout_is_not_found() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let token = create_test_jwt(&unique_id("u"), &state.config.jwt_signing_key);

    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/workouts/{}", unique_id("missing")),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["message"], "Workout entry not found");
}

#[tokio::test]
async fn test_owner_can_delete_workout() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let owner = unique_id("owner");
    let entry = workout(&owner, "2024-05-01T08:00:00.000Z");
    state.db.create_workout(&entry).await.unwrap();

    let token = create_test_jwt(&owner, &state.config.jwt_signing_key);
    let response = app
        .oneshot(authed_request(
            "DELETE",
            &format!("/api/workouts/{}", entry.id),
            &token,
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["message"], "Workout entry removed");
    assert!(state.db.get_workout(&entry.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_profile_partial_update() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let user = test_user(&unique_id("u"));
    state.db.upsert_user(&user).await.unwrap();
    let token = create_test_jwt(&user.id, &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed_request(
            "PUT",
            "/api/users/me",
            &token,
            Some(json!({ "goal": "", "weight": 77.5, "healthConditions": "Asthma" })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["goal"], "Muscle Gain");
    assert_eq!(body["weight"], 77.5);
    assert_eq!(body["healthConditions"], "Asthma");
    assert!(body.get("password").is_none());

    let response = app
        .oneshot(authed_request("GET", "/api/users/me", &token, None))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["goal"], "Muscle Gain");
    assert_eq!(body["weight"], 77.5);
}

#[tokio::test]
async fn test_profile_username_conflict() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let first = test_user(&unique_id("u"));
    let second = test_user(&unique_id("u"));
    state.db.upsert_user(&first).await.unwrap();
    state.db.upsert_user(&second).await.unwrap();

    let token = create_test_jwt(&second.id, &state.config.jwt_signing_key);
    let response = app
        .oneshot(authed_request(
            "PUT",
            "/api/users/me",
            &token,
            Some(json!({ "username": first.username })),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_register_then_login() {
    require_emulator!();

    let (app, _) = create_emulator_app().await;
    let name = unique_id("reg");
    let email = format!("{name}@example.com");

    let register = json!({ "username": name, "email": email, "password": "s3cret!" });
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/auth/register", "", Some(register.clone())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(read_json(response).await["token"].is_string());

    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/auth/register", "", Some(register)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let shouted = json!({ "username": format!("{name}-2"), "email": email.to_uppercase(), "password": "s3cret!" });
    let response = app
        .clone()
        .oneshot(authed_request("POST", "/api/auth/register", "", Some(shouted)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .clone()
        .oneshot(authed_request(
            "POST",
            "/api/auth/login",
            "",
            Some(json!({ "email": email, "password": "wrong" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(authed_request(
            "POST",
            "/api/auth/login",
            "",
            Some(json!({ "email": email.to_uppercase(), "password": "s3cret!" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let token = read_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_progress_and_history_views() {
    require_emulator!();

    let (app, state) = create_emulator_app().await;
    let owner = unique_id("u");
    state
        .db
        .create_diet(&diet(&owner, "2024-05-01T08:00:00.000Z", 400.0))
        .await
        .unwrap();
    state
        .db
        .create_diet(&diet(&owner, "2024-05-01T19:00:00.000Z", 600.0))
        .await
        .unwrap();
    state
        .db
        .create_workout(&workout(&owner, "2024-05-02T07:00:00.000Z"))
        .await
        .unwrap();
    let token = create_test_jwt(&owner, &state.config.jwt_signing_key);

    let response = app
        .clone()
        .oneshot(authed_request("GET", "/api/progress", &token, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(
        body["days"],
        json!([
            { "date": "2024-05-01", "caloriesIn": 1000.0, "caloriesOut": 0.0 },
            { "date": "2024-05-02", "caloriesIn": 0.0, "caloriesOut": 500.0 }
        ])
    );

    let response = app
        .oneshot(authed_request("GET", "/api/history", &token, None))
        .await
        .unwrap();
    let body = read_json(response).await;
    let types: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["type"].as_str().unwrap())
        .collect();
    assert_eq!(types, vec!["WORKOUT", "DIET", "DIET"]);
}
