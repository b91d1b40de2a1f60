// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout log routes.

use crate::error::Result;
use crate::middleware::AuthUser;
use crate::models::{check_owner, NewWorkout, Workout};
use crate::routes::{extract::ApiJson, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get},
    Extension, Json, Router,
};
use std::sync::Arc;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workouts", get(list_workouts).post(create_workout))
        .route("/api/workouts/{id}", delete(delete_workout))
}

/// All of the caller's workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Workout>>> {
    let workouts = state.db.list_workouts_for_user(&user.user_id).await?;
    Ok(Json(workouts))
}

/// Log a workout for the caller.
async fn create_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<NewWorkout>,
) -> Result<Json<Workout>> {
    input.validate()?;

    let workout = Workout::new(&user.user_id, input);
    state.db.create_workout(&workout).await?;

    tracing::debug!(user_id = %user.user_id, workout_id = %workout.id, "Workout logged");
    Ok(Json(workout))
}

/// Delete one of the caller's workouts.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(workout_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let existing = state.db.get_workout(&workout_id).await?;
    let workout = check_owner(existing, &user.user_id, "Workout entry not found").map_err(|e| {
        tracing::info!(user_id = %user.user_id, workout_id = %workout_id, error = %e, "Workout delete refused");
        e
    })?;

    state.db.delete_workout(&workout.id).await?;

    Ok(Json(MessageResponse {
        message: "Workout entry removed".to_string(),
    }))
}
