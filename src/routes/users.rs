// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Current-user profile routes.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::{ProfileUpdate, User, UserProfile};
use crate::routes::extract::ApiJson;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use std::sync::Arc;
use validator::ValidateEmail;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/users/me", get(get_me).put(update_me))
}

async fn load_user(state: &AppState, user_id: &str) -> Result<User> {
    state
        .db
        .get_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Get current user profile.
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserProfile>> {
    let profile = load_user(&state, &user.user_id).await?;
    Ok(Json(profile.into()))
}

/// Partially update the current user's profile.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    if let Some(email) = update.new_email() {
        if !email.validate_email() {
            return Err(AppError::BadRequest(
                "email: must be a valid email address".to_string(),
            ));
        }
    }

    let mut stored = load_user(&state, &user.user_id).await?;

    if let Some(username) = update.new_username().filter(|u| *u != stored.username) {
        if let Some(other) = state.db.find_user_by_username(&username).await? {
            if other.id != stored.id {
                return Err(AppError::Conflict("Username is already taken".to_string()));
            }
        }
    }
    if let Some(email) = update.new_email().filter(|e| *e != stored.email) {
        if let Some(other) = state.db.find_user_by_email(&email).await? {
            if other.id != stored.id {
                return Err(AppError::Conflict("Email is already registered".to_string()));
            }
        }
    }

    update.apply_to(&mut stored);
    state.db.upsert_user(&stored).await?;

    tracing::info!(user_id = %stored.id, "Profile updated");

    Ok(Json(stored.into()))
}
