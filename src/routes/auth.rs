// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Registration, login and logout.
//!
//! Both register and login answer with a session JWT in the body and also
//! set it as an HttpOnly cookie for browser clients.

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_jwt, TOKEN_COOKIE};
use crate::models::{normalize_email, User};
use crate::routes::extract::ApiJson;
use crate::services::{hash_password, verify_password};
use crate::time_utils::now_rfc3339;
use crate::AppState;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Body of `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(
        custom(function = "crate::models::non_blank"),
        length(max = 50, message = "must be at most 50 characters")
    )]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TokenResponse {
    pub token: String,
}

/// Build the session cookie; `Secure` unless the frontend is served over plain HTTP.
fn session_cookie(token: String, frontend_url: &str) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(frontend_url.starts_with("https://"))
        .build()
}

fn issue_session(
    state: &AppState,
    jar: CookieJar,
    user_id: &str,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let token = create_jwt(user_id, &state.config.jwt_signing_key)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("JWT creation failed: {}", e)))?;

    let jar = jar.add(session_cookie(token.clone(), &state.config.frontend_url));
    Ok((jar, Json(TokenResponse { token })))
}

/// Create an account and start a session.
async fn register(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    payload.validate()?;

    let username = payload.username.trim().to_string();
    let email = normalize_email(&payload.email);

    if state.db.find_user_by_email(&email).await?.is_some()
        || state.db.find_user_by_username(&username).await?.is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username,
        email,
        password: hash_password(payload.password).await?,
        age: None,
        gender: None,
        height: None,
        weight: None,
        goal: None,
        health_conditions: None,
        created_at: now_rfc3339(),
    };
    state.db.upsert_user(&user).await?;

    tracing::info!(user_id = %user.id, "User registered");

    issue_session(&state, jar, &user.id)
}

/// Exchange email and password for a session.
async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<(CookieJar, Json<TokenResponse>)> {
    let email = normalize_email(&payload.email);
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidCredentials);
    }

    let user = state
        .db
        .find_user_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    if !verify_password(payload.password, user.password.clone()).await? {
        tracing::info!(user_id = %user.id, "Login rejected: wrong password");
        return Err(AppError::InvalidCredentials);
    }

    tracing::info!(user_id = %user.id, "User logged in");

    issue_session(&state, jar, &user.id)
}

/// Clear the session cookie. Header-token clients just drop their token.
async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (
        jar.remove(Cookie::build(TOKEN_COOKIE).path("/")),
        StatusCode::NO_CONTENT,
    )
}
