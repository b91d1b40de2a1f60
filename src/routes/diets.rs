// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet log routes, plus AI analysis and plan generation.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::plan::has_any_food;
use crate::models::{check_owner, DayPlan, Diet, FoodEntry, HealthProfile, NewDiet, WeekDay};
use crate::routes::{extract::ApiJson, MessageResponse};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diets", get(list_diets).post(create_diet))
        .route("/api/diets/analyze", post(analyze_diet))
        .route("/api/diets/generate", post(generate_plan))
        .route("/api/diets/{id}", delete(delete_diet))
}

// ─── CRUD ────────────────────────────────────────────────────

/// All of the caller's diet entries, newest first.
async fn list_diets(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<Diet>>> {
    let diets = state.db.list_diets_for_user(&user.user_id).await?;
    Ok(Json(diets))
}

/// Log a diet entry for the caller.
async fn create_diet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(input): ApiJson<NewDiet>,
) -> Result<Json<Diet>> {
    input.validate()?;

    let diet = Diet::new(&user.user_id, input);
    state.db.create_diet(&diet).await?;

    tracing::debug!(user_id = %user.user_id, diet_id = %diet.id, "Diet entry logged");
    Ok(Json(diet))
}

/// Delete one of the caller's diet entries.
async fn delete_diet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(diet_id): Path<String>,
) -> Result<Json<MessageResponse>> {
    let existing = state.db.get_diet(&diet_id).await?;
    let diet = check_owner(existing, &user.user_id, "Diet entry not found").map_err(|e| {
        tracing::info!(user_id = %user.user_id, diet_id = %diet_id, error = %e, "Diet delete refused");
        e
    })?;

    state.db.delete_diet(&diet.id).await?;

    Ok(Json(MessageResponse {
        message: "Diet entry removed".to_string(),
    }))
}

// ─── Analysis ────────────────────────────────────────────────

/// Body of `POST /api/diets/analyze`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub profile: Option<HealthProfile>,
    #[serde(default)]
    pub daily_diet: Vec<FoodEntry>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AnalyzeResponse {
    /// Markdown text, rendered client-side
    pub analysis: String,
}

/// Ask the model to critique one day's food log.
async fn analyze_diet(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>> {
    let profile = match request.profile {
        Some(profile) if !request.daily_diet.is_empty() => profile,
        _ => {
            return Err(AppError::BadRequest(
                "Profile and daily diet are required.".to_string(),
            ))
        }
    };

    tracing::debug!(
        user_id = %user.user_id,
        entries = request.daily_diet.len(),
        "Analyzing diet"
    );

    let analysis = state
        .advisor
        .analyze_diet(&profile, &request.daily_diet)
        .await?;

    Ok(Json(AnalyzeResponse { analysis }))
}

// ─── Plan Generation ─────────────────────────────────────────

/// Body of `POST /api/diets/generate`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// Falls back to the stored profile when omitted.
    #[serde(default)]
    pub profile: Option<HealthProfile>,
    #[serde(default)]
    pub week: Vec<WeekDay>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GenerateResponse {
    pub plan: Vec<DayPlan>,
}

/// Ask the model for a personalized 7-day plan.
async fn generate_plan(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    ApiJson(request): ApiJson<GenerateRequest>,
) -> Result<Json<GenerateResponse>> {
    if request.week.is_empty() {
        return Err(AppError::BadRequest("Weekly diet is required.".to_string()));
    }
    if !has_any_food(&request.week) {
        return Err(AppError::BadRequest(
            "Please enter at least one meal with food items for any day.".to_string(),
        ));
    }

    let profile = match request.profile {
        Some(profile) => profile,
        None => {
            let stored = state
                .db
                .get_user(&user.user_id)
                .await?
                .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
            HealthProfile::from(&stored)
        }
    };

    let plan = state.advisor.generate_plan(&profile, &request.week).await?;

    Ok(Json(GenerateResponse { plan }))
}
