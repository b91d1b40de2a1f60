// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress chart and combined history routes.

use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::progress::{daily_calorie_summary, merged_history, CHART_DAYS};
use crate::models::{DailyCalories, Diet, HistoryEntry, Workout};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Largest real-world UTC offset, in minutes.
const MAX_TZ_OFFSET_MINUTES: i32 = 14 * 60;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/progress", get(get_progress))
        .route("/api/history", get(get_history))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProgressQuery {
    /// Minutes east of UTC used to pick calendar dates
    #[serde(default)]
    tz_offset: i32,
}

fn parse_offset(minutes: i32) -> Result<FixedOffset> {
    if minutes.abs() > MAX_TZ_OFFSET_MINUTES {
        return Err(AppError::BadRequest(
            "Invalid 'tzOffset' parameter: must be within ±840 minutes".to_string(),
        ));
    }
    FixedOffset::east_opt(minutes * 60).ok_or_else(|| {
        AppError::BadRequest("Invalid 'tzOffset' parameter".to_string())
    })
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressResponse {
    /// Oldest first, at most seven distinct dates
    pub days: Vec<DailyCalories>,
}

async fn fetch_logs(state: &AppState, user_id: &str) -> Result<(Vec<Diet>, Vec<Workout>)> {
    futures_util::try_join!(
        state.db.list_diets_for_user(user_id),
        state.db.list_workouts_for_user(user_id),
    )
}

/// Calories in/out for the most recent logged dates.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ProgressQuery>,
) -> Result<Json<ProgressResponse>> {
    let offset = parse_offset(params.tz_offset)?;
    let (diets, workouts) = fetch_logs(&state, &user.user_id).await?;

    tracing::debug!(
        user_id = %user.user_id,
        diets = diets.len(),
        workouts = workouts.len(),
        "Computing progress"
    );

    let days = daily_calorie_summary(&diets, &workouts, offset, CHART_DAYS);
    Ok(Json(ProgressResponse { days }))
}

/// Diet and workout entries merged newest-first.
async fn get_history(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<Vec<HistoryEntry>>> {
    let (diets, workouts) = fetch_logs(&state, &user.user_id).await?;
    Ok(Json(merged_history(diets, workouts)))
}
