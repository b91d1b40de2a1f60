// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Workout model for storage and API.

use super::{lenient, non_blank, Owned};
use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored workout entry in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Workout {
    /// Random UUID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user: String,
    pub exercise_name: String,
    /// Minutes
    pub duration: f64,
    pub calories_burned: f64,
    /// When the workout was logged (RFC3339 UTC)
    pub date: String,
}

impl Owned for Workout {
    fn owner(&self) -> &str {
        &self.user
    }
}

/// Body of `POST /api/workouts`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkout {
    #[validate(custom(function = "non_blank"))]
    pub exercise_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub duration: f64,
    #[serde(deserialize_with = "lenient::number")]
    pub calories_burned: f64,
}

impl Workout {
    /// Build a new entry owned by `owner`, stamped with a fresh id and the current time.
    pub fn new(owner: &str, input: NewWorkout) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: owner.to_string(),
            exercise_name: input.exercise_name.trim().to_string(),
            duration: input.duration,
            calories_burned: input.calories_burned,
            date: now_rfc3339(),
        }
    }
}
