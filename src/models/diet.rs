// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Diet (meal log) model for storage and API.

use super::{lenient, non_blank, Owned};
use crate::time_utils::now_rfc3339;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Stored diet entry in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Diet {
    /// Random UUID (also used as document ID)
    pub id: String,
    /// Owning user ID
    pub user: String,
    pub food_name: String,
    pub calories: f64,
    /// Grams
    #[serde(default)]
    pub protein: f64,
    /// Grams
    #[serde(default)]
    pub carbohydrates: f64,
    /// Grams
    #[serde(default)]
    pub fat: f64,
    /// When the entry was logged (RFC3339 UTC)
    pub date: String,
}

impl Owned for Diet {
    fn owner(&self) -> &str {
        &self.user
    }
}

/// Body of `POST /api/diets`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewDiet {
    #[validate(custom(function = "non_blank"))]
    pub food_name: String,
    #[serde(deserialize_with = "lenient::number")]
    pub calories: f64,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub protein: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub carbohydrates: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub fat: Option<f64>,
}

impl Diet {
    /// Build a new entry owned by `owner`, stamped with a fresh id and the current time.
    pub fn new(owner: &str, input: NewDiet) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user: owner.to_string(),
            food_name: input.food_name.trim().to_string(),
            calories: input.calories,
            protein: input.protein.unwrap_or_default(),
            carbohydrates: input.carbohydrates.unwrap_or_default(),
            fat: input.fat.unwrap_or_default(),
            date: now_rfc3339(),
        }
    }
}

/// One logged food as sent to `POST /api/diets/analyze`.
///
/// Clients usually post whole diet entries; everything but the name and
/// calories is ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    pub food_name: String,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub calories: Option<f64>,
}
