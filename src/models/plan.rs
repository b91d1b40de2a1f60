// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Weekly diet shapes: what the user currently eats, and the generated plan.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One day of the user's current diet, as sent to plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekDay {
    pub day: String,
    #[serde(default)]
    pub meals: Vec<WeekMeal>,
}

/// One meal of the current diet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekMeal {
    pub meal: String,
    #[serde(default)]
    pub foods: Vec<FoodItem>,
}

/// A food in the current diet: either a bare name or a name with portion
/// and time of day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FoodItem {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        qty: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },
}

/// True if any day of `week` has at least one meal with a food in it.
pub fn has_any_food(week: &[WeekDay]) -> bool {
    week.iter()
        .flat_map(|day| &day.meals)
        .any(|meal| !meal.foods.is_empty())
}

/// One day of a generated diet plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DayPlan {
    /// e.g. "Monday"
    pub day: String,
    #[serde(default)]
    pub meals: Vec<MealPlan>,
}

/// One meal within a generated day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct MealPlan {
    /// e.g. "Breakfast"
    pub meal: String,
    #[serde(default)]
    pub foods: Vec<String>,
}
