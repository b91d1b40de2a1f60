// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod diet;
pub mod plan;
pub mod progress;
pub mod user;
pub mod workout;

pub use diet::{Diet, FoodEntry, NewDiet};
pub use plan::{DayPlan, FoodItem, MealPlan, WeekDay, WeekMeal};
pub use progress::{DailyCalories, HistoryEntry};
pub use user::{normalize_email, HealthProfile, ProfileUpdate, User, UserProfile};
pub use workout::{NewWorkout, Workout};

use crate::error::AppError;
use validator::ValidationError;

/// A record that belongs to exactly one user.
pub trait Owned {
    /// Id of the owning user.
    fn owner(&self) -> &str;
}

/// Resolve a fetched record for a mutation by `caller`.
///
/// A missing record is `NotFound(not_found)`; a record owned by anyone else
/// is `NotOwner` and must be left untouched by the caller.
pub fn check_owner<T: Owned>(
    record: Option<T>,
    caller: &str,
    not_found: &str,
) -> Result<T, AppError> {
    let record = record.ok_or_else(|| AppError::NotFound(not_found.to_string()))?;
    if record.owner() != caller {
        return Err(AppError::NotOwner);
    }
    Ok(record)
}

/// Reject strings that are empty after trimming.
pub(crate) fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

/// Serde helpers accepting numbers sent either as JSON numbers or as
/// numeric strings (HTML form inputs).
pub(crate) mod lenient {
    use serde::{de::Error, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(f64),
        String(String),
    }

    /// Required number.
    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        optional_number(deserializer)?.ok_or_else(|| D::Error::custom("expected a number"))
    }

    /// Optional number; `null` and blank strings are `None`.
    pub fn optional_number<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::Number(n)) => Ok(Some(n)),
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid number: {s}"))),
        }
    }
}
