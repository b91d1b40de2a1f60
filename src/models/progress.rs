// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Progress and history views derived from a user's diet and workout logs.
//!
//! Nothing here is stored; both views are recomputed from the raw records
//! on every request.

use crate::models::{Diet, Workout};
use crate::time_utils::local_date;
use chrono::{FixedOffset, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Number of distinct dates shown on the progress chart.
pub const CHART_DAYS: usize = 7;

/// Calories consumed and burned on one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailyCalories {
    /// "YYYY-MM-DD"
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub date: NaiveDate,
    pub calories_in: f64,
    pub calories_out: f64,
}

/// Sum calories in/out per calendar date and keep the `days` most recent dates,
/// oldest first.
///
/// Dates are taken in the fixed `offset` from UTC. Records whose timestamp
/// cannot be parsed are skipped.
pub fn daily_calorie_summary(
    diets: &[Diet],
    workouts: &[Workout],
    offset: FixedOffset,
    days: usize,
) -> Vec<DailyCalories> {
    let mut by_date: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();

    for diet in diets {
        if let Some(date) = local_date(&diet.date, offset) {
            by_date.entry(date).or_default().0 += diet.calories;
        }
    }
    for workout in workouts {
        if let Some(date) = local_date(&workout.date, offset) {
            by_date.entry(date).or_default().1 += workout.calories_burned;
        }
    }

    let skip = by_date.len().saturating_sub(days);
    by_date
        .into_iter()
        .skip(skip)
        .map(|(date, (calories_in, calories_out))| DailyCalories {
            date,
            calories_in,
            calories_out,
        })
        .collect()
}

/// One row of the combined history list.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum HistoryEntry {
    #[serde(rename = "DIET")]
    Diet(Diet),
    #[serde(rename = "WORKOUT")]
    Workout(Workout),
}

impl HistoryEntry {
    pub fn date(&self) -> &str {
        match self {
            HistoryEntry::Diet(d) => &d.date,
            HistoryEntry::Workout(w) => &w.date,
        }
    }
}

/// Merge both logs into one newest-first list.
pub fn merged_history(diets: Vec<Diet>, workouts: Vec<Workout>) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = diets
        .into_iter()
        .map(HistoryEntry::Diet)
        .chain(workouts.into_iter().map(HistoryEntry::Workout))
        .collect();

    // Stored dates are fixed-width UTC, so string order is time order.
    entries.sort_by(|a, b| b.date().cmp(a.date()));
    entries
}
