// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitDiet Tracker: diet and workout logging with AI nutrition advice.
//!
//! This crate provides the backend API: per-user meal and workout logs,
//! profile management, progress summaries, and Gemini-backed diet plan
//! generation and analysis.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::DietAdvisor;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub advisor: DietAdvisor,
}
