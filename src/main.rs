// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! FitDiet Tracker API Server
//!
//! Stores meal and workout logs per user and asks Gemini for diet plans
//! and daily diet analysis.

use fitdiet_tracker::{
    config::Config,
    db::FirestoreDb,
    services::{DietAdvisor, GeminiClient},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting FitDiet Tracker API");

    // Initialize Firestore database
    let db = FirestoreDb::new(&config.gcp_project_id).await?;

    let advisor = DietAdvisor::new(GeminiClient::from_config(&config));
    tracing::info!(model = %config.gemini_model, "Gemini client initialized");

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        advisor,
    });

    // Build router
    let app = fitdiet_tracker::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("fitdiet_tracker=debug,info")),
        )
        .with(format)
        .init();
}
