// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod advisor;
pub mod auth;
pub mod gemini;

pub use advisor::DietAdvisor;
pub use auth::{hash_password, verify_password};
pub use gemini::GeminiClient;
