// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request extractors with API-style rejections.

use crate::error::AppError;
use axum::extract::FromRequest;

/// `axum::Json` whose rejection is rendered as an `AppError::BadRequest` body.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
