// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Password hashing.
//!
//! bcrypt is CPU-bound, so both operations run on the blocking pool.

use crate::error::AppError;

/// Hash a password using bcrypt.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Hashing task failed: {}", e)))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing failed: {}", e)))
}

/// Verify a password against its bcrypt hash.
///
/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Verification task failed: {}", e)))?;

    Ok(verified.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Stored password hash could not be verified");
        false
    }))
}
