// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup; `.env` is honored for local
//! development.

use std::env;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";
const DEFAULT_PORT: u16 = 3000;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// GCP project ID (Firestore)
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Gemini model name, e.g. `gemini-1.5-flash-latest`
    pub gemini_model: String,
    /// Base URL of the Generative Language API
    pub gemini_base_url: String,

    // --- Secrets ---
    /// Gemini API key
    pub gemini_api_key: String,
    /// JWT signing key for session tokens (raw bytes)
    pub jwt_signing_key: Vec<u8>,
}

impl Config {
    /// Fixed configuration for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            gcp_project_id: "test-project".to_string(),
            port: DEFAULT_PORT,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: "http://127.0.0.1:9".to_string(),
            gemini_api_key: "test_gemini_key".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            gemini_model: env::var("GEMINI_MODEL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_GEMINI_BASE_URL.to_string()),

            gemini_api_key: env::var("GEMINI_API_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("GEMINI_API_KEY"))?,
            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("GEMINI_API_KEY", " test_key \n");
        env::set_var("JWT_SIGNING_KEY", "test_jwt_key_32_bytes_minimum!!");
        env::set_var("GEMINI_BASE_URL", "http://localhost:8089/");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.gemini_api_key, "test_key");
        assert_eq!(config.gemini_base_url, "http://localhost:8089");
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.jwt_signing_key, b"test_jwt_key_32_bytes_minimum!!");
    }
}
