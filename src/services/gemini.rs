// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Gemini (Generative Language API) client.
//!
//! Only `generateContent` with a single text prompt is used. Failures are
//! reported once as `AppError::Upstream`; there is no retry.

use crate::config::Config;
use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Create a client for `model` at `base_url` (no trailing slash).
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.gemini_base_url.clone(),
            config.gemini_model.clone(),
            config.gemini_api_key.clone(),
        )
    }

    /// Send one prompt and return the reply text.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, AppError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url,
            urlencoding::encode(&self.model)
        );

        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        tracing::debug!(model = %self.model, prompt_len = prompt.len(), "Calling Gemini");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Gemini request failed: {}", e)))?;

        let reply: GenerateContentResponse = self.check_response_json(response).await?;

        reply
            .text()
            .ok_or_else(|| AppError::Upstream("Gemini returned no text".to_string()))
    }

    /// Check response status and parse JSON body.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                tracing::warn!("Gemini rate limit hit (429)");
            }

            return Err(AppError::Upstream(format!("HTTP {}: {}", status, body)));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("JSON parse error: {}", e)))
    }
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// `generateContent` response (only the fields we read).
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    #[serde(default)]
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}
