// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Diet plan generation and daily diet analysis on top of Gemini.
//!
//! Prompts are plain text. Generation asks for a JSON array back, but model
//! replies routinely wrap it in prose or Markdown code fences, so the array
//! is cut out of the reply before parsing.

use crate::error::AppError;
use crate::models::{DayPlan, FoodEntry, HealthProfile, WeekDay};
use crate::services::GeminiClient;

/// Generates plans and analyses for a user.
#[derive(Clone)]
pub struct DietAdvisor {
    gemini: GeminiClient,
}

impl DietAdvisor {
    pub fn new(gemini: GeminiClient) -> Self {
        Self { gemini }
    }

    /// Ask the model for a 7-day plan based on `profile` and the user's current `week`.
    pub async fn generate_plan(
        &self,
        profile: &HealthProfile,
        week: &[WeekDay],
    ) -> Result<Vec<DayPlan>, AppError> {
        let prompt = plan_prompt(profile, week)?;
        let reply = self.gemini.generate_text(&prompt).await?;
        let plan = parse_plan(&reply)?;

        tracing::info!(days = plan.len(), "Diet plan generated");
        Ok(plan)
    }

    /// Ask the model for a Markdown critique of one day's food log.
    pub async fn analyze_diet(
        &self,
        profile: &HealthProfile,
        daily_diet: &[FoodEntry],
    ) -> Result<String, AppError> {
        let prompt = analysis_prompt(profile, daily_diet);
        let analysis = self.gemini.generate_text(&prompt).await?;

        tracing::info!(
            entries = daily_diet.len(),
            analysis_len = analysis.len(),
            "Diet analysis generated"
        );
        Ok(analysis)
    }
}

// ─── Generation ──────────────────────────────────────────────

const PLAN_FORMAT_EXAMPLE: &str =
    r#"[{"day":"Monday","meals":[{"meal":"Breakfast","foods":["Oats with milk (1 cup)"]}]}]"#;

/// Build the plan-generation instruction.
pub fn plan_prompt(profile: &HealthProfile, week: &[WeekDay]) -> Result<String, AppError> {
    let profile_json = serde_json::to_string(profile)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize profile: {}", e)))?;
    let week_json = serde_json::to_string(week)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to serialize week: {}", e)))?;

    Ok(format!(
        "You are an API that returns JSON only. User profile: {profile_json}. \
         The user's current weekly diet: {week_json}. \
         Produce a healthy, personalized 7-day diet plan for this user. \
         Reply with nothing but a JSON array in exactly this format: {PLAN_FORMAT_EXAMPLE}. \
         No explanation, no Markdown, no extra text."
    ))
}

/// Locate the JSON array in a model reply.
///
/// If the reply contains a code fence, the first fenced block is searched
/// (an optional language tag such as `json` is skipped). The result spans
/// from the first `[` to the last `]`. Returns `None` when no such span exists.
pub fn extract_json_array(reply: &str) -> Option<&str> {
    fenced_block(reply)
        .and_then(bracketed)
        .or_else(|| bracketed(reply))
}

fn fenced_block(text: &str) -> Option<&str> {
    let block = text.split("```").nth(1)?;
    // Skip a language tag on the opening fence line.
    match block.split_once('\n') {
        Some((tag, rest)) if !tag.contains('[') => Some(rest),
        _ => Some(block),
    }
}

fn bracketed(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}

/// Extract and parse a plan from a model reply.
pub fn parse_plan(reply: &str) -> Result<Vec<DayPlan>, AppError> {
    let json = extract_json_array(reply).ok_or_else(|| {
        tracing::debug!(reply = %reply, "No JSON array in model reply");
        AppError::Upstream("No JSON array found in generated diet plan".to_string())
    })?;

    serde_json::from_str(json)
        .map_err(|e| AppError::Upstream(format!("Generated diet plan is not valid JSON: {}", e)))
}

// ─── Analysis ────────────────────────────────────────────────

/// Body mass index, when both height (cm) and weight (kg) are known.
pub fn bmi(profile: &HealthProfile) -> Option<f64> {
    let height_m = profile.height.filter(|h| *h > 0.0)? / 100.0;
    let weight = profile.weight.filter(|w| *w > 0.0)?;
    Some(weight / (height_m * height_m))
}

fn or_default(value: Option<&str>, default: &str) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Build the analysis instruction for one day's food log.
pub fn analysis_prompt(profile: &HealthProfile, daily_diet: &[FoodEntry]) -> String {
    let bmi = bmi(profile)
        .map(|b| format!("{:.2}", b))
        .unwrap_or_else(|| "Not available".to_string());
    let age = profile
        .age
        .filter(|a| *a > 0.0)
        .map(|a| format!("{}", a.round() as u32))
        .unwrap_or_else(|| "Not specified".to_string());

    let diet_summary = daily_diet
        .iter()
        .map(|entry| {
            let calories = entry
                .calories
                .map(|c| format!("{}", c))
                .unwrap_or_else(|| "unknown".to_string());
            format!("- {}: {} calories", entry.food_name.trim(), calories)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a professional nutritionist. Review today's diet for the user below, \
taking their health profile and goals into account.

**HEALTH PROFILE**
- **Goal:** {goal}
- **BMI:** {bmi}
- **Health conditions:** {conditions}
- **Age:** {age}
- **Gender:** {gender}

**TODAY'S DIET**
{diet_summary}

**WHAT TO WRITE**
1. **Analysis:** a short, constructive assessment of today's diet.
2. **Suggestions:** 3-4 specific, actionable improvements.
3. **Sample meal plan:** one healthier day (Breakfast, Lunch, Dinner, Snacks) tailored to the profile.

Format the whole answer as simple Markdown with a heading per section \
(e.g. \"### Analysis\", \"### Suggestions\").",
        goal = or_default(profile.goal.as_deref(), "Not specified"),
        conditions = or_default(profile.health_conditions.as_deref(), "None specified"),
        gender = or_default(profile.gender.as_deref(), "Not specified"),
    )
}
