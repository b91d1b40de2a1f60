//! User model for storage and API.

use super::lenient;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User document stored in Firestore.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Random UUID (also used as document ID)
    pub id: String,
    pub username: String,
    pub email: String,
    /// bcrypt hash, never sent to clients
    pub password: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    /// Height in cm
    #[serde(default)]
    pub height: Option<f64>,
    /// Weight in kg
    #[serde(default)]
    pub weight: Option<f64>,
    /// e.g. "Weight Loss", "Muscle Gain"
    #[serde(default)]
    pub goal: Option<String>,
    /// Free text, e.g. "Hypertension, Diabetes"
    #[serde(default)]
    pub health_conditions: Option<String>,
    pub created_at: String,
}

/// Public view of a user (no password hash).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub goal: Option<String>,
    pub health_conditions: Option<String>,
    pub created_at: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            age: user.age,
            gender: user.gender,
            height: user.height,
            weight: user.weight,
            goal: user.goal,
            health_conditions: user.health_conditions,
            created_at: user.created_at,
        }
    }
}

/// Sparse profile update from `PUT /api/users/me`.
///
/// Only fields that are present and non-empty are applied. Blank strings,
/// `null` and non-positive numbers leave the stored value alone.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub health_conditions: Option<String>,
}

fn filled(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Emails are stored and looked up lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl ProfileUpdate {
    /// New username, if this update changes it.
    pub fn new_username(&self) -> Option<String> {
        filled(&self.username)
    }

    /// New email (lowercased), if this update changes it.
    pub fn new_email(&self) -> Option<String> {
        filled(&self.email).map(|e| normalize_email(&e))
    }

    /// Apply the non-empty fields to `user`.
    pub fn apply_to(&self, user: &mut User) {
        if let Some(username) = self.new_username() {
            user.username = username;
        }
        if let Some(email) = self.new_email() {
            user.email = email;
        }
        if let Some(age) = positive(self.age) {
            user.age = Some(age.round() as u32);
        }
        if let Some(gender) = filled(&self.gender) {
            user.gender = Some(gender);
        }
        if let Some(height) = positive(self.height) {
            user.height = Some(height);
        }
        if let Some(weight) = positive(self.weight) {
            user.weight = Some(weight);
        }
        if let Some(goal) = filled(&self.goal) {
            user.goal = Some(goal);
        }
        if let Some(conditions) = filled(&self.health_conditions) {
            user.health_conditions = Some(conditions);
        }
    }
}

/// Health profile sent to the generative model.
///
/// Clients may send it inline; otherwise it is derived from the stored user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub height: Option<f64>,
    #[serde(default, deserialize_with = "lenient::optional_number")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub health_conditions: Option<String>,
}

impl From<&User> for HealthProfile {
    fn from(user: &User) -> Self {
        Self {
            age: user.age.map(f64::from),
            gender: user.gender.clone(),
            height: user.height,
            weight: user.weight,
            goal: user.goal.clone(),
            health_conditions: user.health_conditions.clone(),
        }
    }
}
