// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profile and credentials)
//! - Diets (meal log entries)
//! - Workouts (exercise log entries)
//!
//! Diet and workout documents carry their owner in the `user` field and are
//! always listed through an equality filter on it.

use crate::db::collections;
use crate::error::AppError;
use crate::models::{Diet, User, Workout};
use serde::{Deserialize, Serialize};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // The emulator rejects real credentials; use an unauthenticated connection.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: &str) -> Result<Option<User>, AppError> {
        self.get_document(collections::USERS, user_id).await
    }

    /// Find a user by exact email address.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_user_by_field("email", email).await
    }

    /// Find a user by exact username.
    pub async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_user_by_field("username", username).await
    }

    async fn find_user_by_field(&self, field: &str, value: &str) -> Result<Option<User>, AppError> {
        let users: Vec<User> = self
            .get_client()?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(|q| q.for_all([q.field(field).eq(value)]))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(users.into_iter().next())
    }

    /// Create or update a user.
    pub async fn upsert_user(&self, user: &User) -> Result<(), AppError> {
        self.put_document(collections::USERS, &user.id, user).await
    }

    // ─── Diet Operations ─────────────────────────────────────────

    /// All diet entries owned by `user_id`, newest first.
    pub async fn list_diets_for_user(&self, user_id: &str) -> Result<Vec<Diet>, AppError> {
        self.list_owned(collections::DIETS, user_id).await
    }

    /// Get a diet entry by ID, regardless of owner.
    pub async fn get_diet(&self, diet_id: &str) -> Result<Option<Diet>, AppError> {
        self.get_document(collections::DIETS, diet_id).await
    }

    /// Store a diet entry.
    pub async fn create_diet(&self, diet: &Diet) -> Result<(), AppError> {
        self.put_document(collections::DIETS, &diet.id, diet).await
    }

    /// Delete a diet entry by ID.
    pub async fn delete_diet(&self, diet_id: &str) -> Result<(), AppError> {
        self.delete_document(collections::DIETS, diet_id).await
    }

    // ─── Workout Operations ──────────────────────────────────────

    /// All workout entries owned by `user_id`, newest first.
    pub async fn list_workouts_for_user(&self, user_id: &str) -> Result<Vec<Workout>, AppError> {
        self.list_owned(collections::WORKOUTS, user_id).await
    }

    /// Get a workout entry by ID, regardless of owner.
    pub async fn get_workout(&self, workout_id: &str) -> Result<Option<Workout>, AppError> {
        self.get_document(collections::WORKOUTS, workout_id).await
    }

    /// Store a workout entry.
    pub async fn create_workout(&self, workout: &Workout) -> Result<(), AppError> {
        self.put_document(collections::WORKOUTS, &workout.id, workout)
            .await
    }

    /// Delete a workout entry by ID.
    pub async fn delete_workout(&self, workout_id: &str) -> Result<(), AppError> {
        self.delete_document(collections::WORKOUTS, workout_id)
            .await
    }

    // ─── Helper Methods ────────────────────────────────────────────

    async fn get_document<T>(&self, collection: &str, id: &str) -> Result<Option<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .by_id_in(collection)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn put_document<T>(&self, collection: &str, id: &str, object: &T) -> Result<(), AppError>
    where
        T: Serialize + for<'de> Deserialize<'de> + Sync + Send,
    {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collection)
            .document_id(id)
            .object(object)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    async fn delete_document(&self, collection: &str, id: &str) -> Result<(), AppError> {
        self.get_client()?
            .fluent()
            .delete()
            .from(collection)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Documents of `collection` whose `user` field equals `user_id`, by `date` descending.
    async fn list_owned<T>(&self, collection: &str, user_id: &str) -> Result<Vec<T>, AppError>
    where
        T: for<'de> Deserialize<'de> + Send,
    {
        self.get_client()?
            .fluent()
            .select()
            .from(collection)
            .filter(|q| q.for_all([q.field("user").eq(user_id)]))
            .order_by([("date", firestore::FirestoreQueryDirection::Descending)])
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
