//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    pub const USERS: &str = "users";
    pub const DIETS: &str = "diets";
    pub const WORKOUTS: &str = "workouts";
}
