/// User model
///
/// Users only carry a generated identifier and a caller-supplied username.
/// Usernames are not unique; two users may share one.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     seq BIGSERIAL UNIQUE,
///     id UUID PRIMARY KEY,
///     username TEXT NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user who owns exercises
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Display name supplied at creation
    pub username: String,

    /// Unique user ID (UUID v4), serialized as `_id`
    #[serde(rename = "_id")]
    pub id: Uuid,
}

impl User {
    /// Creates a user with a freshly generated ID
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            id: Uuid::new_v4(),
        }
    }
}
