/// Record stores for users and exercises
///
/// `RecordStore` is the single seam between the HTTP layer and storage. Two
/// implementations exist and are interchangeable:
///
/// - `memory::MemoryStore`: transient, process-local storage
/// - `postgres::PgStore`: durable storage in PostgreSQL
///
/// # Store Contract
///
/// ```text
/// create_user      ──> new User (no uniqueness check on username)
/// list_users       ──> all users in insertion order
/// append_exercise  ──> LoggedExercise | UserNotFound   (atomic owner check)
/// get_log          ──> ExerciseLog    | UserNotFound   (range, then limit)
/// ```
///
/// # Example
///
/// ```
/// use exercise_tracker_shared::models::exercise::{LogQuery, NewExercise};
/// use exercise_tracker_shared::store::{memory::MemoryStore, RecordStore};
///
/// # async fn example() -> Result<(), exercise_tracker_shared::store::StoreError> {
/// let store = MemoryStore::new();
/// let user = store.create_user("alice").await?;
///
/// store
///     .append_exercise(
///         user.id,
///         NewExercise {
///             description: "run".to_string(),
///             duration: 30,
///             date: None,
///         },
///     )
///     .await?;
///
/// let log = store.get_log(user.id, &LogQuery::default()).await?;
/// assert_eq!(log.count, 1);
/// # Ok(())
/// # }
/// ```

pub mod memory;
pub mod postgres;

use crate::models::{
    exercise::{ExerciseLog, LogQuery, LoggedExercise, NewExercise},
    user::User,
};
use async_trait::async_trait;
use uuid::Uuid;

/// Record store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The referenced user does not exist
    #[error("User not found")]
    UserNotFound,

    /// The underlying database operation could not complete
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Record store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Storage for users and their exercises
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Short name of the backend, used in logs
    fn backend(&self) -> &'static str;

    /// Creates a user with a newly allocated ID
    async fn create_user(&self, username: &str) -> StoreResult<User>;

    /// Lists all users in storage order
    async fn list_users(&self) -> StoreResult<Vec<User>>;

    /// Appends an exercise if (and only if) its owner exists
    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: NewExercise,
    ) -> StoreResult<LoggedExercise>;

    /// Reads a user's exercises filtered by `query`
    async fn get_log(&self, user_id: Uuid, query: &LogQuery) -> StoreResult<ExerciseLog>;
}

/// Resolves a raw path identifier to a user ID
///
/// Text that is not a UUID can never name a stored user, so it is reported
/// as `UserNotFound` rather than as malformed input.
pub fn parse_user_id(raw: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| StoreError::UserNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
        assert!(matches!(
            parse_user_id("5f1c2b7e9a"),
            Err(StoreError::UserNotFound)
        ));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(StoreError::UserNotFound.to_string(), "User not found");
        let err = StoreError::from(sqlx::Error::PoolTimedOut);
        assert!(err.to_string().starts_with("Database error:"));
    }
}
