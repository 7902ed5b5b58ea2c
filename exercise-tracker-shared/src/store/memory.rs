/// In-memory record store
///
/// All state lives in a single `RwLock`-guarded struct owned by the store.
/// Appends take the write lock for both the owner lookup and the insert, so
/// an exercise can never be recorded for a user that does not exist.
///
/// Each `MemoryStore` is independent; tests get a clean store per case.

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{
    exercise::{Exercise, ExerciseLog, LogEntry, LogQuery, LoggedExercise, NewExercise},
    user::User,
};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct MemoryState {
    /// Users in insertion order
    users: Vec<User>,

    /// Position of each user in `users`
    index: HashMap<Uuid, usize>,

    /// Exercises of all users in insertion order
    exercises: Vec<Exercise>,
}

impl MemoryState {
    fn user(&self, id: Uuid) -> Option<&User> {
        self.index.get(&id).and_then(|&pos| self.users.get(pos))
    }
}

/// Transient store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn create_user(&self, username: &str) -> StoreResult<User> {
        let user = User::new(username);

        let mut state = self.state.write().await;
        let position = state.users.len();
        state.index.insert(user.id, position);
        state.users.push(user.clone());

        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: NewExercise,
    ) -> StoreResult<LoggedExercise> {
        let mut state = self.state.write().await;
        let user = state.user(user_id).cloned().ok_or(StoreError::UserNotFound)?;

        let exercise = exercise.into_exercise(user.id);
        let logged = LoggedExercise::new(&user, &exercise);
        state.exercises.push(exercise);

        debug!(user_id = %user_id, "Appended exercise");
        Ok(logged)
    }

    async fn get_log(&self, user_id: Uuid, query: &LogQuery) -> StoreResult<ExerciseLog> {
        let state = self.state.read().await;
        let user = state.user(user_id).cloned().ok_or(StoreError::UserNotFound)?;

        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        let entries: Vec<LogEntry> = state
            .exercises
            .iter()
            .filter(|exercise| exercise.user_id == user_id && query.admits(exercise.date))
            .take(limit)
            .map(LogEntry::from)
            .collect();

        debug!(user_id = %user_id, count = entries.len(), "Read exercise log");
        Ok(ExerciseLog::new(user, entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar;
    use chrono::NaiveDate;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn exercise(description: &str, date: Option<NaiveDate>) -> NewExercise {
        NewExercise {
            description: description.to_string(),
            duration: 20,
            date,
        }
    }

    #[tokio::test]
    async fn test_create_then_list_users() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").await.unwrap();
        let bob = store.create_user("bob").await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users, vec![alice.clone(), bob]);
        assert_eq!(users.iter().filter(|u| u.id == alice.id).count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_usernames_allowed() {
        let store = MemoryStore::new();
        let first = store.create_user("sam").await.unwrap();
        let second = store.create_user("sam").await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_append_to_missing_user_creates_nothing() {
        let store = MemoryStore::new();
        let result = store
            .append_exercise(Uuid::new_v4(), exercise("ghost", None))
            .await;

        assert!(matches!(result, Err(StoreError::UserNotFound)));
        assert!(store.state.read().await.exercises.is_empty());
    }

    #[tokio::test]
    async fn test_append_defaults_date_to_today() {
        let store = MemoryStore::new();
        let user = store.create_user("alice").await.unwrap();

        let logged = store
            .append_exercise(user.id, exercise("walk", None))
            .await
            .unwrap();

        assert_eq!(logged.user_id, user.id);
        assert_eq!(logged.username, "alice");
        assert_eq!(logged.date, calendar::today());
    }

    #[tokio::test]
    async fn test_log_date_range() {
        let store = MemoryStore::new();
        let user = store.create_user("alice").await.unwrap();
        for date in [ymd(2024, 1, 1), ymd(2024, 1, 15), ymd(2024, 2, 1)] {
            store
                .append_exercise(user.id, exercise("lift", Some(date)))
                .await
                .unwrap();
        }

        let query = LogQuery {
            from: Some(ymd(2024, 1, 10)),
            to: Some(ymd(2024, 1, 31)),
            limit: None,
        };
        let log = store.get_log(user.id, &query).await.unwrap();

        assert_eq!(log.count, 1);
        assert_eq!(log.log[0].date, ymd(2024, 1, 15));
    }

    #[tokio::test]
    async fn test_log_limit_keeps_insertion_order() {
        let store = MemoryStore::new();
        let user = store.create_user("alice").await.unwrap();
        for i in 0..5 {
            store
                .append_exercise(user.id, exercise(&format!("set {}", i), None))
                .await
                .unwrap();
        }

        let query = LogQuery {
            limit: Some(2),
            ..Default::default()
        };
        let log = store.get_log(user.id, &query).await.unwrap();

        assert_eq!(log.count, 2);
        assert_eq!(log.log[0].description, "set 0");
        assert_eq!(log.log[1].description, "set 1");
    }

    #[tokio::test]
    async fn test_log_only_contains_own_exercises() {
        let store = MemoryStore::new();
        let alice = store.create_user("alice").await.unwrap();
        let bob = store.create_user("bob").await.unwrap();

        store
            .append_exercise(alice.id, exercise("alice run", None))
            .await
            .unwrap();
        store
            .append_exercise(bob.id, exercise("bob run", None))
            .await
            .unwrap();

        let log = store.get_log(bob.id, &LogQuery::default()).await.unwrap();
        assert_eq!(log.count, 1);
        assert_eq!(log.log[0].description, "bob run");
    }

    #[tokio::test]
    async fn test_log_for_missing_user() {
        let store = MemoryStore::new();
        let result = store.get_log(Uuid::new_v4(), &LogQuery::default()).await;
        assert!(matches!(result, Err(StoreError::UserNotFound)));
    }
}
