/// Exercise model and its response views
///
/// An exercise belongs to exactly one user for its entire life and is never
/// updated or deleted. Two read-only views are built from it:
///
/// - `LoggedExercise`: returned after appending, merges the owner's identity
///   with the new exercise
/// - `ExerciseLog`: a user's filtered, possibly truncated history
///
/// # Schema
///
/// ```sql
/// CREATE TABLE exercises (
///     seq BIGSERIAL UNIQUE,
///     id UUID PRIMARY KEY,
///     user_id UUID NOT NULL REFERENCES users(id),
///     description TEXT NOT NULL,
///     duration BIGINT NOT NULL,
///     date DATE NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use crate::{calendar, models::user::User};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored exercise record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Exercise {
    /// Unique exercise ID (UUID v4)
    pub id: Uuid,

    /// Owner of this exercise
    pub user_id: Uuid,

    /// Free-text description
    pub description: String,

    /// Duration in minutes
    pub duration: i64,

    /// Calendar date the exercise was performed
    pub date: NaiveDate,
}

/// Input for appending an exercise to a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExercise {
    /// Free-text description
    pub description: String,

    /// Duration in minutes, already coerced to an integer
    pub duration: i64,

    /// Calendar date; `None` means today
    pub date: Option<NaiveDate>,
}

impl NewExercise {
    /// Materializes the record for `user_id`, defaulting the date to today
    pub fn into_exercise(self, user_id: Uuid) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            user_id,
            description: self.description,
            duration: self.duration,
            date: self.date.unwrap_or_else(calendar::today),
        }
    }
}

/// Response view for a freshly appended exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LoggedExercise {
    /// Owner ID, serialized as `_id`
    #[serde(rename = "_id")]
    pub user_id: Uuid,

    pub username: String,

    #[serde(with = "calendar::rendered")]
    pub date: NaiveDate,

    pub duration: i64,

    pub description: String,
}

impl LoggedExercise {
    pub fn new(user: &User, exercise: &Exercise) -> Self {
        Self {
            user_id: user.id,
            username: user.username.clone(),
            date: exercise.date,
            duration: exercise.duration,
            description: exercise.description.clone(),
        }
    }
}

/// One entry of an exercise log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LogEntry {
    pub description: String,

    pub duration: i64,

    #[serde(with = "calendar::rendered")]
    pub date: NaiveDate,
}

impl From<&Exercise> for LogEntry {
    fn from(exercise: &Exercise) -> Self {
        Self {
            description: exercise.description.clone(),
            duration: exercise.duration,
            date: exercise.date,
        }
    }
}

/// A user's exercise log after filtering and truncation
///
/// `count` is the length of `log`, not the user's total number of exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLog {
    #[serde(rename = "_id")]
    pub user_id: Uuid,

    pub username: String,

    pub count: usize,

    pub log: Vec<LogEntry>,
}

impl ExerciseLog {
    pub fn new(user: User, log: Vec<LogEntry>) -> Self {
        Self {
            user_id: user.id,
            username: user.username,
            count: log.len(),
            log,
        }
    }
}

/// Filters applied when reading a log
///
/// The date range is applied first (both bounds inclusive), then the result
/// is truncated to `limit` entries in storage order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub limit: Option<u32>,
}

impl LogQuery {
    /// Whether `date` falls inside the requested range
    pub fn admits(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }

    /// Builds a limit from a raw client value; zero or negative means unbounded
    pub fn limit_from(raw: i64) -> Option<u32> {
        if raw <= 0 {
            None
        } else {
            Some(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }
}
