/// PostgreSQL record store
///
/// Users and exercises live in the `users` and `exercises` tables created by
/// the bundled migrations. Both tables carry a `seq` column filled from a
/// sequence, which gives a stable insertion order for listings and logs.
///
/// Appending is a single statement: the owner lookup and the insert run in
/// one CTE, so no exercise is written unless the owner row exists.
///
/// # Example
///
/// ```no_run
/// use exercise_tracker_shared::db::pool::{create_pool, DatabaseConfig};
/// use exercise_tracker_shared::store::{postgres::PgStore, RecordStore};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// let user = store.create_user("alice").await?;
/// # Ok(())
/// # }
/// ```

use super::{RecordStore, StoreError, StoreResult};
use crate::models::{
    exercise::{ExerciseLog, LogEntry, LogQuery, LoggedExercise, NewExercise},
    user::User,
};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

/// Durable store backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl RecordStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn create_user(&self, username: &str) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username)
            VALUES ($1, $2)
            RETURNING id, username
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = %user.id, "Created user");
        Ok(user)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username
            FROM users
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn append_exercise(
        &self,
        user_id: Uuid,
        exercise: NewExercise,
    ) -> StoreResult<LoggedExercise> {
        let exercise = exercise.into_exercise(user_id);

        let logged = sqlx::query_as::<_, LoggedExercise>(
            r#"
            WITH owner AS (
                SELECT id, username FROM users WHERE id = $1
            ),
            inserted AS (
                INSERT INTO exercises (id, user_id, description, duration, date)
                SELECT $2, owner.id, $3, $4, $5 FROM owner
                RETURNING user_id, description, duration, date
            )
            SELECT owner.id AS user_id, owner.username,
                   inserted.date, inserted.duration, inserted.description
            FROM owner
            JOIN inserted ON inserted.user_id = owner.id
            "#,
        )
        .bind(user_id)
        .bind(exercise.id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::UserNotFound)?;

        debug!(user_id = %user_id, exercise_id = %exercise.id, "Appended exercise");
        Ok(logged)
    }

    async fn get_log(&self, user_id: Uuid, query: &LogQuery) -> StoreResult<ExerciseLog> {
        let user = self
            .find_user(user_id)
            .await?
            .ok_or(StoreError::UserNotFound)?;

        // LIMIT NULL is unbounded in PostgreSQL
        let entries = sqlx::query_as::<_, LogEntry>(
            r#"
            SELECT description, duration, date
            FROM exercises
            WHERE user_id = $1
              AND ($2::date IS NULL OR date >= $2)
              AND ($3::date IS NULL OR date <= $3)
            ORDER BY seq
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(query.from)
        .bind(query.to)
        .bind(query.limit.map(i64::from))
        .fetch_all(&self.pool)
        .await?;

        debug!(user_id = %user_id, count = entries.len(), "Read exercise log");
        Ok(ExerciseLog::new(user, entries))
    }
}
