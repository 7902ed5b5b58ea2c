/// Exercise endpoints
///
/// # Endpoints
///
/// - `POST /api/users/:_id/exercises` - Append an exercise to a user
/// - `GET /api/users/:_id/logs` - Read a user's exercise log
///
/// A path ID that does not resolve to a stored user yields
/// `404 Not Found` with `{ "error": "User not found" }`.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::{ApiPath, ApiQuery, JsonOrForm},
};
use axum::{extract::State, Json};
use exercise_tracker_shared::{
    calendar,
    coerce::{parse_int_prefix, LenientInt},
    models::exercise::{ExerciseLog, LogQuery, LoggedExercise, NewExercise},
    store::parse_user_id,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Add exercise request
#[derive(Debug, Deserialize, Validate)]
pub struct AddExerciseRequest {
    /// Free-text description
    #[serde(default)]
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    /// Duration in minutes, as a number or text; must be positive
    pub duration: Option<LenientInt>,

    /// Optional date; blank means today
    pub date: Option<String>,
}

impl AddExerciseRequest {
    /// Validates and coerces the request into store input
    pub fn into_new_exercise(self) -> ApiResult<NewExercise> {
        self.validate()?;

        let duration = self
            .duration
            .ok_or_else(|| ApiError::BadRequest("duration is required".to_string()))?
            .get();
        if duration <= 0 {
            return Err(ApiError::BadRequest(
                "duration must be a positive number of minutes".to_string(),
            ));
        }
        let date = calendar::parse_optional(self.date.as_deref())?;

        Ok(NewExercise {
            description: self.description,
            duration,
            date,
        })
    }
}

/// Log query parameters
///
/// All values arrive as text; blank values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct LogParams {
    /// Inclusive lower date bound
    pub from: Option<String>,

    /// Inclusive upper date bound
    pub to: Option<String>,

    /// Maximum number of entries; zero or less means no limit
    pub limit: Option<String>,
}

impl LogParams {
    pub fn into_query(self) -> ApiResult<LogQuery> {
        let from = calendar::parse_optional(self.from.as_deref())?;
        let to = calendar::parse_optional(self.to.as_deref())?;

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let value = parse_int_prefix(raw)
                    .ok_or_else(|| ApiError::BadRequest(format!("Invalid limit: {:?}", raw)))?;
                LogQuery::limit_from(value)
            }
        };

        Ok(LogQuery { from, to, limit })
    }
}

/// Append an exercise
///
/// # Endpoint
///
/// ```text
/// POST /api/users/:_id/exercises
/// Content-Type: application/json | application/x-www-form-urlencoded
///
/// { "description": "run", "duration": "25", "date": "2024-01-01" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "_id": "2f0c3b9e-...",
///   "username": "alice",
///   "date": "Mon Jan 01 2024",
///   "duration": 25,
///   "description": "run"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing description/duration, non-positive duration,
///   or unparseable values
/// - `404 Not Found`: User does not exist
/// - `500 Internal Server Error`: Storage failure
pub async fn add_exercise(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    JsonOrForm(req): JsonOrForm<AddExerciseRequest>,
) -> ApiResult<Json<LoggedExercise>> {
    let context = "Exercise creation failed";
    let user_id = parse_user_id(&user_id).map_err(|e| ApiError::from_store(e, context))?;
    let exercise = req.into_new_exercise()?;

    let logged = state
        .store
        .append_exercise(user_id, exercise)
        .await
        .map_err(|e| ApiError::from_store(e, context))?;

    info!(user_id = %user_id, duration = logged.duration, "Exercise added");
    Ok(Json(logged))
}

/// Read an exercise log
///
/// # Endpoint
///
/// ```text
/// GET /api/users/:_id/logs?from=2024-01-01&to=2024-01-31&limit=10
/// ```
///
/// # Response
///
/// ```json
/// {
///   "_id": "2f0c3b9e-...",
///   "username": "alice",
///   "count": 1,
///   "log": [
///     { "description": "run", "duration": 25, "date": "Mon Jan 15 2024" }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Unparseable `from`, `to` or `limit`
/// - `404 Not Found`: User does not exist
/// - `500 Internal Server Error`: Storage failure
pub async fn get_log(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
    ApiQuery(params): ApiQuery<LogParams>,
) -> ApiResult<Json<ExerciseLog>> {
    let context = "Could not retrieve logs";
    let user_id = parse_user_id(&user_id).map_err(|e| ApiError::from_store(e, context))?;
    let query = params.into_query()?;

    let log = state
        .store
        .get_log(user_id, &query)
        .await
        .map_err(|e| ApiError::from_store(e, context))?;

    Ok(Json(log))
}
