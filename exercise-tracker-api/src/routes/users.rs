/// User endpoints
///
/// # Endpoints
///
/// - `POST /api/users` - Create user
/// - `GET /api/users` - List users

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::JsonOrForm,
};
use axum::{extract::State, Json};
use exercise_tracker_shared::models::user::User;
use serde::Deserialize;
use tracing::info;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    /// Display name, not required to be unique
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /api/users
/// Content-Type: application/json | application/x-www-form-urlencoded
///
/// username=alice
/// ```
///
/// # Response
///
/// ```json
/// { "username": "alice", "_id": "2f0c3b9e-..." }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Missing or empty username
/// - `500 Internal Server Error`: Storage failure
pub async fn create_user(
    State(state): State<AppState>,
    JsonOrForm(req): JsonOrForm<CreateUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = state
        .store
        .create_user(&req.username)
        .await
        .map_err(|e| ApiError::from_store(e, "User creation failed"))?;

    info!(user_id = %user.id, backend = state.store.backend(), "User created");
    Ok(Json(user))
}

/// List users
///
/// # Endpoint
///
/// ```text
/// GET /api/users
/// ```
///
/// # Response
///
/// ```json
/// [
///   { "username": "alice", "_id": "2f0c3b9e-..." },
///   { "username": "bob", "_id": "81d4fae7-..." }
/// ]
/// ```
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state
        .store
        .list_users()
        .await
        .map_err(|e| ApiError::from_store(e, "Could not list users"))?;

    Ok(Json(users))
}
