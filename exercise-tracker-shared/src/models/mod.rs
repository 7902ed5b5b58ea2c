/// Data model for the exercise tracker
///
/// # Models
///
/// - `user`: Users that own exercises
/// - `exercise`: Exercise records, the append view and the log view
///
/// Identifiers serialize as `_id` on the wire.
///
/// # Example
///
/// ```
/// use exercise_tracker_shared::models::user::User;
/// use uuid::Uuid;
///
/// let user = User::new("alice");
/// let json = serde_json::to_value(&user).unwrap();
/// assert_eq!(json["username"], "alice");
/// assert_eq!(json["_id"], user.id.to_string());
/// ```

pub mod exercise;
pub mod user;
