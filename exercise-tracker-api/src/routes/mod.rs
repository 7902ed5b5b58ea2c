/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `users`: Create and list users
/// - `exercises`: Append exercises and read exercise logs

pub mod exercises;
pub mod users;
