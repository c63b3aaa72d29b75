//! Route paths shared by the server router and the client.

/// User registration.
pub const REGISTER_PATH: &str = "/api/register";

/// Mood update, with the user id as a path parameter.
pub const USER_MOOD_ROUTE: &str = "/api/users/{id}/mood";

/// Basic credential challenge for the admin listing.
pub const AUTH_CHALLENGE_PATH: &str = "/api/auth/challenge";

/// Server-rendered admin listing.
pub const USERS_PATH: &str = "/users";

/// Liveness probe.
pub const HEALTH_PATH: &str = "/health";

/// Builds the mood update path for a user.
pub fn user_mood_path(user_id: i64) -> String {
    format!("/api/users/{user_id}/mood")
}
