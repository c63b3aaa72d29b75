//! API endpoints.

pub mod admin;
pub mod auth;
pub mod users;

use axum::{
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use protocol::{AUTH_CHALLENGE_PATH, HEALTH_PATH, REGISTER_PATH, USERS_PATH, USER_MOOD_ROUTE};

use crate::state::AppState;

/// Creates the router with all endpoints.
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Visitor endpoints
        .route(REGISTER_PATH, post(users::register))
        .route(USER_MOOD_ROUTE, patch(users::update_mood))
        // Admin endpoints
        .route(AUTH_CHALLENGE_PATH, get(auth::challenge))
        .route(USERS_PATH, get(admin::list_users))
        // Misc
        .route("/", get(root))
        .route(HEALTH_PATH, get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

async fn root() -> Response {
    found(USERS_PATH)
}

/// Temporary (302) redirect to `location`.
pub(crate) fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location)]).into_response()
}
