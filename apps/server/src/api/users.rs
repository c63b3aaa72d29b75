//! Visitor endpoints: registration and mood updates.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use entities::{check_name, Mood, NewUser};
use protocol::{RegisterRequest, UpdateMoodRequest, UserResponse};
use tracing::info;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

/// Registers a new visitor.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ServerResult<Json<UserResponse>> {
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;

    check_name(&request.name)
        .map_err(|violation| ServerError::InvalidRequest(violation.message().to_string()))?;

    let user = state
        .store
        .create_user(NewUser::new(request.name))
        .await
        .map_err(|e| ServerError::persistence("Failed to register user", e))?;

    info!(user_id = user.id, "User registered");
    Ok(Json(UserResponse::new(user)))
}

/// Stores the mood picked by a visitor.
pub async fn update_mood(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<UpdateMoodRequest>, JsonRejection>,
) -> ServerResult<Json<UserResponse>> {
    let user_id = parse_user_id(&raw_id)?;
    let Json(request) = payload.map_err(|e| ServerError::InvalidRequest(e.body_text()))?;

    let mood = Mood::parse(&request.mood).ok_or_else(|| {
        ServerError::InvalidRequest(format!(
            "Invalid mood. Expected one of: {}",
            Mood::expected_values()
        ))
    })?;

    let user = state
        .store
        .update_mood(user_id, mood)
        .await
        .map_err(|e| {
            if e.is_not_found() {
                ServerError::NotFound("User not found".to_string())
            } else {
                ServerError::persistence("Failed to update mood", e)
            }
        })?;

    info!(user_id, mood = %mood, "Mood updated");
    Ok(Json(UserResponse::new(user)))
}

/// Accepts only plain positive decimal ids.
fn parse_user_id(raw: &str) -> ServerResult<i64> {
    let invalid = || ServerError::InvalidRequest("Invalid user ID".to_string());

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(invalid)
}
