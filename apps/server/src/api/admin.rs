//! Admin users page.

use auth::{AdminMarker, ADMIN_MARKER_COOKIE};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::SignedCookieJar;
use chrono::{DateTime, Utc};
use protocol::AUTH_CHALLENGE_PATH;
use tracing::{debug, error};

use super::found;
use crate::state::AppState;
use crate::views;

/// Lists every registered user, newest first.
///
/// Callers without a valid admin marker are sent to the challenge.
pub async fn list_users(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    if !has_valid_marker(&jar, Utc::now()) {
        debug!("No valid admin marker, redirecting to challenge");
        return found(AUTH_CHALLENGE_PATH);
    }

    match state.store.list_users().await {
        Ok(users) => Html(views::users_page(&users)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load users").into_response()
        }
    }
}

/// Returns true if the jar holds a correctly signed, unexpired marker.
fn has_valid_marker(jar: &SignedCookieJar, now: DateTime<Utc>) -> bool {
    jar.get(ADMIN_MARKER_COOKIE)
        .and_then(|cookie| AdminMarker::from_cookie_value(cookie.value()).ok())
        .is_some_and(|marker| marker.is_valid_at(now))
}

#[cfg(test)]
mod tests {
    use auth::BasicCredentials;
    use axum::http::header::{AUTHORIZATION, COOKIE, LOCATION, SET_COOKIE};
    use axum_extra::extract::cookie::{Cookie, Key};
    use chrono::Duration;

    use super::*;
    use crate::testing::{body_string, get, test_app, ADMIN_PASSWORD, ADMIN_USERNAME};

    #[tokio::test]
    async fn test_without_marker_redirects_to_challenge() {
        let (app, _) = test_app();

        let response = get(&app, "/users", &[]).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/api/auth/challenge");
    }

    #[tokio::test]
    async fn test_forged_marker_is_rejected() {
        let (app, _) = test_app();

        // Plain value without a valid signature
        let now = AdminMarker::issue(Utc::now()).to_cookie_value();
        let forged = format!("admin-token={now}");
        let response = get(&app, "/users", &[(COOKIE, forged.as_str())]).await;

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/api/auth/challenge");
    }

    #[tokio::test]
    async fn test_marker_grants_access() {
        let (app, _) = test_app();
        let header = BasicCredentials::new(ADMIN_USERNAME, ADMIN_PASSWORD).to_header_value();

        let response = get(&app, "/api/auth/challenge", &[(AUTHORIZATION, header.as_str())]).await;
        let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
        let cookie = set_cookie.split(';').next().unwrap().to_string();

        let response = get(&app, "/users", &[(COOKIE, cookie.as_str())]).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("No users yet"));
    }

    #[test]
    fn test_marker_expiry() {
        let key = Key::from(&auth::generate_signing_secret());
        let issued = Utc::now();
        let jar = SignedCookieJar::new(key).add(Cookie::new(
            ADMIN_MARKER_COOKIE,
            AdminMarker::issue(issued).to_cookie_value(),
        ));

        assert!(has_valid_marker(&jar, issued));
        assert!(has_valid_marker(&jar, issued + Duration::hours(23)));
        assert!(!has_valid_marker(&jar, issued + Duration::hours(25)));
    }
}
