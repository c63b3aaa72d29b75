//! Admin challenge endpoint.

use auth::{
    challenge_header_value, AdminMarker, BasicCredentials, ADMIN_MARKER_COOKIE,
    ADMIN_MARKER_TTL_HOURS,
};
use axum::{
    extract::State,
    http::{
        header::{AUTHORIZATION, WWW_AUTHENTICATE},
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};
use chrono::Utc;
use protocol::USERS_PATH;
use tracing::{debug, info, warn};

use super::found;
use crate::state::AppState;

/// Checks HTTP Basic credentials and, on success, sets the admin marker and
/// redirects to the users page.
pub async fn challenge(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    headers: HeaderMap,
) -> Response {
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(BasicCredentials::parse_header);

    match presented {
        Some(Ok(credentials)) if state.admin.verify(&credentials) => {
            let marker = AdminMarker::issue(Utc::now());
            let cookie = Cookie::build((ADMIN_MARKER_COOKIE, marker.to_cookie_value()))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Strict)
                .max_age(time::Duration::hours(ADMIN_MARKER_TTL_HOURS));

            info!(username = %credentials.username, "Admin authenticated");
            (jar.add(cookie), found(USERS_PATH)).into_response()
        }
        Some(Ok(credentials)) => {
            warn!(username = %credentials.username, "Admin credentials rejected");
            unauthorized()
        }
        Some(Err(e)) => {
            debug!(error = %e, "Unreadable authorization header");
            unauthorized()
        }
        None => unauthorized(),
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, challenge_header_value())],
        "Authentication Required",
    )
        .into_response()
}
