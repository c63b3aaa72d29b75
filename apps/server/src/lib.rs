//! New Year experience server
//!
//! The server handles:
//! - Visitor registration and mood updates (JSON API)
//! - The admin challenge (HTTP Basic, then a signed cookie marker)
//! - The admin users page

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod views;

#[cfg(test)]
mod testing;

use axum::{http::HeaderValue, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use state::AppState;

/// Creates the application router with all routes configured.
pub fn create_app(state: AppState) -> Router {
    let cors = build_cors(&state.config);

    let app = api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(cors) => app.layer(cors),
        None => app,
    }
}

/// Builds the CORS layer, or `None` when CORS is disabled.
fn build_cors(config: &ServerConfig) -> Option<CorsLayer> {
    if !config.enable_cors {
        return None;
    }

    if config.cors_origins.is_empty() {
        return Some(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("newyear_server={log_level},tower_http={log_level}"))
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
