//! Helpers shared by the client tests.

use std::sync::Arc;

use newyear_server::{create_app, AppState, ServerConfig};
use tokio::net::TcpListener;
use user_store::MemoryUserStore;

/// Serves the real server router on a random local port.
///
/// Returns the base URL and the store behind it.
pub async fn spawn_server() -> (String, MemoryUserStore) {
    let config = ServerConfig {
        admin_username: Some("admin".to_string()),
        admin_password: Some("s3cret".to_string()),
        enable_cors: false,
        ..Default::default()
    };
    let store = MemoryUserStore::new();
    let state = AppState::with_store(config, Arc::new(store.clone())).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, create_app(state)).await.unwrap();
    });

    (format!("http://{addr}"), store)
}
