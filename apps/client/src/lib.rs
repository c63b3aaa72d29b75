//! New Year experience terminal client
//!
//! The client walks a visitor through three pages:
//! - Enter: register a name with the server
//! - Mood: pick one of four moods, synced to the server in the background
//! - Experience: a personalized countdown to the next new year
//!
//! Identity and mood live in a session file between runs.

pub mod app;
pub mod cli;
pub mod config;
pub mod countdown;
pub mod pages;
pub mod server_client;

#[cfg(test)]
mod testing;

pub use app::App;
pub use cli::{Cli, Command};
pub use config::ClientConfig;
pub use server_client::{ApiClient, ClientError};

/// Initializes tracing on stderr so page output on stdout stays clean.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("newyear_client={log_level},session={log_level}")));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
