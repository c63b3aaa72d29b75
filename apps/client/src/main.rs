//! New Year experience terminal client binary

use std::sync::Arc;

use clap::Parser;
use newyear_client::{init_tracing, App, Cli, ClientConfig};
use session::FileSessionStorage;
use tokio::io::BufReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = ClientConfig::load()?;
    init_tracing(&config.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        server_url = %config.server_url,
        session_path = %config.session_path.display(),
        "Starting New Year client"
    );

    let storage = Arc::new(FileSessionStorage::new(&config.session_path));
    let mut app = App::new(config, storage)?;

    let mut input = BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    app.run(cli.command(), &mut input, &mut out).await
}
