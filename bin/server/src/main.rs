mod config;
mod constants;
mod handlers;
mod state;
#[cfg(test)]
mod test_support;

use actix_web::{web, App, HttpServer};
use config::ServerConfig;
use registration::{DirectoryChain, StaticEmailDirectory};
use state::AppState;
use std::sync::Arc;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Filter out actix-server worker shutdown messages
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info")
                    .add_directive("actix_server::worker=warn".parse().unwrap())
                    .add_directive("actix_server::accept=warn".parse().unwrap())
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting employee registration server (PID: {})",
        std::process::id()
    );

    let config = ServerConfig::load().map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let initialized = config.sink.initialize();
    info!(sink = ?config.sink, "Submission sink initialized");

    let mut directory = DirectoryChain::new().with(Arc::new(StaticEmailDirectory::new(
        config.rejected_emails.iter().cloned(),
    )));
    if let Some(known) = initialized.directory {
        directory.push(known);
    }
    info!(
        rejected_emails = config.rejected_emails.len(),
        "Email directory ready"
    );

    info!(
        ttl_secs = config.draft_limits.ttl.as_secs(),
        max_open = config.draft_limits.max_open,
        "Draft session limits"
    );
    let state = web::Data::new(AppState::with_limits(
        directory,
        initialized.sink,
        config.draft_limits,
    ));

    let bind_address = config.bind_address();
    info!("Starting server on http://{}", bind_address);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(handlers::configure)
    })
    .bind(&bind_address)
    .map_err(|e| {
        error!("Failed to bind to {}: {}", bind_address, e);
        e
    })?;

    info!("Server bound successfully to http://{}", bind_address);

    server.workers(1).run().await
}
