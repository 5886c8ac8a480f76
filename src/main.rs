use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use club_registration::{
    config::{RelayConfig, ServerConfig},
    create_router, AppState, FormServiceClient,
};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received interrupt signal, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received terminate signal, starting graceful shutdown");
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let server_config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid server configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let relay_config = match RelayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid form service configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    info!(
        "Relaying registrations to {} ({} mapped fields)",
        relay_config.form_url,
        relay_config.mapping.len()
    );

    let client = match FormServiceClient::new(relay_config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    // Create shared application state
    let app_state = Arc::new(AppState { client });

    let app = create_router(app_state, server_config.static_dir.as_deref());

    let listener = match tokio::net::TcpListener::bind(&server_config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", server_config.addr, e);
            return ExitCode::FAILURE;
        }
    };
    info!("Server listening on {}", server_config.addr);

    // Start server with graceful shutdown
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Server has been gracefully shut down");
    ExitCode::SUCCESS
}
