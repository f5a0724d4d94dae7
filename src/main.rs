//! Repobridge HTTP gateway entrypoint.

use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;

use ortho_config::OrthoConfig;
use repobridge::{GatewayError, GitFacade, RepobridgeConfig, server, telemetry};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), GatewayError> {
    let config = load_config()?;
    config.validate()?;
    telemetry::init_tracing(config.log_format()?)?;

    let facade = Arc::new(GitFacade::from_config(&config)?);
    for (provider, authenticated) in facade.authentication_status() {
        tracing::info!(%provider, authenticated, "provider registered");
    }

    let address = config.bind_address()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| GatewayError::Io {
            message: format!("failed to bind {address}: {error}"),
        })?;

    server::serve(listener, facade, shutdown_signal()).await
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`GatewayError::Configuration`] when ortho-config fails to parse
/// arguments or load configuration files.
fn load_config() -> Result<RepobridgeConfig, GatewayError> {
    RepobridgeConfig::load().map_err(|error| GatewayError::Configuration {
        message: error.to_string(),
    })
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
