//! MCP Server entry point for User Manager
//!
//! Serves create, read, update and delete operations over a JSON user store
//! through the stdio transport. Configuration comes from the environment;
//! see `config.rs` for the variables and their defaults.

mod config;
mod logging;
mod prompts;
mod resources;
mod schemas;
mod server;

use std::process::ExitCode;

use anyhow::Context;
use rmcp::ServiceExt;
use server::{ServerIdentity, UserManagerMcp};
use user_manager_app::AppStateBuilder;

use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is configured from the same environment, so it is not up yet.
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(config.log_level, config.log_format);
    install_panic_hook();

    tracing::info!(
        name = %config.server_name,
        version = %config.server_version,
        environment = %config.environment,
        "Starting MCP User Management Server"
    );
    tracing::debug!(port = config.port, "PORT is reserved for network transports");
    tracing::info!(
        enable_auth = config.enable_auth,
        dangerously_omit_auth = config.dangerously_omit_auth,
        "Authentication flags are reported only; stdio connections are not authenticated"
    );

    match run(config).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("Failed to start MCP server: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: Config) -> anyhow::Result<ExitCode> {
    tracing::info!("Using user store at {}", config.data_file.display());
    let state = AppStateBuilder::new()
        .json_file(&config.data_file)
        .build()
        .context("build application state")?;
    state.run_startup().await;

    let mcp_server = UserManagerMcp::new(
        state.user_service,
        ServerIdentity {
            name: config.server_name,
            version: config.server_version,
        },
    );

    tracing::info!("Starting MCP server on stdio transport");
    let service = mcp_server
        .serve(rmcp::transport::stdio())
        .await
        .context("initialize stdio transport")?;
    tracing::info!("MCP Server successfully started and connected to stdio transport");

    tokio::select! {
        result = service.waiting() => match result {
            Ok(reason) => {
                tracing::info!("MCP server stopped: {reason:?}");
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                tracing::error!("MCP server error: {e}");
                Ok(ExitCode::FAILURE)
            }
        },
        signal = shutdown_signal() => {
            let name = signal.context("listen for shutdown signals")?;
            tracing::info!("Received {name}, shutting down gracefully...");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Resolve with the name of the first termination signal received.
async fn shutdown_signal() -> std::io::Result<&'static str> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result.map(|()| "SIGINT"),
            _ = sigterm.recv() => Ok("SIGTERM"),
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await.map(|()| "SIGINT")
    }
}

/// Log panics through tracing and terminate with status 1.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        tracing::error!("Uncaught panic: {info}");
        std::process::exit(1);
    }));
}
