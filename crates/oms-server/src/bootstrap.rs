use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use oms_auth::ClerkVerifier;
use oms_config::OmsConfig;
use oms_db::service::OmsService;

use crate::cli::ServeArgs;
use crate::routes;
use crate::state::AppState;

/// Read `.env`, then the layered config (or the explicit file when given).
pub fn load_config(path: Option<&str>) -> anyhow::Result<OmsConfig> {
    match path {
        Some(path) => {
            let _ = dotenvy::dotenv();
            OmsConfig::load_from_file(Path::new(path))
                .with_context(|| format!("failed to load config from {path}"))
        }
        None => OmsConfig::load_with_dotenv().context("failed to load config"),
    }
}

pub async fn migrate(config: &OmsConfig) -> anyhow::Result<()> {
    let service = OmsService::open(&config.database)
        .await
        .context("failed to open store")?;
    tracing::info!(remote = service.db().is_remote(), "migrations applied");
    Ok(())
}

pub async fn serve(mut config: OmsConfig, args: &ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    config.validate_for_serve()?;
    let addr = config.server.bind_addr()?;

    let service = OmsService::open(&config.database)
        .await
        .context("failed to open store")?;
    let verifier = ClerkVerifier::new(&config.clerk.secret_key)?;
    let state = AppState::new(service, config, Arc::new(verifier));

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::warn!(%error, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
        tracing::info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!("received terminate signal, shutting down");
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
