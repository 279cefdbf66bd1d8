use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use desk_config::DeskConfig;
use tracing::{info, warn};

use crate::cli::ServeArgs;
use crate::context::AppContext;
use crate::http;

pub async fn handle(args: &ServeArgs, mut config: DeskConfig) -> anyhow::Result<()> {
    if let Some(bind) = &args.bind {
        config.server.bind.clone_from(bind);
    }
    config
        .validate_for_serve()
        .context("configuration is not servable")?;

    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind))?;
    if !config.database.is_durable() {
        warn!("serving from a non-durable backend; data is lost on exit");
    }

    let ctx = AppContext::init(config)
        .await
        .context("failed to initialize auditdesk application context")?;
    ctx.ensure_bootstrap_admin().await?;
    info!(dir = %ctx.service.files().dir().display(), "storing uploads");

    let app = http::router(Arc::new(ctx))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "auditdesk listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server failed")?;
    info!("auditdesk stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "failed to listen for ctrl-c");
        // Without a signal handler, keep serving until the process is killed.
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
