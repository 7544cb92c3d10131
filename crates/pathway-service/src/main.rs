mod args;

use clap::Parser;
use tokio::net::TcpListener;

use pathway_service::build_app;
use pathway_service::state::AppState;

use crate::args::Args;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let otel_provider = pathway_common::telemetry::init_tracing(
        args.mode.service_name(),
        args.log_format,
        args.otlp_url.as_deref(),
        args.otlp_token.as_deref(),
    );

    let st = AppState::new(args.mode, args.max_body_bytes);
    let app = build_app(st);

    let listener = TcpListener::bind((args.host.as_str(), args.port)).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        mode = %args.mode,
        "pathway service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(provider) = otel_provider {
        if let Err(e) = provider.shutdown() {
            tracing::warn!(error=%e, "tracer provider shutdown failed");
        }
    }
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(error=%e, "failed to install SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("SIGINT received, shutting down");
        }
        _ = sigterm.recv() => {
            tracing::info!("SIGTERM received, shutting down");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
