mod app;
mod config;
mod fixtures;
mod routes;
mod state;

use chrono::Utc;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let fixture_dir = config::fixture_dir();
    let fixture_seed = config::fixture_seed();
    let today = Utc::now().date_naive();
    let (bodies, source) = match fixtures::load(fixture_dir.as_deref(), fixture_seed, today).await {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!(error = %e, "failed to prepare profile fixtures");
            return;
        }
    };

    let static_dir = config::static_dir();
    if !static_dir.join("index.html").exists() {
        tracing::warn!(
            static_dir = %static_dir.display(),
            "client bundle not found; build the client with trunk first"
        );
    }
    tracing::info!(
        fixture_source = source.as_str(),
        static_dir = %static_dir.display(),
        "Fixtures ready"
    );

    let state = AppState::new(bodies, source, static_dir);
    let app = app::build_app(state);

    let addr = format!("0.0.0.0:{}", config::server_port());
    tracing::info!("RADIndex server listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind TCP listener");
            return;
        }
    };
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server failed");
    }

    tracing::info!("Server shut down gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                return;
            }
        };
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
