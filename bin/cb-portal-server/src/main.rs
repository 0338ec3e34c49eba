//! CareBridge Portal Server
//!
//! Serves the guarded portal shell:
//! - Per-area login/logout/session endpoints under `/auth`
//! - Guarded navigation over the declared route table
//! - Health probe at `/health`
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CAREBRIDGE_CONFIG` | - | Path to a TOML config file |
//! | `CAREBRIDGE_HTTP_PORT` | `8080` | HTTP port |
//! | `CAREBRIDGE_DATA_DIR` | `./data` | Directory for the persisted session entry |
//! | `CAREBRIDGE_SESSION_FILE` | `session.json` | Session file name inside the data dir |
//! | `CAREBRIDGE_LOGOUT_NOTIFY_URL` | - | Best-effort logout hook URL |
//! | `CAREBRIDGE_DEV_MODE` | `false` | In-memory session storage |
//! | `RUST_LOG` | `info` | Log level |

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use cb_config::AppConfig;
use cb_portal::{
    portal_router, seeded_directory, AuthService, FileSessionStorage, HttpLogoutNotifier,
    LogoutNotifier, MemorySessionStorage, NoopLogoutNotifier, PortalState, RouteTable,
    SessionStorage, SessionStore,
};

#[tokio::main]
async fn main() -> Result<()> {
    cb_common::logging::init_logging("cb-portal-server");

    info!("Starting CareBridge Portal Server");

    let config = AppConfig::load()?;

    // Session storage: one durable entry, or in-memory in dev mode
    let storage: Arc<dyn SessionStorage> = if config.dev_mode {
        info!("Dev mode: using in-memory session storage");
        Arc::new(MemorySessionStorage::new())
    } else {
        let path = PathBuf::from(&config.data_dir).join(&config.session.file_name);
        info!(path = %path.display(), "Using file-backed session storage");
        Arc::new(FileSessionStorage::new(path))
    };

    let notifier: Arc<dyn LogoutNotifier> = if config.auth.logout_notify_url.is_empty() {
        Arc::new(NoopLogoutNotifier)
    } else {
        info!(url = %config.auth.logout_notify_url, "Logout notifications enabled");
        Arc::new(HttpLogoutNotifier::new(
            config.auth.logout_notify_url.clone(),
            Duration::from_millis(config.auth.logout_notify_timeout_ms),
        )?)
    };

    // Session holder: restore the persisted entry once, then settle
    let store = Arc::new(SessionStore::new(storage, notifier));
    store.restore();

    let directory = Arc::new(seeded_directory());
    let auth_service = Arc::new(AuthService::new(directory, store.clone()));

    let state = PortalState {
        store,
        auth_service,
        routes: Arc::new(RouteTable::default()),
        cookie_name: config.session.cookie_name.clone(),
    };

    let app = portal_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    let addr = format!("{}:{}", config.http.host, config.http.port);
    info!("Portal server listening on http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    let server_task = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    info!("Press Ctrl+C to shutdown");
    shutdown_signal().await;
    info!("Shutdown signal received...");

    server_task.abort();

    info!("CareBridge Portal Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
