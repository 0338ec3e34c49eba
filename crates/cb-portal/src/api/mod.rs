//! CareBridge Portal HTTP API
//!
//! HTTP surface of the portal shell:
//! - Per-area login, logout, and current-session endpoints
//! - Guarded navigation over the declared route table
//! - Health probe

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;

use crate::auth::AuthService;
use crate::guard::RouteTable;
use crate::session::SessionStore;

pub mod auth_api;
pub mod pages_api;

/// Application state shared across handlers
#[derive(Clone)]
pub struct PortalState {
    pub store: Arc<SessionStore>,
    pub auth_service: Arc<AuthService>,
    pub routes: Arc<RouteTable>,
    /// Cookie surfaced to the browser as a session marker
    pub cookie_name: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the portal router. Every path not declared here goes through the
/// guarded navigation fallback.
pub fn portal_router(state: PortalState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/auth/:area/login", post(auth_api::login))
        .route("/auth/logout", post(auth_api::logout))
        .route("/auth/me", get(auth_api::me))
        .fallback(pages_api::navigate)
        .with_state(state)
}
