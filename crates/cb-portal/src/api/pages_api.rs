//! Guarded Navigation
//!
//! Fallback handler serving every path in the route table. The guard decides;
//! this module only translates outcomes into HTTP:
//! - `Render` -> 200 with a page descriptor (page content is out of scope)
//! - `ShowLoading` -> 503 + `Retry-After` while the persisted-session restore
//!   is in flight
//! - `RedirectToLogin` -> 303 to the area login with a `returnTo` hint
//! - `RedirectToHome` -> 303 to the role's home

use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::api::PortalState;
use crate::guard::Outcome;

/// Placeholder page body; the real application renders views here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDescriptor {
    pub path: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoadingBody {
    status: &'static str,
}

fn see_other(location: String) -> Response {
    (StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response()
}

/// Evaluate the guard for the requested path.
pub async fn navigate(State(state): State<PortalState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    let snapshot = state.store.snapshot();

    match state.routes.navigate(&snapshot, &path) {
        Outcome::Render => Json(PageDescriptor { path }).into_response(),
        Outcome::ShowLoading => (
            StatusCode::SERVICE_UNAVAILABLE,
            [(header::RETRY_AFTER, "1")],
            Json(LoadingBody { status: "loading" }),
        )
            .into_response(),
        Outcome::RedirectToLogin { target, return_to } => see_other(format!(
            "{target}?returnTo={}",
            urlencoding::encode(&return_to)
        )),
        Outcome::RedirectToHome { target } => see_other(target.to_string()),
    }
}
